//! Where generated impls find the descriptor types.
//!
//! Users depend either on the `routedoc` facade or on `routedoc-core`;
//! the derive must name whichever one is in their manifest.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// `::routedoc` for facade users, `::routedoc_core` (possibly renamed)
/// otherwise.
pub fn routedoc_core_path() -> TokenStream {
    let found = crate_name("routedoc").or_else(|_| crate_name("routedoc-core"));
    match found {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        // Neither found: errors will name the core crate.
        Err(_) => quote!(::routedoc_core),
    }
}
