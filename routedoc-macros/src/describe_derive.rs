use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    parse_quote, Attribute, Data, DeriveInput, Expr, Field, Fields, FieldsNamed, GenericParam, Lit,
    LitStr, Meta, Token, Type,
};

use crate::case::RenameRule;
use crate::crate_path::routedoc_core_path;

/// Container-level settings gathered from `#[serde(...)]` and `#[describe(...)]`.
#[derive(Default)]
struct ContainerAttrs {
    rename_all: Option<RenameRule>,
    inline: bool,
    transparent: bool,
}

/// Everything the field-level attributes say about one field.
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
    flatten: bool,
    omit_empty: bool,
    required: bool,
    description: Option<String>,
    example: Option<Expr>,
}

pub fn expand(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand_inner(input) {
        Ok(ts) => ts.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_inner(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let krate = routedoc_core_path();

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Describe cannot be derived for types with lifetime parameters",
        ));
    }
    for param in input.generics.params.iter_mut() {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#krate::Describe));
        }
    }

    let name = &input.ident;

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                let container = parse_container_attrs(&input.attrs)?;
                if container.transparent {
                    let inner = transparent_field(fields)?;
                    return Ok(describe_impl(&input, &krate, quote! {
                        <#inner as #krate::Describe>::describe()
                    }));
                }
                let specs = fields
                    .named
                    .iter()
                    .map(|field| field_spec(field, &container, &krate))
                    .collect::<syn::Result<Vec<_>>>()?;
                let inline = container.inline.then(|| quote!(.inline()));
                quote! {
                    #krate::TypeDescriptor::of::<Self>(#krate::TypeKind::Struct(
                        #krate::StructDescriptor::new(
                            #krate::short_type_name(::core::any::type_name::<Self>()),
                            ::core::module_path!(),
                        )
                        #inline
                        #(.field(#specs))*
                    ))
                }
            }
            // Newtypes serialize as their inner value.
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let inner = &fields.unnamed[0].ty;
                quote! { <#inner as #krate::Describe>::describe() }
            }
            Fields::Unnamed(_) => unsupported(&krate, "tuple struct"),
            Fields::Unit => unsupported(&krate, "unit struct"),
        },
        Data::Enum(data) => {
            // Unit-only enums serialize as their variant name.
            if data.variants.iter().all(|v| matches!(v.fields, Fields::Unit)) {
                quote! { #krate::TypeDescriptor::of::<Self>(#krate::TypeKind::String) }
            } else {
                unsupported(&krate, "enum")
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Describe cannot be derived for unions",
            ))
        }
    };

    Ok(describe_impl(&input, &krate, body))
}

fn describe_impl(input: &DeriveInput, krate: &TokenStream, body: TokenStream) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics #krate::Describe for #name #ty_generics #where_clause {
            fn describe() -> #krate::TypeDescriptor {
                #body
            }
        }
    }
}

/// The one field a `#[serde(transparent)]` struct serializes as: the only
/// field not marked `skip`.
fn transparent_field(fields: &FieldsNamed) -> syn::Result<&Type> {
    let mut kept = Vec::new();
    for field in &fields.named {
        if !parse_field_attrs(&field.attrs)?.skip {
            kept.push(&field.ty);
        }
    }
    match kept.as_slice() {
        [ty] => Ok(*ty),
        _ => Err(syn::Error::new_spanned(
            &fields.named,
            "#[serde(transparent)] requires exactly one field that is not skipped",
        )),
    }
}

fn unsupported(krate: &TokenStream, kind: &str) -> TokenStream {
    quote! { #krate::TypeDescriptor::of::<Self>(#krate::TypeKind::Unsupported(#kind)) }
}

fn field_spec(field: &Field, container: &ContainerAttrs, krate: &TokenStream) -> syn::Result<TokenStream> {
    // Named fields always carry an identifier.
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let ident_str = ident.unraw().to_string();
    let ty = &field.ty;
    let attrs = parse_field_attrs(&field.attrs)?;

    let mut chain = Vec::new();

    let rename = attrs
        .rename
        .or_else(|| container.rename_all.map(|rule| rule.apply(&ident_str)));
    if let Some(rename) = rename {
        chain.push(quote!(.rename(#rename)));
    }
    if attrs.skip {
        chain.push(quote!(.skip()));
    }
    if attrs.flatten {
        chain.push(quote!(.embedded()));
    }
    if attrs.omit_empty {
        chain.push(quote!(.omit_empty()));
    }
    if attrs.required {
        chain.push(quote!(.required()));
    }
    if let Some(description) = attrs.description.or_else(|| doc_comment(&field.attrs)) {
        chain.push(quote!(.description(#description)));
    }
    if let Some(example) = attrs.example {
        chain.push(quote!(.example(#example)));
    }

    Ok(quote! {
        #krate::FieldSpec::new(#ident_str, #krate::TypeRef::of::<#ty>())
            #(#chain)*
    })
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if let Some(value) = serialize_side(&meta)? {
                        out.rename_all = Some(RenameRule::parse(&value.value()).ok_or_else(|| {
                            syn::Error::new_spanned(&value, "unknown rename_all rule")
                        })?);
                    }
                    Ok(())
                } else if meta.path.is_ident("transparent") {
                    out.transparent = true;
                    Ok(())
                } else {
                    skip_meta_value(&meta)
                }
            })?;
        } else if attr.path().is_ident("describe") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("inline") {
                    out.inline = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `inline` in #[describe(...)] on a struct"))
                }
            })?;
        }
    }
    Ok(out)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        let path = attr.path();
        if path.is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(name) = serialize_side(&meta)? {
                        out.rename = Some(name.value());
                    }
                    Ok(())
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("skip_serializing_if") {
                    out.omit_empty = true;
                    skip_meta_value(&meta)
                } else if meta.path.is_ident("flatten") {
                    out.flatten = true;
                    Ok(())
                } else {
                    skip_meta_value(&meta)
                }
            })?;
        } else if path.is_ident("garde") || path.is_ident("validate") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    out.required = true;
                }
                skip_meta_value(&meta)
            })?;
        } else if path.is_ident("describe") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    out.required = true;
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("description") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.description = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("example") {
                    out.example = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error(
                        "expected `required`, `skip`, `description` or `example` in #[describe(...)]",
                    ))
                }
            })?;
        }
    }
    Ok(out)
}

/// Read `key = "..."` or `key(serialize = "...", deserialize = "...")`,
/// returning the serialize-side value. `None` when only the deserialize
/// side is given.
fn serialize_side(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }
    let mut found = None;
    meta.parse_nested_meta(|inner| {
        let lit: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("serialize") {
            found = Some(lit);
        }
        Ok(())
    })?;
    Ok(found)
}

/// Consume the value of an attribute we do not interpret.
fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream = content.parse()?;
    }
    Ok(())
}

/// Join a field's `///` lines into one description.
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(syn::ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
