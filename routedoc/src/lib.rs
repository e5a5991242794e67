//! routedoc: declarative OpenAPI 3.1 documentation for HTTP services.
//!
//! This facade crate re-exports the routedoc sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use routedoc::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Crate          |
//! |---------|---------|----------------|
//! | `cli`   | **yes** | `routedoc-cli` |

// The derive macro uses `proc-macro-crate` to detect whether the user
// depends on `routedoc` (facade) or on `routedoc-core`, and generates
// paths against whichever it finds. Generated code expects the core items
// at the root of this crate.
pub extern crate routedoc_core;
pub extern crate routedoc_macros;

pub use routedoc_core::*;
pub use routedoc_macros::Describe;

pub use routedoc_openapi;
pub use routedoc_openapi::{
    default_response_description, encode, normalize_path, BuildError, ConfigError,
    DocumentBuilder, EncodeError, Encoded, Format, OpenApiConfig, SchemaBuilder,
};

#[cfg(feature = "cli")]
pub use routedoc_cli;

/// Unified prelude: import everything with `use routedoc::prelude::*`.
pub mod prelude {
    pub use routedoc_core::prelude::*;
    pub use routedoc_macros::Describe;
    pub use routedoc_openapi::{encode, DocumentBuilder, Format, OpenApiConfig};

    #[cfg(feature = "cli")]
    pub use routedoc_cli::{run_from_args, CliError};
}
