//! OpenAPI 3.1 document generation.
//!
//! The pipeline is snapshot → [`DocumentBuilder::build`] → [`encode`]:
//!
//! ```ignore
//! use routedoc_openapi::{encode, DocumentBuilder, Format, OpenApiConfig};
//!
//! let builder = DocumentBuilder::new(OpenApiConfig::new("Pet Store", "1.0.0"))
//!     .with_hooks(registry.hooks().clone());
//! let document = builder.build(&registry.snapshot())?;
//! let yaml = encode(&document, Format::Yaml)?;
//! ```

mod builder;
mod config;
mod encode;
mod error;
mod path;
pub mod schema;

pub use builder::{default_response_description, DocumentBuilder};
pub use config::OpenApiConfig;
pub use encode::{encode, Encoded, Format};
pub use error::{BuildError, ConfigError, EncodeError, Result};
pub use path::normalize_path;
pub use schema::SchemaBuilder;
