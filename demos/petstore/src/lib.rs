//! Pet store API description.
//!
//! Route descriptors live in [`routes`], payload types in [`models`] and
//! the project's documentation conventions in [`hooks`]. The
//! `petstore-openapi` binary renders the document with the routedoc CLI.

pub mod hooks;
pub mod models;
pub mod routes;

use routedoc::{ConfigError, DocumentBuilder, OpenApiConfig, Registry, RegistryError};

const CONFIG: &str = include_str!("../openapi-config.yaml");

/// A registry holding every pet store route, with the project hooks.
pub fn registry() -> Result<Registry, RegistryError> {
    let registry = Registry::with_hooks(hooks::default_hooks());
    routes::register_all(&registry)?;
    tracing::debug!(routes = registry.len(), "pet store routes registered");
    Ok(registry)
}

pub fn config() -> Result<OpenApiConfig, ConfigError> {
    OpenApiConfig::from_yaml_str(CONFIG)
}

/// Document builder sharing the registry's hooks.
pub fn document_builder(registry: &Registry) -> Result<DocumentBuilder, ConfigError> {
    Ok(DocumentBuilder::new(config()?).with_hooks(registry.hooks().clone()))
}
