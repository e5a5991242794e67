//! Command implementations.
//!
//! Both commands share [`render`]: snapshot the registry, build the
//! document, encode it. YAML output is prefixed with [`HEADER`]; JSON has
//! no comment syntax and is written as is.

use std::path::Path;

use routedoc_core::Registry;
use routedoc_openapi::{encode, DocumentBuilder, Encoded, Format};
use tracing::info;

use crate::error::{CliError, Result};

/// Drift guard: `check --out <file>`.
///
/// Renders the document and compares it byte for byte with the stored file.
pub mod check;

/// Document output: `generate --out <file>` or `generate --stdout`.
///
/// Renders the document and writes it, creating parent directories.
pub mod generate;

/// First line of every generated YAML document.
pub const HEADER: &str = "# Code generated by routedoc. DO NOT EDIT.\n";

/// Snapshot `registry`, build, and encode as `format`.
pub fn render(registry: &Registry, builder: &DocumentBuilder, format: Format) -> Result<Encoded> {
    let endpoints = registry.snapshot();
    if endpoints.is_empty() {
        return Err(CliError::NoRoutes);
    }
    let document = builder.build(&endpoints)?;
    let mut encoded = encode(&document, format)?;
    if format == Format::Yaml {
        let mut bytes = Vec::with_capacity(HEADER.len() + encoded.bytes.len());
        bytes.extend_from_slice(HEADER.as_bytes());
        bytes.append(&mut encoded.bytes);
        encoded.bytes = bytes;
    }
    info!(%format, bytes = encoded.bytes.len(), "OpenAPI document rendered");
    Ok(encoded)
}

/// `--format` wins, then the extension of `out`, then YAML.
pub fn resolve_format(out: &Path, explicit: Option<Format>) -> Format {
    explicit
        .or_else(|| {
            out.extension()
                .and_then(|ext| ext.to_str())
                .and_then(Format::from_extension)
        })
        .unwrap_or_default()
}
