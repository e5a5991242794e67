use std::fs;
use std::io::Write;
use std::path::Path;

use colored::Colorize;
use routedoc_core::Registry;
use routedoc_openapi::{DocumentBuilder, Format};

use super::render;
use crate::error::{CliError, Result};

pub fn run(registry: &Registry, builder: &DocumentBuilder, out: &Path, format: Format) -> Result<()> {
    let encoded = render(registry, builder, format)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CliError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(out, &encoded.bytes).map_err(|source| CliError::Io {
        path: out.to_path_buf(),
        source,
    })?;

    println!(
        "  {} {} ({}, {} routes)",
        "wrote".green().bold(),
        out.display(),
        format,
        registry.len()
    );
    Ok(())
}

/// Render the document into `writer`.
pub fn write_to<W: Write>(
    registry: &Registry,
    builder: &DocumentBuilder,
    format: Format,
    writer: &mut W,
) -> Result<()> {
    let encoded = render(registry, builder, format)?;
    writer
        .write_all(&encoded.bytes)
        .and_then(|()| writer.flush())
        .map_err(|source| CliError::Io {
            path: "<stdout>".into(),
            source,
        })
}
