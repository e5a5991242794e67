use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use colored::Colorize;
use routedoc_core::Registry;
use routedoc_openapi::{DocumentBuilder, Format};
use tracing::warn;

use super::render;
use crate::error::{CliError, DriftKind, Result};

pub fn run(registry: &Registry, builder: &DocumentBuilder, out: &Path, format: Format) -> Result<()> {
    let encoded = render(registry, builder, format)?;

    let stored = match fs::read(out) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(drift(out, DriftKind::Missing));
        }
        Err(source) => {
            return Err(CliError::Io {
                path: out.to_path_buf(),
                source,
            })
        }
    };

    if stored != encoded.bytes {
        return Err(drift(out, DriftKind::Changed));
    }

    println!("  {} {}", "up to date".green().bold(), out.display());
    Ok(())
}

fn drift(out: &Path, kind: DriftKind) -> CliError {
    warn!(path = %out.display(), %kind, "OpenAPI document drift");
    println!("  {} {} {kind}", "drift".red().bold(), out.display());
    CliError::Drift {
        path: out.to_path_buf(),
        kind,
    }
}
