use std::fmt;
use std::path::PathBuf;

use routedoc_openapi::{BuildError, EncodeError};
use thiserror::Error;

pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("no routes registered")]
    NoRoutes,

    #[error("failed to build the OpenAPI document: {0}")]
    Build(#[from] BuildError),

    #[error("failed to encode the OpenAPI document: {0}")]
    Encode(#[from] EncodeError),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document does not match a fresh build.
    #[error("{} {kind}; run `generate` to refresh it", path.display())]
    Drift { path: PathBuf, kind: DriftKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    Changed,
    Missing,
}

impl fmt::Display for DriftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftKind::Changed => f.write_str("is out of date"),
            DriftKind::Missing => f.write_str("does not exist"),
        }
    }
}
