//! Rendering a [`Document`] as bytes.

use std::fmt;
use std::str::FromStr;

use routedoc_core::Document;
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Output encoding of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    #[default]
    Yaml,
}

impl Format {
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Yaml => "application/yaml",
        }
    }

    /// Format implied by a file extension (`json`, `yaml`, `yml`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

impl FromStr for Format {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "" | "yaml" | "yml" => Ok(Format::Yaml),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Yaml => f.write_str("yaml"),
        }
    }
}

/// An encoded document and the content type it should be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Encode `document`. Identical documents always produce identical bytes.
pub fn encode(document: &Document, format: Format) -> Result<Encoded, EncodeError> {
    let bytes = match format {
        Format::Json => {
            let mut bytes = serde_json::to_vec_pretty(document)?;
            bytes.push(b'\n');
            bytes
        }
        Format::Yaml => serde_yaml::to_string(document)?.into_bytes(),
    };
    Ok(Encoded {
        bytes,
        content_type: format.content_type(),
    })
}
