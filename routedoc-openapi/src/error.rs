use routedoc_core::HookFailure;
use thiserror::Error;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Errors that abort a whole document build. No partial document is returned.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unsupported map key `{key}` in `{type_name}`: only string keys can be documented")]
    UnsupportedMapKey {
        type_name: &'static str,
        key: &'static str,
    },

    #[error("unsupported type `{type_name}` ({kind})")]
    UnsupportedType {
        type_name: &'static str,
        kind: &'static str,
    },

    #[error("unsupported HTTP method `{method}` on {path}")]
    UnsupportedMethod { method: String, path: String },

    /// Two endpoints share a method and a normalized path.
    #[error("{method} {path} is registered more than once")]
    DuplicateOperation { method: String, path: String },

    #[error("component name `{name}` is produced by both `{first}` and `{second}`")]
    ComponentNameConflict {
        name: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("inline type `{type_name}` contains itself; recursive types need a component name")]
    RecursiveInlineType { type_name: &'static str },

    #[error(transparent)]
    Hook(#[from] HookFailure),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unsupported output format `{0}` (expected `json` or `yaml`)")]
    UnsupportedFormat(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O or YAML parsing error occurred while loading the config.
    #[error("config load error: {0}")]
    Load(String),
}
