use thiserror::Error;

use crate::hooks::HookPoint;

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Error returned by a hook callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for HookError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HookError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A hook error tagged with the hook that raised it and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hook `{hook}` failed during {point}: {source}")]
pub struct HookFailure {
    pub hook: String,
    pub point: HookPoint,
    #[source]
    pub source: HookError,
}

/// Errors raised by [`Registry`](crate::Registry).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A route-registration hook refused the endpoint. Nothing was stored.
    #[error("registration of {method} {path} rejected by hook `{hook}`: {source}")]
    Rejected {
        hook: String,
        method: String,
        path: String,
        #[source]
        source: HookError,
    },
}
