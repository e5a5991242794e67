//! The standard error body and the descriptions used by the error-response
//! helpers on [`EndpointDescriptor`](crate::EndpointDescriptor).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Describe, FieldSpec, StructDescriptor, TypeDescriptor, TypeKind, TypeRef};

pub const BAD_REQUEST: &str = "Bad Request - Invalid input";
pub const UNAUTHORIZED: &str = "Unauthorized - Authentication required";
pub const FORBIDDEN: &str = "Forbidden - Insufficient permissions";
pub const NOT_FOUND: &str = "Not Found - Resource does not exist";
pub const CONFLICT: &str = "Conflict - Resource already exists";
pub const UNPROCESSABLE_ENTITY: &str = "Unprocessable Entity - Validation failed";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const SERVICE_UNAVAILABLE: &str = "Service Unavailable - Temporary outage";

/// Body documented for error responses unless a custom model is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl Describe for ErrorResponse {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::of::<Self>(TypeKind::Struct(
            StructDescriptor::new("ErrorResponse", module_path!())
                .field(
                    FieldSpec::new("code", TypeRef::of::<String>())
                        .description("Error code identifier"),
                )
                .field(
                    FieldSpec::new("message", TypeRef::of::<String>())
                        .description("Human-readable error message"),
                )
                .field(
                    FieldSpec::new("details", TypeRef::of::<Option<Value>>())
                        .omit_empty()
                        .description("Additional error details"),
                ),
        ))
    }
}

/// `description`, or `default` when it is empty.
pub(crate) fn or_default(description: &str, default: &str) -> String {
    if description.is_empty() {
        default.to_string()
    } else {
        description.to_string()
    }
}
