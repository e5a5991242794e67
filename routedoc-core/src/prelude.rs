//! Everything a descriptor producer needs with a single `use`.
//!
//! ```ignore
//! use routedoc_core::prelude::*;
//! ```

pub use crate::descriptor::{
    EndpointDescriptor, HeaderDescriptor, ParamLocation, ParameterDescriptor, ResponseDescriptor,
};
pub use crate::document::{Document, Schema, SchemaType, SecurityScheme, Server};
pub use crate::error::{HookError, RegistryError};
pub use crate::hooks::{FnHook, Hook, Hooks};
pub use crate::registry::Registry;
pub use crate::responses::ErrorResponse;
pub use crate::types::{Describe, TypeDescriptor, TypeKind, TypeRef};
pub use http::Method;
