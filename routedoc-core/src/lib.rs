//! # routedoc-core
//!
//! Data model shared by the routedoc crates:
//!
//! - [`descriptor`]: endpoint, response, parameter and security descriptors
//! - [`types`]: structural type descriptors and the [`Describe`] trait
//! - [`responses`]: the standard [`ErrorResponse`] body
//! - [`registry`]: the thread-safe [`Registry`] of endpoints
//! - [`hooks`]: the extension [`Hook`] trait and its [`Hooks`] set
//! - [`document`]: the OpenAPI document model

pub mod descriptor;
pub mod document;
pub mod error;
pub mod hooks;
pub mod prelude;
pub mod registry;
pub mod responses;
pub mod types;

pub use descriptor::{
    default_operation_id, default_success_status, EndpointDescriptor, HeaderDescriptor,
    ParamLocation, ParameterDescriptor, ResponseDescriptor, SecurityRequirement,
};
pub use document::{
    Components, Document, Header, Info, MediaType, Operation, Parameter, PathItem, RequestBody,
    Response, Schema, SchemaType, SecurityRequirementMap, SecurityScheme, Server, Tag,
    COMPONENT_REF_PREFIX, OPENAPI_VERSION,
};
pub use error::{HookError, HookFailure, RegistryError, Result};
pub use hooks::{FnHook, Hook, HookPoint, Hooks};
pub use registry::Registry;
pub use responses::ErrorResponse;
pub use types::{
    short_type_name, Describe, FieldSpec, Float, Integer, StructDescriptor, TypeDescriptor,
    TypeKind, TypeRef,
};

pub use http::Method;
