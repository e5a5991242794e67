//! Endpoint descriptors: the declarative record of one route.

use std::collections::BTreeMap;

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::SchemaType;
use crate::responses::{self, ErrorResponse};
use crate::types::{Describe, TypeRef};

/// Metadata about a single endpoint, as supplied by a descriptor producer.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub method: Method,
    pub path: String,
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,

    pub request_type: Option<TypeRef>,
    pub request_content_type: Option<String>,
    pub explicit_request_type: Option<TypeRef>,
    pub request_example: Option<Value>,
    pub body_required: bool,

    /// Responses keyed by HTTP status code.
    pub responses: BTreeMap<u16, ResponseDescriptor>,
    pub success_status: Option<u16>,

    pub security: Vec<SecurityRequirement>,
    pub parameters: Vec<ParameterDescriptor>,
}

impl EndpointDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            operation_id: String::new(),
            summary: None,
            description: None,
            tags: Vec::new(),
            deprecated: false,
            request_type: None,
            request_content_type: None,
            explicit_request_type: None,
            request_example: None,
            body_required: false,
            responses: BTreeMap::new(),
            success_status: None,
            security: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = id.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Set the inferred request body type.
    pub fn with_request<T: Describe>(mut self) -> Self {
        self.request_type = Some(TypeRef::of::<T>());
        self
    }

    /// Override the request schema, taking precedence over the inferred type.
    pub fn with_request_override<T: Describe>(mut self, content_type: impl Into<String>) -> Self {
        self.explicit_request_type = Some(TypeRef::of::<T>());
        let content_type = content_type.into();
        if !content_type.is_empty() {
            self.request_content_type = Some(content_type);
        }
        self
    }

    pub fn with_request_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.request_content_type = Some(content_type.into());
        self
    }

    pub fn with_request_example(mut self, example: Value) -> Self {
        self.request_example = Some(example);
        self
    }

    pub fn with_body_required(mut self, required: bool) -> Self {
        self.body_required = required;
        self
    }

    /// Register a response whose body is `T`.
    pub fn with_response<T: Describe>(self, status: u16) -> Self {
        self.with_response_descriptor(status, ResponseDescriptor::of::<T>())
    }

    /// Register a response, replacing any existing one for the same status.
    pub fn with_response_descriptor(mut self, status: u16, response: ResponseDescriptor) -> Self {
        self.responses.insert(status, response);
        self
    }

    /// Register a response without a body.
    pub fn with_empty_response(self, status: u16) -> Self {
        self.with_response_descriptor(status, ResponseDescriptor::new())
    }

    /// Override the default success status and make sure it has a response.
    pub fn with_success_status(mut self, status: u16) -> Self {
        if status >= 100 {
            self.success_status = Some(status);
            self.ensure_response(status, None);
        }
        self
    }

    pub fn with_security<I, S>(mut self, scheme: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.security.push(SecurityRequirement {
            name: scheme.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Populate the response for `status` if it does not exist yet. An
    /// existing entry only gains a model type when it had none.
    pub fn ensure_response(&mut self, status: u16, model: Option<TypeRef>) {
        let response = self.responses.entry(status).or_default();
        if response.model_type.is_none() {
            response.model_type = model;
        }
    }

    /// Document an error status with the [`ErrorResponse`] body. An existing
    /// response keeps its description and only gains the model when it had
    /// none.
    pub fn with_error_response(self, status: u16, description: &str) -> Self {
        self.with_custom_error_response::<ErrorResponse>(status, description)
    }

    /// Document an error status with a caller-chosen body type.
    pub fn with_custom_error_response<T: Describe>(
        mut self,
        status: u16,
        description: &str,
    ) -> Self {
        self.ensure_response(status, Some(TypeRef::of::<T>()));
        if let Some(response) = self.responses.get_mut(&status) {
            if response.description.is_none() && !description.is_empty() {
                response.description = Some(description.to_string());
            }
        }
        self
    }

    /// 400, 422 and 500 with their default descriptions.
    pub fn with_standard_errors(self) -> Self {
        self.with_error_response(400, responses::BAD_REQUEST)
            .with_error_response(422, responses::UNPROCESSABLE_ENTITY)
            .with_error_response(500, responses::INTERNAL_SERVER_ERROR)
    }

    pub fn with_bad_request_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::BAD_REQUEST);
        self.with_error_response(400, &description)
    }

    pub fn with_unauthorized_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::UNAUTHORIZED);
        self.with_error_response(401, &description)
    }

    pub fn with_forbidden_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::FORBIDDEN);
        self.with_error_response(403, &description)
    }

    pub fn with_not_found_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::NOT_FOUND);
        self.with_error_response(404, &description)
    }

    pub fn with_conflict_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::CONFLICT);
        self.with_error_response(409, &description)
    }

    pub fn with_validation_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::UNPROCESSABLE_ENTITY);
        self.with_error_response(422, &description)
    }

    pub fn with_internal_server_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::INTERNAL_SERVER_ERROR);
        self.with_error_response(500, &description)
    }

    pub fn with_service_unavailable_error(self, description: &str) -> Self {
        let description = responses::or_default(description, responses::SERVICE_UNAVAILABLE);
        self.with_error_response(503, &description)
    }

    /// The success status, explicit or derived from the method.
    pub fn effective_success_status(&self) -> u16 {
        self.success_status
            .unwrap_or_else(|| default_success_status(&self.method))
    }

    /// Fill fields the producer left unset.
    pub fn apply_defaults(&mut self) {
        if self.success_status.is_none() {
            self.success_status = Some(default_success_status(&self.method));
        }
        if self.operation_id.is_empty() {
            self.operation_id = default_operation_id(&self.method, &self.path);
        }
        if self.responses.is_empty() {
            let status = self.effective_success_status();
            self.ensure_response(status, None);
        }
    }
}

/// A documented response for one status code.
#[derive(Debug, Clone, Default)]
pub struct ResponseDescriptor {
    pub model_type: Option<TypeRef>,
    pub explicit_model_type: Option<TypeRef>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub example: Option<Value>,
    pub headers: Vec<HeaderDescriptor>,
}

impl ResponseDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of<T: Describe>() -> Self {
        Self {
            model_type: Some(TypeRef::of::<T>()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_explicit_model<T: Describe>(mut self) -> Self {
        self.explicit_model_type = Some(TypeRef::of::<T>());
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_header(mut self, header: HeaderDescriptor) -> Self {
        self.headers.push(header);
        self
    }
}

/// A documented response header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub schema_type: Option<SchemaType>,
    pub required: bool,
}

impl HeaderDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema_type: None,
            required: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type(mut self, schema_type: SchemaType) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Where a parameter is located in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
        }
    }
}

/// Metadata about a path, query or header parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParamLocation,
    pub description: Option<String>,
    pub required: bool,
    pub schema_type: Option<SchemaType>,
    pub example: Option<Value>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: location == ParamLocation::Path,
            schema_type: None,
            example: None,
        }
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Path)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Query)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParamLocation::Header)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_type(mut self, schema_type: SchemaType) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// A reference to a security scheme by name, with the scopes it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityRequirement {
    pub name: String,
    pub scopes: Vec<String>,
}

// ── Derived defaults ────────────────────────────────────────────────────────

/// POST creates, DELETE has nothing to return, everything else is OK.
pub fn default_success_status(method: &Method) -> u16 {
    match *method {
        Method::POST => 201,
        Method::DELETE => 204,
        _ => 200,
    }
}

/// Stable operation id built from method and path:
/// `GET /users/{id}/posts` becomes `get_users_id_posts`.
pub fn default_operation_id(method: &Method, path: &str) -> String {
    let segments: Vec<String> = path
        .trim_matches('/')
        .split('/')
        .map(|segment| {
            segment
                .trim_start_matches(':')
                .chars()
                .filter(|c| *c != '{' && *c != '}')
                .collect()
        })
        .collect();
    let mut normalized = segments.join("_");
    if normalized.is_empty() {
        normalized = "root".to_string();
    }
    format!("{}_{}", method.as_str().to_lowercase(), normalized)
}
