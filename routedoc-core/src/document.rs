//! The OpenAPI 3.1 document model.
//!
//! Every map is a `BTreeMap` so that serializing the same document twice
//! yields identical bytes.

use std::collections::BTreeMap;

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::ParamLocation;

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Prefix of local component references.
pub const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// One security requirement object: scheme name to required scopes.
pub type SecurityRequirementMap = BTreeMap<String, Vec<String>>;

/// The assembled API description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirementMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Document {
    pub fn new(info: Info) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            servers: Vec::new(),
            paths: BTreeMap::new(),
            components: Components::default(),
            security: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Look up an operation by normalized path and method.
    pub fn operation(&self, path: &str, method: &Method) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }

    /// Number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.security_schemes.is_empty()
    }
}

/// A security scheme definition (`components.securitySchemes` entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<String>,
}

impl SecurityScheme {
    fn of_type(scheme_type: &str) -> Self {
        Self {
            scheme_type: scheme_type.to_string(),
            description: None,
            name: None,
            location: None,
            scheme: None,
            bearer_format: None,
            open_id_connect_url: None,
        }
    }

    /// HTTP bearer authentication, e.g. `bearer("JWT")`.
    pub fn bearer(format: impl Into<String>) -> Self {
        Self {
            scheme: Some("bearer".to_string()),
            bearer_format: Some(format.into()),
            ..Self::of_type("http")
        }
    }

    pub fn basic() -> Self {
        Self {
            scheme: Some("basic".to_string()),
            ..Self::of_type("http")
        }
    }

    /// API key carried in the given header.
    pub fn api_key_header(header: impl Into<String>) -> Self {
        Self {
            name: Some(header.into()),
            location: Some("header".to_string()),
            ..Self::of_type("apiKey")
        }
    }

    pub fn open_id_connect(url: impl Into<String>) -> Self {
        Self {
            open_id_connect_url: Some(url.into()),
            ..Self::of_type("openIdConnect")
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// The operation slot for `method`, or `None` when OpenAPI has no slot
    /// for it (e.g. `CONNECT` or extension methods).
    pub fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Operation>> {
        let slot = match *method {
            Method::GET => &mut self.get,
            Method::PUT => &mut self.put,
            Method::POST => &mut self.post,
            Method::DELETE => &mut self.delete,
            Method::OPTIONS => &mut self.options,
            Method::HEAD => &mut self.head,
            Method::PATCH => &mut self.patch,
            Method::TRACE => &mut self.trace,
            _ => return None,
        };
        Some(slot)
    }

    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            Method::OPTIONS => self.options.as_ref(),
            Method::HEAD => self.head.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::TRACE => self.trace.as_ref(),
            _ => None,
        }
    }

    /// Present operations in serialization order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(name, op)| op.as_ref().map(|op| (name, op)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirementMap>>,
}

impl Operation {
    pub fn response(&self, status: u16) -> Option<&Response> {
        self.responses.get(&status.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    pub schema: Schema,
}

/// Primitive JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

/// A schema node: primitive, object, array, map, or a component reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Specification extensions (`x-...` keys).
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of_type(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::of_type(SchemaType::Integer)
    }

    pub fn number() -> Self {
        Self::of_type(SchemaType::Number)
    }

    pub fn boolean() -> Self {
        Self::of_type(SchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self::of_type(SchemaType::Object)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    /// Object with string keys and values of `value`.
    pub fn map(value: Schema) -> Self {
        Self {
            additional_properties: Some(Box::new(value)),
            ..Self::object()
        }
    }

    /// Reference to a named component.
    pub fn reference(component: &str) -> Self {
        Self {
            reference: Some(format!("{COMPONENT_REF_PREFIX}{component}")),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Component name when this is a local component reference.
    pub fn component_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(COMPONENT_REF_PREFIX))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
