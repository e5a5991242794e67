use std::collections::BTreeMap;
use std::sync::Arc;

use http::Method;
use routedoc_core::{
    Document, EndpointDescriptor, Header, HeaderDescriptor, Hooks, MediaType, Operation,
    Parameter, RequestBody, Response, ResponseDescriptor, Schema, SchemaType,
    SecurityRequirementMap, TypeRef,
};
use tracing::{info, warn};

use crate::config::OpenApiConfig;
use crate::error::{BuildError, Result};
use crate::path::normalize_path;
use crate::schema::SchemaBuilder;

const DEFAULT_CONTENT_TYPE: &str = "application/json";
const LOCATION_HEADER: &str = "Location";

/// Assembles a [`Document`] from endpoint descriptors.
///
/// Every call to [`build`](DocumentBuilder::build) starts from a fresh
/// schema cache, so a builder can be reused and shared between threads.
///
/// ```ignore
/// let builder = DocumentBuilder::new(OpenApiConfig::new("Pet Store", "1.0.0"))
///     .with_hooks(registry.hooks().clone());
/// let document = builder.build(&registry.snapshot())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    config: OpenApiConfig,
    hooks: Arc<Hooks>,
}

impl DocumentBuilder {
    pub fn new(config: OpenApiConfig) -> Self {
        Self {
            config,
            hooks: Arc::new(Hooks::new()),
        }
    }

    /// Run `hooks` for schema generation and the finished document.
    pub fn with_hooks(mut self, hooks: Arc<Hooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut OpenApiConfig {
        &mut self.config
    }

    /// Build the document. Any error aborts the whole build.
    pub fn build(&self, endpoints: &[EndpointDescriptor]) -> Result<Document> {
        let mut schemas = SchemaBuilder::with_hooks(self.hooks.clone());
        let mut doc = self.config.document_skeleton();

        let mut entries: Vec<(String, &EndpointDescriptor)> = endpoints
            .iter()
            .map(|endpoint| (normalize_path(&endpoint.path), endpoint))
            .collect();
        entries.sort_by(|(a_path, a), (b_path, b)| {
            a_path
                .cmp(b_path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });

        for (path, endpoint) in entries {
            let item = doc.paths.entry(path.clone()).or_default();
            let Some(slot) = item.slot_mut(&endpoint.method) else {
                return Err(BuildError::UnsupportedMethod {
                    method: endpoint.method.to_string(),
                    path,
                });
            };
            // Checked before the operation is built so no schema is generated
            // for it.
            if slot.is_some() {
                warn!(method = %endpoint.method, path = %path, "duplicate operation");
                return Err(BuildError::DuplicateOperation {
                    method: endpoint.method.to_string(),
                    path,
                });
            }
            *slot = Some(build_operation(&mut schemas, endpoint)?);
        }

        doc.components.schemas = schemas.into_components();
        self.hooks.run_spec_build(&mut doc)?;

        info!(
            routes = endpoints.len(),
            schemas = doc.components.schemas.len(),
            "OpenAPI document built"
        );
        Ok(doc)
    }
}

fn build_operation(schemas: &mut SchemaBuilder, endpoint: &EndpointDescriptor) -> Result<Operation> {
    let mut op = Operation {
        tags: endpoint.tags.clone(),
        summary: endpoint.summary.clone(),
        description: endpoint.description.clone(),
        operation_id: (!endpoint.operation_id.is_empty()).then(|| endpoint.operation_id.clone()),
        deprecated: endpoint.deprecated,
        ..Operation::default()
    };

    let mut params = endpoint.parameters.clone();
    params.sort_by(|a, b| {
        a.location
            .as_str()
            .cmp(b.location.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });
    op.parameters = params
        .into_iter()
        .map(|p| Parameter {
            name: p.name,
            location: p.location,
            description: p.description,
            required: p.required,
            schema: Schema::of_type(p.schema_type.unwrap_or(SchemaType::String)),
            example: p.example,
        })
        .collect();

    if !endpoint.security.is_empty() {
        op.security = Some(
            endpoint
                .security
                .iter()
                .map(|requirement| {
                    let mut map = SecurityRequirementMap::new();
                    map.insert(requirement.name.clone(), requirement.scopes.clone());
                    map
                })
                .collect(),
        );
    }

    op.request_body = build_request_body(schemas, endpoint)?;

    for (status, response) in &endpoint.responses {
        op.responses
            .insert(status.to_string(), build_response(schemas, *status, response)?);
    }

    add_dx_defaults(endpoint, &mut op);
    Ok(op)
}

fn build_request_body(
    schemas: &mut SchemaBuilder,
    endpoint: &EndpointDescriptor,
) -> Result<Option<RequestBody>> {
    let Some(schema) = schema_from_types(
        schemas,
        endpoint.explicit_request_type,
        endpoint.request_type,
    )?
    else {
        return Ok(None);
    };

    let content_type = endpoint
        .request_content_type
        .clone()
        .filter(|ct| !ct.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    let mut content = BTreeMap::new();
    content.insert(
        content_type,
        MediaType {
            schema: Some(schema),
            example: endpoint.request_example.clone(),
        },
    );

    Ok(Some(RequestBody {
        description: None,
        // A documented body type is always required.
        required: true,
        content,
    }))
}

fn build_response(
    schemas: &mut SchemaBuilder,
    status: u16,
    response: &ResponseDescriptor,
) -> Result<Response> {
    let description = response
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| default_response_description(status).to_string());
    let mut out = Response::new(description);

    if let Some(schema) =
        schema_from_types(schemas, response.explicit_model_type, response.model_type)?
    {
        let content_type = response
            .content_type
            .clone()
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        out.content.insert(
            content_type,
            MediaType {
                schema: Some(schema),
                example: response.example.clone(),
            },
        );
    }

    for header in &response.headers {
        out.headers.insert(header.name.clone(), header_object(header));
    }
    Ok(out)
}

fn header_object(header: &HeaderDescriptor) -> Header {
    Header {
        description: header.description.clone(),
        required: header.required,
        schema: Schema::of_type(header.schema_type.unwrap_or(SchemaType::String)),
    }
}

/// The explicit override wins over the inferred type.
fn schema_from_types(
    schemas: &mut SchemaBuilder,
    explicit: Option<TypeRef>,
    inferred: Option<TypeRef>,
) -> Result<Option<Schema>> {
    match explicit.or(inferred) {
        Some(ty) => schemas.schema_for_ref(ty).map(Some),
        None => Ok(None),
    }
}

fn add_dx_defaults(endpoint: &EndpointDescriptor, op: &mut Operation) {
    if endpoint.method == Method::POST {
        if let Some(created) = op.responses.get_mut("201") {
            let has_location = created
                .headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case(LOCATION_HEADER));
            if !has_location {
                created.headers.insert(
                    LOCATION_HEADER.to_string(),
                    Header {
                        description: Some("URI of the newly created resource".to_string()),
                        required: true,
                        schema: Schema::string().with_format("uri"),
                    },
                );
            }
        }
    }

    if !endpoint.security.is_empty() {
        ensure_response(op, 401, "Unauthorized");
        ensure_response(op, 403, "Forbidden");
    }
}

fn ensure_response(op: &mut Operation, status: u16, description: &str) {
    op.responses
        .entry(status.to_string())
        .or_insert_with(|| Response::new(description));
}

/// Description used when a response does not provide one.
pub fn default_response_description(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}
