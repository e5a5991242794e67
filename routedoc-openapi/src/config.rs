use std::collections::BTreeMap;
use std::path::Path;

use routedoc_core::{Document, Info, SecurityRequirementMap, SecurityScheme, Server, Tag};
use serde::Deserialize;

use crate::error::ConfigError;

/// Document-level settings for the generated OpenAPI document.
///
/// Built in code:
///
/// ```
/// use routedoc_openapi::OpenApiConfig;
/// use routedoc_core::{SecurityScheme, Server};
///
/// let config = OpenApiConfig::new("Pet Store", "1.2.0")
///     .with_description("Pets and their owners")
///     .with_server(Server::new("https://api.example.com"))
///     .with_security_scheme("bearerAuth", SecurityScheme::bearer("JWT"));
/// assert_eq!(config.title, "Pet Store");
/// ```
///
/// or loaded from YAML with [`OpenApiConfig::from_yaml_file`]:
///
/// ```yaml
/// title: Pet Store
/// version: 1.2.0
/// servers:
///   - url: https://api.example.com
/// security_schemes:
///   bearerAuth:
///     type: http
///     scheme: bearer
///     bearerFormat: JWT
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub servers: Vec<Server>,
    pub security_schemes: BTreeMap<String, SecurityScheme>,
    pub global_security: Vec<SecurityRequirementMap>,
    pub tags: Vec<Tag>,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            servers: Vec::new(),
            security_schemes: BTreeMap::new(),
            global_security: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_security_scheme(mut self, name: &str, scheme: SecurityScheme) -> Self {
        self.security_schemes.insert(name.to_string(), scheme);
        self
    }

    /// Require `scheme` (with `scopes`) on every operation by default.
    pub fn with_global_security(mut self, scheme: &str, scopes: &[&str]) -> Self {
        let mut requirement = SecurityRequirementMap::new();
        requirement.insert(
            scheme.to_string(),
            scopes.iter().map(|s| s.to_string()).collect(),
        );
        self.global_security.push(requirement);
        self
    }

    pub fn with_tag(mut self, name: &str, description: Option<&str>) -> Self {
        self.tags.push(Tag {
            name: name.to_string(),
            description: description.map(str::to_string),
        });
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Load(e.to_string()))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }

    /// An empty document carrying this configuration.
    pub(crate) fn document_skeleton(&self) -> Document {
        let mut doc = Document::new(Info {
            title: self.title.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
        });
        doc.servers = self.servers.clone();
        doc.components.security_schemes = self.security_schemes.clone();
        doc.security = self.global_security.clone();
        doc.tags = self.tags.clone();
        doc
    }
}
