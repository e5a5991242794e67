use std::io::Write;

use routedoc_core::SecurityScheme;
use routedoc_openapi::{ConfigError, OpenApiConfig};

// ── Defaults and builder ────────────────────────────────────────────────────

#[test]
fn default_config() {
    let config = OpenApiConfig::default();
    assert_eq!(config.title, "API");
    assert_eq!(config.version, "1.0.0");
    assert!(config.description.is_none());
    assert!(config.servers.is_empty());
}

#[test]
fn builder_methods() {
    let config = OpenApiConfig::new("My Service", "2.0.0")
        .with_description("desc")
        .with_security_scheme("apiKey", SecurityScheme::api_key_header("X-API-Key"))
        .with_global_security("apiKey", &["read"])
        .with_tag("pets", None);

    assert_eq!(config.title, "My Service");
    assert_eq!(config.description.as_deref(), Some("desc"));
    assert_eq!(
        config.security_schemes["apiKey"].name.as_deref(),
        Some("X-API-Key")
    );
    assert_eq!(config.global_security[0]["apiKey"], vec!["read".to_string()]);
    assert_eq!(config.tags[0].name, "pets");
}

// ── YAML loading ────────────────────────────────────────────────────────────

const YAML: &str = r#"
title: Pet Store
version: 1.2.0
description: Pets and their owners
servers:
  - url: https://api.example.com
    description: production
security_schemes:
  bearerAuth:
    type: http
    scheme: bearer
    bearerFormat: JWT
global_security:
  - bearerAuth: []
tags:
  - name: pets
"#;

#[test]
fn from_yaml_str() {
    let config = OpenApiConfig::from_yaml_str(YAML).unwrap();
    assert_eq!(config.title, "Pet Store");
    assert_eq!(config.version, "1.2.0");
    assert_eq!(config.servers[0].url, "https://api.example.com");
    assert_eq!(config.security_schemes["bearerAuth"], SecurityScheme::bearer("JWT"));
    assert!(config.global_security[0]["bearerAuth"].is_empty());
    assert_eq!(config.tags[0].name, "pets");
}

#[test]
fn missing_keys_use_defaults() {
    let config = OpenApiConfig::from_yaml_str("description: only this\n").unwrap();
    assert_eq!(config.title, "API");
    assert_eq!(config.version, "1.0.0");
    assert_eq!(config.description.as_deref(), Some("only this"));
}

#[test]
fn invalid_yaml_is_a_load_error() {
    let err = OpenApiConfig::from_yaml_str("servers: 12").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(YAML.as_bytes()).unwrap();
    let config = OpenApiConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.title, "Pet Store");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = OpenApiConfig::from_yaml_file(dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.to_string().starts_with("config load error:"));
    assert!(err.to_string().contains("nope.yaml"));
}
