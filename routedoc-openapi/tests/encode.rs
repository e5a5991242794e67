use routedoc_core::{EndpointDescriptor, Registry};
use routedoc_openapi::{encode, DocumentBuilder, EncodeError, Format, OpenApiConfig};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn sample_document() -> routedoc_core::Document {
    let registry = Registry::new();
    registry
        .register(EndpointDescriptor::get("/users").with_response::<Vec<String>>(200))
        .unwrap();
    registry
        .register(EndpointDescriptor::post("/users").with_request::<String>())
        .unwrap();
    DocumentBuilder::new(OpenApiConfig::new("Encode", "1.0.0"))
        .build(&registry.snapshot())
        .unwrap()
}

// ── Format parsing ──────────────────────────────────────────────────────────

#[test]
fn format_from_str() {
    assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
    assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
    assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
    assert_eq!("yml".parse::<Format>().unwrap(), Format::Yaml);
    assert_eq!("".parse::<Format>().unwrap(), Format::Yaml);
}

#[test]
fn unknown_format_is_rejected() {
    let err = "toml".parse::<Format>().unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedFormat(ref f) if f == "toml"));
}

#[test]
fn format_from_extension() {
    assert_eq!(Format::from_extension("json"), Some(Format::Json));
    assert_eq!(Format::from_extension("YML"), Some(Format::Yaml));
    assert_eq!(Format::from_extension("txt"), None);
}

// ── Encoding ────────────────────────────────────────────────────────────────

#[test]
fn json_is_pretty_with_trailing_newline() {
    let encoded = encode(&sample_document(), Format::Json).unwrap();
    assert_eq!(encoded.content_type, "application/json");

    let text = String::from_utf8(encoded.bytes).unwrap();
    assert!(text.starts_with("{\n  \"openapi\": \"3.1.0\""));
    assert!(text.ends_with("}\n"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["info"]["title"], "Encode");
}

#[test]
fn yaml_round_trips_to_the_same_document() {
    let document = sample_document();
    let encoded = encode(&document, Format::Yaml).unwrap();
    assert_eq!(encoded.content_type, "application/yaml");

    let text = String::from_utf8(encoded.bytes).unwrap();
    assert!(text.contains("openapi: 3.1.0"));
    let decoded: routedoc_core::Document = serde_yaml::from_str(&text).unwrap();
    assert_eq!(decoded, document);
}

#[test]
fn encoding_is_byte_identical() {
    for format in [Format::Json, Format::Yaml] {
        let a = encode(&sample_document(), format).unwrap();
        let b = encode(&sample_document(), format).unwrap();
        assert_eq!(a, b);
    }
}
