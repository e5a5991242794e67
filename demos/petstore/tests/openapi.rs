use garde::Validate;
use petstore::models::{NewPet, PetStatus};
use routedoc::routedoc_cli::{run_from_args, CliError, DriftKind};
use routedoc::{encode, EndpointDescriptor, Format, RegistryError};
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn document() -> Value {
    let registry = petstore::registry().unwrap();
    let builder = petstore::document_builder(&registry).unwrap();
    let doc = builder.build(&registry.snapshot()).unwrap();
    serde_json::to_value(doc).unwrap()
}

fn new_pet() -> NewPet {
    NewPet {
        name: "Rex".into(),
        status: PetStatus::Available,
        category: Some("dog".into()),
        age_years: 3,
        tags: vec![],
        price: Decimal::new(4999, 2),
    }
}

// ── Document ────────────────────────────────────────────────────────────────

#[test]
fn config_is_loaded_from_yaml() {
    let spec = document();
    assert_eq!(spec["info"]["title"], "Pet Store");
    assert_eq!(spec["servers"].as_array().unwrap().len(), 2);
    assert_eq!(
        spec["components"]["securitySchemes"]["bearerAuth"]["bearerFormat"],
        "JWT"
    );
}

#[test]
fn paths_are_normalized() {
    let spec = document();
    let paths: Vec<&String> = spec["paths"].as_object().unwrap().keys().collect();
    assert_eq!(
        paths,
        ["/health", "/owners/{id}", "/pets", "/pets/{id}", "/pets/{id}/photo"]
    );
}

#[test]
fn components_are_shared() {
    let spec = document();
    let schemas = spec["components"]["schemas"].as_object().unwrap();
    let names: Vec<&String> = schemas.keys().collect();
    assert_eq!(
        names,
        [
            "models_Health",
            "models_NewPet",
            "models_Owner",
            "models_Page_Pet_",
            "models_Pet",
            "models_Problem",
        ]
    );
    assert_eq!(
        spec["paths"]["/pets/{id}"]["get"]["responses"]["200"]["content"]["application/json"]
            ["schema"]["$ref"],
        "#/components/schemas/models_Pet"
    );
}

#[test]
fn pet_schema_follows_serde_attributes() {
    let spec = document();
    let pet = &spec["components"]["schemas"]["models_Pet"];
    assert_eq!(
        pet["required"],
        serde_json::json!(["id", "name", "status", "price", "createdAt"])
    );
    assert!(pet["properties"].get("internal_notes").is_none());
    assert_eq!(pet["properties"]["status"]["type"], "string");
    assert_eq!(pet["properties"]["createdAt"]["format"], "date-time");
    assert_eq!(pet["properties"]["price"]["format"], "decimal");
    assert_eq!(pet["properties"]["price"]["description"], "Adoption fee.");
    assert_eq!(pet["properties"]["name"]["example"], "Rex");
}

#[test]
fn garde_required_marks_optional_field() {
    let spec = document();
    let new_pet = &spec["components"]["schemas"]["models_NewPet"];
    assert_eq!(
        new_pet["required"],
        serde_json::json!(["name", "status", "category", "ageYears", "price"])
    );
    assert_eq!(new_pet["properties"]["category"]["nullable"], true);
}

#[test]
fn inline_contact_has_no_component() {
    let spec = document();
    let owner = &spec["components"]["schemas"]["models_Owner"];
    assert_eq!(owner["properties"]["contact"]["type"], "object");
    assert!(owner["properties"]["contact"]["properties"]["email"].is_object());
}

#[test]
fn created_pet_has_location_header() {
    let spec = document();
    let created = &spec["paths"]["/pets"]["post"]["responses"]["201"];
    assert_eq!(created["headers"]["Location"]["schema"]["format"], "uri");
    assert_eq!(created["headers"]["Location"]["required"], true);
}

#[test]
fn secured_routes_document_auth_failures() {
    let spec = document();
    let delete = &spec["paths"]["/pets/{id}"]["delete"];
    assert_eq!(delete["responses"]["204"]["description"], "No Content");
    assert_eq!(delete["responses"]["401"]["description"], "Unauthorized");
    assert_eq!(delete["responses"]["403"]["description"], "Forbidden");
    assert_eq!(delete["security"][0]["bearerAuth"][0], "pets:write");

    let get = &spec["paths"]["/pets/{id}"]["get"];
    assert!(get["responses"].get("401").is_none());
}

#[test]
fn photo_upload_uses_binary_body() {
    let spec = document();
    let body = &spec["paths"]["/pets/{id}/photo"]["put"]["requestBody"];
    assert_eq!(body["content"]["image/jpeg"]["schema"]["format"], "byte");
}

// ── Hooks ───────────────────────────────────────────────────────────────────

#[test]
fn untagged_routes_are_tagged_by_path() {
    let spec = document();
    assert_eq!(spec["paths"]["/health"]["get"]["tags"][0], "health");
    assert_eq!(spec["paths"]["/owners/{id}"]["get"]["tags"][0], "owners");
    assert_eq!(spec["paths"]["/owners/{id}"]["get"]["deprecated"], true);
}

#[test]
fn tag_catalog_declares_used_tags() {
    let spec = document();
    let tags: Vec<&str> = spec["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(tags, ["pets", "health", "owners"]);
    assert_eq!(spec["tags"][0]["description"], "Everything about your pets");
}

#[test]
fn route_without_summary_is_rejected() {
    let registry = petstore::registry().unwrap();
    let before = registry.len();

    let err = registry
        .register(EndpointDescriptor::get("/pets/:id/owner"))
        .unwrap_err();
    let RegistryError::Rejected { hook, .. } = err;
    assert_eq!(hook, "require-summary");
    assert_eq!(registry.len(), before);
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn new_pet_validation() {
    assert!(new_pet().validate().is_ok());

    let mut missing_category = new_pet();
    missing_category.category = None;
    assert!(missing_category.validate().is_err());

    let mut empty_name = new_pet();
    empty_name.name = String::new();
    assert!(empty_name.validate().is_err());
}

// ── Output ──────────────────────────────────────────────────────────────────

#[test]
fn yaml_output_is_stable() {
    let registry = petstore::registry().unwrap();
    let builder = petstore::document_builder(&registry).unwrap();
    let first = encode(&builder.build(&registry.snapshot()).unwrap(), Format::Yaml).unwrap();
    let second = encode(&builder.build(&registry.snapshot()).unwrap(), Format::Yaml).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cli_generate_and_check() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("openapi.yaml");
    let out_arg = out.display().to_string();
    let registry = petstore::registry().unwrap();
    let builder = petstore::document_builder(&registry).unwrap();

    run_from_args(
        ["petstore-openapi", "generate", "--out", &out_arg],
        &registry,
        &builder,
    )
    .unwrap();
    run_from_args(
        ["petstore-openapi", "check", "--out", &out_arg],
        &registry,
        &builder,
    )
    .unwrap();

    registry
        .register(EndpointDescriptor::get("/pets/:id/vaccinations").with_summary("List vaccinations"))
        .unwrap();
    let err = run_from_args(
        ["petstore-openapi", "check", "--out", &out_arg],
        &registry,
        &builder,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CliError::Drift {
            kind: DriftKind::Changed,
            ..
        }
    ));
}
