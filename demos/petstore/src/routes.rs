use routedoc::{
    EndpointDescriptor, HeaderDescriptor, ParameterDescriptor, Registry, RegistryError,
    ResponseDescriptor, SchemaType,
};
use serde_json::json;

use crate::models::{Health, NewPet, Owner, Page, Pet, Problem};

const WRITE_SCOPE: &str = "pets:write";

fn pet_id() -> ParameterDescriptor {
    ParameterDescriptor::path("id")
        .with_description("Pet identifier")
        .with_example(json!("8c5d9a2e-41c7-4d3b-9a0f-6f0e2b7c1d11"))
}

fn not_found() -> ResponseDescriptor {
    ResponseDescriptor::of::<Problem>()
        .with_description("No pet with this id")
        .with_content_type("application/problem+json")
}

pub fn endpoints() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::get("/pets")
            .with_summary("List pets")
            .with_tag("pets")
            .with_parameter(
                ParameterDescriptor::query("limit")
                    .with_type(SchemaType::Integer)
                    .with_description("Maximum number of pets to return")
                    .with_example(json!(20)),
            )
            .with_parameter(ParameterDescriptor::query("cursor"))
            .with_parameter(
                ParameterDescriptor::query("status")
                    .with_description("Filter by adoption status"),
            )
            .with_response_descriptor(
                200,
                ResponseDescriptor::of::<Page<Pet>>().with_header(
                    HeaderDescriptor::new("X-Total-Count")
                        .with_type(SchemaType::Integer)
                        .with_description("Number of pets matching the filter"),
                ),
            ),
        EndpointDescriptor::post("/pets")
            .with_summary("Register a pet")
            .with_tag("pets")
            .with_request::<NewPet>()
            .with_request_example(json!({ "name": "Rex", "status": "available", "ageYears": 3 }))
            .with_response::<Pet>(201)
            .with_response_descriptor(
                422,
                ResponseDescriptor::of::<Problem>().with_description("Validation failed"),
            )
            .with_security("bearerAuth", [WRITE_SCOPE]),
        EndpointDescriptor::get("/pets/:id")
            .with_summary("Fetch a pet")
            .with_tag("pets")
            .with_parameter(pet_id())
            .with_response::<Pet>(200)
            .with_response_descriptor(404, not_found()),
        EndpointDescriptor::put("/pets/:id")
            .with_summary("Replace a pet")
            .with_tag("pets")
            .with_parameter(pet_id())
            .with_request::<NewPet>()
            .with_response::<Pet>(200)
            .with_response_descriptor(404, not_found())
            .with_security("bearerAuth", [WRITE_SCOPE]),
        EndpointDescriptor::delete("/pets/:id")
            .with_summary("Remove a pet")
            .with_tag("pets")
            .with_parameter(pet_id())
            .with_security("bearerAuth", [WRITE_SCOPE]),
        EndpointDescriptor::put("/pets/:id/photo")
            .with_summary("Upload a photo")
            .with_tag("pets")
            .with_parameter(pet_id())
            .with_request_override::<Vec<u8>>("image/jpeg")
            .with_empty_response(204)
            .with_security("bearerAuth", [WRITE_SCOPE]),
        EndpointDescriptor::get("/owners/:id")
            .with_summary("Fetch an owner")
            .with_description("Superseded by the people service.")
            .deprecated()
            .with_parameter(ParameterDescriptor::path("id"))
            .with_response::<Owner>(200),
        EndpointDescriptor::get("/health")
            .with_summary("Liveness check")
            .with_operation_id("health")
            .with_response::<Health>(200),
    ]
}

/// Register every pet store route.
pub fn register_all(registry: &Registry) -> Result<(), RegistryError> {
    for endpoint in endpoints() {
        registry.register(endpoint)?;
    }
    Ok(())
}
