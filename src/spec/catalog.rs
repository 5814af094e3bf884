//! Hand-written description of the pet operations.
//!
//! This list is the single source for both routing and the published
//! OpenAPI document.

use http::Method;
use serde_json::{json, Value};

use super::types::RouteMeta;

pub const LIST_PETS: &str = "list_pets";
pub const GET_PET: &str = "get_pet";
pub const ADD_PET: &str = "add_pet";

/// JSON schemas shared by the pet operations.
pub mod schemas {
    use super::{json, Value};

    #[must_use]
    pub fn pet() -> Value {
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" },
                "type": { "type": "string" }
            }
        })
    }

    #[must_use]
    pub fn pet_list() -> Value {
        json!({ "type": "array", "items": pet() })
    }

    #[must_use]
    pub fn new_pet() -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "type": { "type": "string" }
            }
        })
    }

    #[must_use]
    pub fn error() -> Value {
        json!({
            "type": "object",
            "properties": {
                "error": { "type": "string" }
            }
        })
    }
}

/// The three pet operations: list, get by id, create.
#[must_use]
pub fn pet_routes() -> Vec<RouteMeta> {
    vec![
        RouteMeta::new(Method::GET, "/pets", LIST_PETS)
            .summary("Get all pets")
            .response(200, "List of pets", Some(schemas::pet_list())),
        RouteMeta::new(Method::GET, "/pets/{id}", GET_PET)
            .summary("Get a pet by ID")
            .path_param("id", json!({ "type": "integer" }))
            .response(200, "Pet details", Some(schemas::pet()))
            .response(404, "Pet not found", Some(schemas::error())),
        RouteMeta::new(Method::POST, "/pets", ADD_PET)
            .summary("Add a new pet")
            .json_body(true, schemas::new_pet())
            .response(201, "Pet created", Some(schemas::pet()))
            .response(400, "Name and type required", Some(schemas::error())),
    ]
}
