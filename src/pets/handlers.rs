//! Handlers for the pet operations.
//!
//! Each handler turns a [`HandlerRequest`] into a response against a shared
//! [`PetRegistry`]. Client errors come back as [`ApiError`] and are rendered
//! by the registration wrapper.

use std::sync::Arc;

use tracing::debug;

use super::input::{parse_lenient_id, parse_new_pet};
use super::registry::PetRegistry;
use crate::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
use crate::error::ApiError;
use crate::spec::{ADD_PET, GET_PET, LIST_PETS};

pub type PetHandler = fn(&PetRegistry, &HandlerRequest) -> Result<HandlerResponse, ApiError>;

/// `GET /pets`
pub fn list_pets(registry: &PetRegistry, _req: &HandlerRequest) -> Result<HandlerResponse, ApiError> {
    Ok(HandlerResponse::json(200, &registry.list()))
}

/// `GET /pets/{id}`
pub fn get_pet(registry: &PetRegistry, req: &HandlerRequest) -> Result<HandlerResponse, ApiError> {
    let token = req.get_path_param("id").unwrap_or_default();
    let id = parse_lenient_id(token);
    debug!(request_id = %req.request_id, token = %token, parsed_id = ?id, "Pet id parsed");

    let pet = id.and_then(|id| registry.find(id)).ok_or(ApiError::NotFound)?;
    Ok(HandlerResponse::json(200, &pet))
}

/// `POST /pets`
pub fn add_pet(registry: &PetRegistry, req: &HandlerRequest) -> Result<HandlerResponse, ApiError> {
    let new_pet = parse_new_pet(req.body.as_ref())?;
    let pet = registry.create(new_pet);
    Ok(HandlerResponse::json(201, &pet))
}

/// Handler table keyed by the names used in the route catalogue.
#[must_use]
pub fn pet_handlers() -> [(&'static str, PetHandler); 3] {
    [(LIST_PETS, list_pets), (GET_PET, get_pet), (ADD_PET, add_pet)]
}

/// Run `handler` and send its response on the request's reply channel.
pub fn respond(handler: PetHandler, registry: &PetRegistry, req: &HandlerRequest) {
    let response = handler(registry, req).unwrap_or_else(HandlerResponse::from);
    let _ = req.reply_tx.send(response);
}

/// Register every pet handler with `dispatcher`, all sharing `registry`.
///
/// # Safety
///
/// Spawns coroutines through [`Dispatcher::register_handler`]; the same
/// contract applies.
pub unsafe fn register_all(dispatcher: &mut Dispatcher, registry: &Arc<PetRegistry>) {
    for (name, handler) in pet_handlers() {
        let registry = Arc::clone(registry);
        // SAFETY: forwarded from this function's contract.
        unsafe {
            dispatcher.register_handler(name, move |req: HandlerRequest| {
                respond(handler, &registry, &req);
            });
        }
    }
}
