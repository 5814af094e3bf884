//! # Spec Module
//!
//! Route descriptions and the OpenAPI document generated from them.
//!
//! - [`RouteMeta`] describes one operation: method, path pattern, handler
//!   name, parameters, request body and responses
//! - [`pet_routes`] is the hand-written catalogue of the pet operations
//! - [`OpenApiDocument`] renders a list of routes as an OpenAPI 3.0 document

mod catalog;
mod document;
mod types;

pub use catalog::{pet_routes, schemas, ADD_PET, GET_PET, LIST_PETS};
pub use document::{
    Info, MediaType, OpenApiDocument, Operation, Parameter, PathItem, RequestBody, Response,
    Server, OPENAPI_VERSION,
};
pub use types::{ParameterLocation, ParameterMeta, RequestBodyMeta, ResponseMeta, RouteMeta};
