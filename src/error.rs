//! Client-facing error taxonomy.
//!
//! Every variant maps to one HTTP status and a JSON body of the form
//! `{"error": "<message>"}`. Nothing else about the failure leaves the
//! process; details go to the logs.

use serde_json::{json, Value};
use thiserror::Error;

use crate::dispatcher::HandlerResponse;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No pet matches the requested identifier.
    #[error("Pet not found")]
    NotFound,

    /// `name` or `type` missing or falsy on create.
    #[error("Name and type required")]
    InvalidInput,

    /// The request body claimed to be JSON but did not parse.
    #[error("Malformed JSON body")]
    MalformedBody,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            ApiError::NotFound => 404,
            ApiError::InvalidInput | ApiError::MalformedBody => 400,
        }
    }

    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl From<ApiError> for HandlerResponse {
    fn from(err: ApiError) -> Self {
        HandlerResponse::new(err.status(), err.to_body())
    }
}
