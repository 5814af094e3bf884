//! # Server Module
//!
//! HTTP front end on `may_minihttp`.
//!
//! [`AppService`] answers the built-in endpoints (`/health`, `/swagger.json`,
//! `/api-docs`), then hands everything else to the router and dispatcher.
//! [`HttpServer`] starts it on an address and returns a [`ServerHandle`].

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_body, parse_request, ParsedRequest, RequestBody};
pub use service::{health_endpoint, AppService};
