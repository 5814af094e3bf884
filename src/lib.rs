//! # Pet Registry
//!
//! An in-memory pet registry served over HTTP on the `may` coroutine runtime,
//! with an OpenAPI 3.0 document and a Swagger UI page generated from the same
//! route descriptions the router uses.
//!
//! ## Architecture
//!
//! - **[`spec`]** - Route descriptions and OpenAPI document generation
//! - **[`router`]** - Path matching and route resolution using regex-based matchers
//! - **[`dispatcher`]** - Coroutine-based request handler dispatch
//! - **[`middleware`]** - Hooks around handler execution (request tracing)
//! - **[`pets`]** - The pet model, registry and handlers
//! - **[`server`]** - HTTP server built on `may_minihttp`
//! - **[`docs`]** - Swagger UI page
//! - **[`runtime_config`]**, **[`telemetry`]**, **[`cli`]** - Process setup
//!
//! ## Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Service as server::AppService
//!     participant Router as router::Router
//!     participant Dispatcher as dispatcher::Dispatcher
//!     participant Handler as pets handler coroutine
//!     participant Registry as pets::PetRegistry
//!
//!     Client->>Service: GET /pets/1
//!     Service->>Router: route(GET, "/pets/1")
//!     Router-->>Service: RouteMatch { handler: get_pet, id: "1" }
//!     Service->>Dispatcher: dispatch(route_match, body, headers)
//!     Dispatcher->>Handler: HandlerRequest (mpsc)
//!     Handler->>Registry: find(1)
//!     Registry-->>Handler: Pet
//!     Handler-->>Dispatcher: HandlerResponse (reply channel)
//!     Dispatcher-->>Service: HandlerResponse
//!     Service-->>Client: 200 {"id":1,"name":"Fluffy","type":"Cat"}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pet_registry::app::build_service;
//! use pet_registry::pets::PetRegistry;
//! use pet_registry::runtime_config::RuntimeConfig;
//! use pet_registry::server::HttpServer;
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = RuntimeConfig::from_env();
//!     may::config().set_stack_size(config.stack_size);
//!
//!     let service = build_service(&config, Arc::new(PetRegistry::seeded()))?;
//!     let handle = HttpServer(service).start(config.bind_addr().as_str())?;
//!     handle.join().map_err(|e| anyhow::anyhow!("{e:?}"))?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod dispatcher;
pub mod docs;
pub mod error;
pub mod ids;
pub mod middleware;
pub mod pets;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod spec;
pub mod telemetry;

pub use error::ApiError;
pub use pets::{Pet, PetRegistry};
