//! Assembly of the running service from configuration.

use crate::dispatcher::Dispatcher;
use crate::docs::{render_docs_page, SPEC_URL};
use crate::middleware::TracingMiddleware;
use crate::pets::{register_all, PetRegistry};
use crate::router::Router;
use crate::runtime_config::RuntimeConfig;
use crate::server::AppService;
use crate::spec::{pet_routes, Info, OpenApiDocument, Server};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Servers advertised in the OpenAPI document: local first, then any public
/// URLs from configuration.
#[must_use]
pub fn advertised_servers(config: &RuntimeConfig) -> Vec<Server> {
    std::iter::once(Server::local(config.port))
        .chain(
            config
                .public_servers
                .iter()
                .map(|url| Server::new(url.clone(), "Public server")),
        )
        .collect()
}

/// OpenAPI document for the pet routes.
#[must_use]
pub fn openapi_document(config: &RuntimeConfig) -> OpenApiDocument {
    OpenApiDocument::from_routes(Info::default(), advertised_servers(config), &pet_routes())
}

/// Build the HTTP service over `registry`.
///
/// Spawns one handler coroutine per operation, so the `may` runtime should be
/// configured before calling this.
///
/// # Errors
///
/// Fails if a route pattern does not compile or the OpenAPI document or docs
/// page cannot be rendered.
pub fn build_service(config: &RuntimeConfig, registry: Arc<PetRegistry>) -> Result<AppService> {
    let router = Router::new(pet_routes()).context("Failed to compile routes")?;

    let mut dispatcher = Dispatcher::new().with_stack_size(config.stack_size);
    dispatcher.add_middleware(Arc::new(TracingMiddleware));
    // SAFETY: handlers only touch the shared registry through its lock.
    unsafe {
        register_all(&mut dispatcher, &registry);
    }

    let document = openapi_document(config);
    let openapi_json = document
        .to_json_bytes()
        .context("Failed to serialize OpenAPI document")?;
    let docs_page = render_docs_page(&document.info.title, SPEC_URL)
        .context("Failed to render API docs page")?;

    info!(
        handlers = dispatcher.handlers.len(),
        pets = registry.len(),
        stack_size = config.stack_size,
        "Service assembled"
    );

    Ok(AppService::new(
        Arc::new(router),
        Arc::new(dispatcher),
        openapi_json,
        docs_page,
    ))
}
