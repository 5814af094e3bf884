//! Interactive API documentation page.
//!
//! The page is a small HTML shell that loads Swagger UI from a CDN and points
//! it at the served OpenAPI document. It is rendered once at startup.

use crate::router::matches_fixed_path;
use minijinja::{context, Environment};

/// Path the OpenAPI document is served from.
pub const SPEC_URL: &str = "/swagger.json";

/// Path the documentation page is served from.
pub const DOCS_PATH: &str = "/api-docs";

/// Default Swagger UI asset location.
pub const SWAGGER_UI_CDN: &str = "https://unpkg.com/swagger-ui-dist@5";

const TEMPLATE: &str = include_str!("../templates/swagger_ui.html");

/// Render the documentation page.
///
/// # Errors
///
/// Returns an error if the embedded template fails to parse or render.
pub fn render_docs_page(title: &str, spec_url: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    // Registered without an `.html` suffix so values are inserted verbatim
    // into the inline script.
    env.add_template("swagger_ui", TEMPLATE)?;
    env.get_template("swagger_ui")?.render(context! {
        title => title,
        spec_url => spec_url,
        asset_base => SWAGGER_UI_CDN,
    })
}

/// Whether `path` addresses the documentation page, matched like any
/// routed path.
#[must_use]
pub fn is_docs_path(path: &str) -> bool {
    matches_fixed_path(path, DOCS_PATH)
}
