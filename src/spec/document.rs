//! OpenAPI 3.0 document generation.
//!
//! The document is assembled from [`RouteMeta`] values rather than read from a
//! file, so whatever the router serves is exactly what gets documented.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::types::{ParameterMeta, RouteMeta};

pub const OPENAPI_VERSION: &str = "3.0.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "Demo Pet API".to_string(),
            version: "1.0.0".to_string(),
            description: "A simple pet store API for APIM demo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Server {
    pub url: String,
    pub description: String,
}

impl Server {
    #[must_use]
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }

    /// `http://localhost:{port}`, the first entry of every document.
    #[must_use]
    pub fn local(port: u16) -> Self {
        Self::new(format!("http://localhost:{port}"), "Local server")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(rename = "in")]
    pub location: &'static str,
    pub name: String,
    pub required: bool,
    pub schema: Value,
}

impl From<&ParameterMeta> for Parameter {
    fn from(p: &ParameterMeta) -> Self {
        Self {
            location: p.location.as_str(),
            name: p.name.clone(),
            required: p.required,
            schema: p.schema.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub summary: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Keyed by status code as a string, as OpenAPI requires
    pub responses: BTreeMap<String, Response>,
}

impl From<&RouteMeta> for Operation {
    fn from(route: &RouteMeta) -> Self {
        let request_body = route.request_body.as_ref().map(|body| RequestBody {
            required: body.required,
            content: json_content(&body.content_type, body.schema.clone()),
        });
        let responses = route
            .responses
            .iter()
            .map(|r| {
                let response = Response {
                    description: r.description.clone(),
                    content: r
                        .schema
                        .clone()
                        .map(|schema| json_content("application/json", schema)),
                };
                (r.status.to_string(), response)
            })
            .collect();
        Self {
            summary: route.summary.clone(),
            parameters: route.parameters.iter().map(Parameter::from).collect(),
            request_body,
            responses,
        }
    }
}

fn json_content(content_type: &str, schema: Value) -> BTreeMap<String, MediaType> {
    BTreeMap::from([(content_type.to_string(), MediaType { schema })])
}

/// Operations of one path keyed by lowercase method name.
pub type PathItem = BTreeMap<String, Operation>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
    pub openapi: &'static str,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: BTreeMap<String, PathItem>,
    pub components: BTreeMap<String, Value>,
    pub tags: Vec<Value>,
}

impl OpenApiDocument {
    #[must_use]
    pub fn from_routes(info: Info, servers: Vec<Server>, routes: &[RouteMeta]) -> Self {
        let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
        for route in routes {
            paths
                .entry(route.path_pattern.clone())
                .or_default()
                .insert(route.method.as_str().to_ascii_lowercase(), Operation::from(route));
        }
        debug!(
            path_count = paths.len(),
            operation_count = routes.len(),
            server_count = servers.len(),
            "OpenAPI document built"
        );
        Self {
            openapi: OPENAPI_VERSION,
            info,
            servers,
            paths,
            components: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths
            .get(path)
            .and_then(|item| item.get(&method.to_ascii_lowercase()))
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
