use http::Method;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    /// Value of the OpenAPI `in` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyMeta {
    pub required: bool,
    pub content_type: String,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    pub status: u16,
    pub description: String,
    /// JSON schema of an `application/json` body, if the response has one
    pub schema: Option<Value>,
}

/// Machine-readable description of one operation.
///
/// The router matches on `method` + `path_pattern` and dispatches to
/// `handler_name`; the OpenAPI builder renders the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMeta {
    pub method: Method,
    /// OpenAPI style pattern, e.g. `/pets/{id}`
    pub path_pattern: String,
    pub handler_name: String,
    pub summary: String,
    pub parameters: Vec<ParameterMeta>,
    pub request_body: Option<RequestBodyMeta>,
    /// Responses in declaration order
    pub responses: Vec<ResponseMeta>,
}

impl RouteMeta {
    #[must_use]
    pub fn new(method: Method, path_pattern: &str, handler_name: &str) -> Self {
        Self {
            method,
            path_pattern: path_pattern.to_string(),
            handler_name: handler_name.to_string(),
            summary: String::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: Vec::new(),
        }
    }

    #[must_use]
    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    #[must_use]
    pub fn path_param(mut self, name: &str, schema: Value) -> Self {
        self.parameters.push(ParameterMeta {
            name: name.to_string(),
            location: ParameterLocation::Path,
            required: true,
            schema,
        });
        self
    }

    #[must_use]
    pub fn json_body(mut self, required: bool, schema: Value) -> Self {
        self.request_body = Some(RequestBodyMeta {
            required,
            content_type: "application/json".to_string(),
            schema,
        });
        self
    }

    #[must_use]
    pub fn response(mut self, status: u16, description: &str, schema: Option<Value>) -> Self {
        self.responses.push(ResponseMeta {
            status,
            description: description.to_string(),
            schema,
        });
        self
    }

    /// Whether the operation declares a request body.
    #[must_use]
    pub fn accepts_body(&self) -> bool {
        self.request_body.is_some()
    }

    #[must_use]
    pub fn response_for(&self, status: u16) -> Option<&ResponseMeta> {
        self.responses.iter().find(|r| r.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_parts_in_order() {
        let route = RouteMeta::new(Method::GET, "/things/{id}", "get_thing")
            .summary("Get a thing")
            .path_param("id", json!({ "type": "integer" }))
            .response(200, "Thing", Some(json!({ "type": "object" })))
            .response(404, "Missing", None);

        assert_eq!(route.summary, "Get a thing");
        assert_eq!(route.parameters[0].location, ParameterLocation::Path);
        assert!(route.parameters[0].required);
        assert!(!route.accepts_body());
        let statuses: Vec<_> = route.responses.iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![200, 404]);
        assert_eq!(route.response_for(404).unwrap().description, "Missing");
    }

    #[test]
    fn location_renders_as_openapi_in_value() {
        assert_eq!(ParameterLocation::Path.to_string(), "path");
        assert_eq!(ParameterLocation::Cookie.as_str(), "cookie");
    }
}
