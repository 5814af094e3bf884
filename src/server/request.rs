use crate::dispatcher::HeaderVec;
use crate::ids::RequestId;
use may_minihttp::Request;
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of reading the request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body, or a body not declared as JSON.
    Absent,
    /// Body declared as JSON and parsed successfully.
    Json(Value),
    /// Body declared as JSON that failed to parse.
    Malformed,
}

impl RequestBody {
    /// The parsed JSON value, if any.
    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            RequestBody::Json(v) => Some(v),
            RequestBody::Absent | RequestBody::Malformed => None,
        }
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, RequestBody::Malformed)
    }
}

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method as sent by the client
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase names)
    pub headers: HeaderVec,
    pub body: RequestBody,
    /// Taken from `x-request-id` when it holds a valid ULID, generated otherwise
    pub request_id: RequestId,
}

impl ParsedRequest {
    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Strip the query string (and any fragment) from a request target.
#[must_use]
pub fn strip_query(raw_path: &str) -> &str {
    raw_path.split(['?', '#']).next().unwrap_or("/")
}

/// Whether a `Content-Type` value announces a JSON payload.
///
/// Matches `application/json`, `application/*+json` and friends, ignoring
/// parameters such as `charset`.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().to_ascii_lowercase().contains("json"))
}

/// Interpret raw body bytes given the request's content type.
#[must_use]
pub fn parse_body(content_type: Option<&str>, raw: &[u8]) -> RequestBody {
    if raw.is_empty() || !content_type.is_some_and(is_json_content_type) {
        return RequestBody::Absent;
    }
    match serde_json::from_slice::<Value>(raw) {
        Ok(value) => {
            debug!(
                body_size_bytes = raw.len(),
                body_fields = value.as_object().map(serde_json::Map::len),
                "JSON body parsed"
            );
            RequestBody::Json(value)
        }
        Err(e) => {
            debug!(body_size_bytes = raw.len(), error = %e, "JSON body parse failed");
            RequestBody::Malformed
        }
    }
}

/// Parse an incoming HTTP request into a [`ParsedRequest`].
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let path = strip_query(req.path()).to_string();

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::<str>::from(h.name.to_ascii_lowercase()),
                String::from_utf8_lossy(h.value).into_owned(),
            )
        })
        .collect();

    let mut raw = Vec::new();
    let body = match req.body().read_to_end(&mut raw) {
        Ok(_) => {
            let content_type = headers
                .iter()
                .find(|(k, _)| k.as_ref() == "content-type")
                .map(|(_, v)| v.as_str());
            parse_body(content_type, &raw)
        }
        Err(e) => {
            debug!(error = %e, "Failed to read request body");
            RequestBody::Absent
        }
    };

    let request_id = RequestId::from_header_or_new(
        headers
            .iter()
            .find(|(k, _)| k.as_ref() == "x-request-id")
            .map(|(_, v)| v.as_str()),
    );

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        headers_count = headers.len(),
        body_bytes = raw.len(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        headers,
        body,
        request_id,
    }
}
