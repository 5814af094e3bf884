use may_minihttp::Response;
use serde_json::Value;
use tracing::error;

/// Canonical reason phrase for the statuses this service emits.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Serialize `body` and write it as an `application/json` response.
pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    match serde_json::to_vec(body) {
        Ok(bytes) => write_json_bytes(res, status, bytes),
        Err(e) => {
            error!(error = %e, status = status, "Failed to serialize response body");
            write_json_bytes(
                res,
                500,
                br#"{"error":"Internal Server Error"}"#.to_vec(),
            );
        }
    }
}

/// Write an `{"error": message}` JSON response.
pub fn write_json_error(res: &mut Response, status: u16, message: &str) {
    write_json(res, status, &serde_json::json!({ "error": message }));
}

/// Write pre-serialized JSON.
pub fn write_json_bytes(res: &mut Response, status: u16, bytes: Vec<u8>) {
    res.status_code(usize::from(status), status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(bytes);
}

pub fn write_html(res: &mut Response, status: u16, html: Vec<u8>) {
    res.status_code(usize::from(status), status_reason(status));
    res.header("Content-Type: text/html; charset=utf-8");
    res.body_vec(html);
}
