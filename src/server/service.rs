use super::request::{parse_request, ParsedRequest};
use super::response::{write_html, write_json, write_json_bytes, write_json_error};
use crate::dispatcher::Dispatcher;
use crate::docs::{is_docs_path, SPEC_URL};
use crate::error::ApiError;
use crate::router::{matches_fixed_path, Router};
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing::{error, warn};

/// HTTP service answering built-in endpoints and dispatching routed requests.
///
/// All state is shared behind `Arc`; `may_minihttp` clones the service once
/// per connection.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
    pub dispatcher: Arc<Dispatcher>,
    openapi_json: Arc<Vec<u8>>,
    docs_page: Arc<Vec<u8>>,
}

impl AppService {
    /// `openapi_json` is served verbatim at `/swagger.json`, `docs_page` at
    /// `/api-docs`.
    #[must_use]
    pub fn new(
        router: Arc<Router>,
        dispatcher: Arc<Dispatcher>,
        openapi_json: Vec<u8>,
        docs_page: String,
    ) -> Self {
        Self {
            router,
            dispatcher,
            openapi_json: Arc::new(openapi_json),
            docs_page: Arc::new(docs_page.into_bytes()),
        }
    }

    /// Answer a request that has already been parsed.
    ///
    /// `HEAD` is answered like `GET` with the body left empty.
    pub fn handle(&self, req: ParsedRequest, res: &mut Response) {
        let head = req.method == "HEAD";
        self.respond(req, res);
        if head {
            res.body_vec(Vec::new());
        }
    }

    fn respond(&self, req: ParsedRequest, res: &mut Response) {
        let ParsedRequest {
            method,
            path,
            headers,
            body,
            request_id,
        } = req;

        if method == "GET" || method == "HEAD" {
            if matches_fixed_path(&path, "/health") {
                return health_endpoint(res);
            }
            if matches_fixed_path(&path, SPEC_URL) {
                return write_json_bytes(res, 200, self.openapi_json.to_vec());
            }
            if is_docs_path(&path) {
                return write_html(res, 200, self.docs_page.to_vec());
            }
        }

        let route_match = Method::from_bytes(method.as_bytes())
            .ok()
            .and_then(|m| self.router.route(&m, &path));
        let Some(route_match) = route_match else {
            warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
            return write_json_error(res, 404, "Not Found");
        };

        if body.is_malformed() && route_match.route.accepts_body() {
            let err = ApiError::MalformedBody;
            return write_json(res, err.status(), &err.to_body());
        }

        match self
            .dispatcher
            .dispatch(route_match, body.into_json(), headers, request_id)
        {
            Some(hr) => write_json(res, hr.status, &hr.body),
            None => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    "Handler failed or not registered"
                );
                write_json_error(res, 500, "Internal Server Error");
            }
        }
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) {
    write_json(res, 200, &json!({ "status": "ok" }));
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        self.handle(parsed, res);
        Ok(())
    }
}
