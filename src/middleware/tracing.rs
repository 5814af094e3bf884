use std::time::Duration;

use tracing::{debug, info, warn};

use super::Middleware;
use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Logs one line when a handler starts and one when it answers.
///
/// Any status >= 400 is logged at `warn`.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn before(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        debug!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            handler = %req.handler_name,
            path_params = ?req.path_params,
            "Handler execution start"
        );
        None
    }

    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, latency: Duration) {
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        if res.status >= 400 {
            warn!(
                request_id = %req.request_id,
                handler = %req.handler_name,
                status = res.status,
                latency_ms,
                "Handler returned error status"
            );
        } else {
            info!(
                request_id = %req.request_id,
                handler = %req.handler_name,
                status = res.status,
                latency_ms,
                "Handler execution complete"
            );
        }
    }
}
