use crate::spec::RouteMeta;
use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Path parameter storage. Names are shared with the compiled route table.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Result of successfully matching a request path to a route
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route description
    pub route: Arc<RouteMeta>,
    /// Percent-decoded path parameters (e.g., `{id}` → `("id", "123")`)
    pub path_params: ParamVec,
    /// Name of the handler that should process this request
    pub handler_name: String,
}

impl RouteMatch {
    /// Get a path parameter by name. Last occurrence wins.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    method: Method,
    regex: Regex,
    meta: Arc<RouteMeta>,
    param_names: Vec<Arc<str>>,
}

/// Router that matches HTTP requests to handlers using compiled path regexes
///
/// Routes are tested in registration order; the first whose method and
/// pattern both match wins. Matching ignores ASCII case and tolerates one
/// trailing slash.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    /// Compile the routing table.
    ///
    /// # Errors
    ///
    /// Returns an error if a path pattern produces an invalid regex.
    pub fn new(routes: Vec<RouteMeta>) -> Result<Self, regex::Error> {
        let routes = routes
            .into_iter()
            .map(|route| {
                let (regex, param_names) = Self::path_to_regex(&route.path_pattern)?;
                Ok(CompiledRoute {
                    method: route.method.clone(),
                    regex,
                    meta: Arc::new(route),
                    param_names: param_names.into_iter().map(Arc::from).collect(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let routes_summary: Vec<String> = routes
            .iter()
            .map(|r| format!("{} {} -> {}", r.method, r.meta.path_pattern, r.meta.handler_name))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Ok(Self { routes })
    }

    /// Route descriptions in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteMeta> {
        self.routes.iter().map(|r| r.meta.as_ref())
    }

    /// Match an HTTP request to a route
    ///
    /// `path` must not include the query string. `HEAD` resolves to the
    /// matching `GET` route.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let wanted = if *method == Method::HEAD {
            &Method::GET
        } else {
            method
        };
        for compiled in &self.routes {
            if compiled.method != *wanted {
                continue;
            }
            let Some(caps) = compiled.regex.captures(path) else {
                continue;
            };
            let path_params: ParamVec = compiled
                .param_names
                .iter()
                .zip(caps.iter().skip(1))
                .filter_map(|(name, m)| m.map(|m| (Arc::clone(name), decode_segment(m.as_str()))))
                .collect();

            debug!(
                method = %method,
                path = %path,
                handler_name = %compiled.meta.handler_name,
                route_pattern = %compiled.meta.path_pattern,
                path_params = ?path_params,
                "Route matched"
            );
            return Some(RouteMatch {
                route: Arc::clone(&compiled.meta),
                path_params,
                handler_name: compiled.meta.handler_name.clone(),
            });
        }

        debug!(method = %method, path = %path, "No route matched");
        None
    }

    /// Convert an OpenAPI path pattern to a regex and extract parameter names
    ///
    /// `/users/{id}` becomes `(?i)^/users/([^/]+)/?$` with parameter names
    /// `["id"]`. Literal segments are escaped.
    pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>), regex::Error> {
        if path == "/" {
            return Ok((Regex::new(r"^/$")?, Vec::new()));
        }

        let mut pattern = String::with_capacity(path.len() + 12);
        pattern.push_str("(?i)^");
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let param_name = segment
                    .trim_start_matches('{')
                    .trim_end_matches('}')
                    .to_string();
                pattern.push_str("/([^/]+)");
                param_names.push(param_name);
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push_str("/?$");
        Ok((Regex::new(&pattern)?, param_names))
    }
}

/// Compare a request path against a fixed path with the same rules as the
/// compiled routes: ASCII case-insensitive, one trailing slash tolerated.
#[must_use]
pub fn matches_fixed_path(path: &str, fixed: &str) -> bool {
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => path,
    };
    trimmed.eq_ignore_ascii_case(fixed)
}

/// Percent-decode a path segment, keeping the raw text if it is not valid
/// UTF-8 once decoded.
fn decode_segment(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}
