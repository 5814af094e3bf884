//! # Router Module
//!
//! Path matching and route resolution.
//!
//! At startup every [`RouteMeta`](crate::spec::RouteMeta) pattern such as
//! `/pets/{id}` is compiled into a regex. For each request the router tests
//! the method and path against the compiled table in order and returns the
//! first [`RouteMatch`], carrying the route description and the decoded path
//! parameters.
//!
//! ```rust,ignore
//! use pet_registry::router::Router;
//! use pet_registry::spec::pet_routes;
//!
//! let router = Router::new(pet_routes())?;
//! if let Some(m) = router.route(&http::Method::GET, "/pets/123") {
//!     println!("Handler: {}", m.handler_name);
//!     println!("Pet id: {:?}", m.get_path_param("id"));
//! }
//! ```

mod core;

pub use core::{matches_fixed_path, ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
