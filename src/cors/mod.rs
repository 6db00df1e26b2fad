//! # CORS Route Wrapper
//!
//! Decorates a [`RouteTable`] so every response it produces carries the
//! CORS headers, and every method map answers preflight `OPTIONS` requests.
//!
//! ## What Happens Per Entry
//!
//! | Input entry | Output entry |
//! |-------------|--------------|
//! | `Handler(h)` | `Handler` that awaits `h`, then sets the three headers |
//! | `Static(r)` | `Handler` returning `r`'s status, status text and headers plus the three headers; body dropped |
//! | `Methods(m)` | `Methods` with each admitted method wrapped like `Handler`; `OPTIONS` synthesized when absent |
//!
//! Methods outside the wrapper's [`MethodSet`] are dropped from method maps.
//! The synthesized preflight answers `204 No Content` with an empty body and
//! exactly the three CORS headers.
//!
//! ## Errors
//!
//! A wrapped handler whose delegate yields `Ok(None)` fails with
//! [`RouteError::MissingResponse`]. Errors from the delegate are returned
//! unchanged; the wrapper never maps them to responses.
//!
//! ## Usage
//!
//! ```rust
//! use http::Method;
//! use route_cors::cors::{wrap, CorsOptions};
//! use route_cors::handler::{sync_handler, HandlerResponse};
//! use route_cors::route::{RouteEntry, RouteTable};
//!
//! let routes = RouteTable::new().route(
//!     "/pets",
//!     RouteEntry::methods([(Method::GET, sync_handler(|_| HandlerResponse::empty(200)))]),
//! );
//!
//! let wrapped = wrap(routes, Some(CorsOptions::default().origin("https://app.example.com")));
//! let entry = wrapped.get("/pets").unwrap();
//! assert_eq!(entry.method_names(), vec!["GET", "OPTIONS"]);
//! ```

mod error;
mod headers;
mod options;

pub use error::CorsConfigError;
pub use headers::{CorsHeaderSet, ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
pub(crate) use options::env_lookup;
pub use options::{CorsOptions, ENV_HEADERS, ENV_METHODS, ENV_ORIGIN, WILDCARD};

use std::sync::Arc;

use futures::future::FutureExt;
use http::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::handler::{
    ready_response, Handler, HandlerFuture, HandlerRequest, HandlerResponse, HandlerResult,
};
use crate::ids::RequestId;
use crate::route::{MethodMap, MethodSet, RouteEntry, RouteError, RouteTable};

/// Wrap `routes` with CORS headers using `options` (all `*` when `None`)
///
/// Shorthand for `CorsWrapper::new(options.unwrap_or_default()).wrap(routes)`
/// with the standard method set.
#[must_use]
pub fn wrap(routes: RouteTable, options: Option<CorsOptions>) -> RouteTable {
    CorsWrapper::new(options.unwrap_or_default()).wrap(routes)
}

/// Counters reported once per [`CorsWrapper::wrap`] call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct WrapStats {
    handlers: usize,
    statics: usize,
    method_maps: usize,
    preflights: usize,
    dropped_methods: usize,
}

/// Reusable CORS wrapper
///
/// Holds the derived header set and the method set admitted into method
/// maps. One wrapper can wrap any number of tables; every handler it produces
/// shares the same `Arc<CorsHeaderSet>`.
#[derive(Debug, Clone)]
pub struct CorsWrapper {
    headers: Arc<CorsHeaderSet>,
    route_methods: MethodSet,
}

impl Default for CorsWrapper {
    fn default() -> Self {
        Self::new(CorsOptions::default())
    }
}

impl CorsWrapper {
    #[must_use]
    pub fn new(options: CorsOptions) -> Self {
        Self {
            headers: Arc::new(CorsHeaderSet::from_options(&options)),
            route_methods: MethodSet::standard(),
        }
    }

    /// Replace the set of methods kept in method maps
    #[must_use]
    pub fn with_route_methods(mut self, methods: MethodSet) -> Self {
        self.route_methods = methods;
        self
    }

    #[must_use]
    pub fn header_set(&self) -> &CorsHeaderSet {
        &self.headers
    }

    #[must_use]
    pub fn route_methods(&self) -> &MethodSet {
        &self.route_methods
    }

    /// Produce a new table with the same path keys and CORS-decorated handlers
    #[must_use]
    pub fn wrap(&self, routes: RouteTable) -> RouteTable {
        let mut wrapped = RouteTable::with_capacity(routes.len());
        let mut stats = WrapStats::default();

        for (path, entry) in routes {
            let entry = match entry {
                RouteEntry::Handler(handler) => {
                    stats.handlers += 1;
                    RouteEntry::Handler(self.wrap_handler(&path, None, handler))
                }
                RouteEntry::Static(template) => {
                    stats.statics += 1;
                    RouteEntry::Handler(self.wrap_static(&path, template))
                }
                RouteEntry::Methods(methods) => {
                    stats.method_maps += 1;
                    RouteEntry::Methods(self.wrap_methods(&path, methods, &mut stats))
                }
            };
            wrapped.insert(path, entry);
        }

        info!(
            paths = wrapped.len(),
            handlers = stats.handlers,
            statics = stats.statics,
            method_maps = stats.method_maps,
            preflights = stats.preflights,
            dropped_methods = stats.dropped_methods,
            origin = %self.headers.origin(),
            "Route table wrapped with CORS headers"
        );

        wrapped
    }

    /// Handler answering preflight requests: 204, empty body, the three headers
    #[must_use]
    pub fn preflight_handler(&self) -> Handler {
        let preflight = self.headers.preflight_response();
        Arc::new(move |_req: HandlerRequest| ready_response(preflight.clone()))
    }

    fn wrap_methods(&self, path: &str, methods: MethodMap, stats: &mut WrapStats) -> MethodMap {
        let mut wrapped = MethodMap::with_capacity(methods.len() + 1);

        for (method, handler) in methods {
            if !self.route_methods.contains(&method) {
                debug!(path = %path, method = %method, "Dropping method outside route method set");
                stats.dropped_methods += 1;
                continue;
            }
            let handler = self.wrap_handler(path, Some(method.clone()), handler);
            wrapped.insert(method, handler);
        }

        if !wrapped.contains_key(&Method::OPTIONS) {
            debug!(path = %path, "Synthesizing preflight OPTIONS handler");
            stats.preflights += 1;
            wrapped.insert(Method::OPTIONS, self.preflight_handler());
        }

        wrapped
    }

    fn wrap_handler(&self, path: &str, method: Option<Method>, handler: Handler) -> Handler {
        debug!(path = %path, method = ?method, "Wrapping handler");
        let headers = Arc::clone(&self.headers);
        let path: Arc<str> = Arc::from(path);

        Arc::new(move |req: HandlerRequest| {
            let request_id = req.request_id;
            let pending = handler(req);
            with_cors_headers(
                pending,
                Arc::clone(&headers),
                Arc::clone(&path),
                method.clone(),
                request_id,
            )
            .boxed()
        })
    }

    fn wrap_static(&self, path: &str, template: HandlerResponse) -> Handler {
        debug!(path = %path, status = template.status, "Wrapping static response");
        let mut response = HandlerResponse::new(template.status, template.headers, Value::Null);
        response.status_text = template.status_text;
        self.headers.apply(&mut response);

        Arc::new(move |_req: HandlerRequest| ready_response(response.clone()))
    }
}

/// Await the delegate, then stamp the CORS headers on its response
async fn with_cors_headers(
    pending: HandlerFuture,
    headers: Arc<CorsHeaderSet>,
    path: Arc<str>,
    method: Option<Method>,
    request_id: RequestId,
) -> HandlerResult {
    let Some(mut response) = pending.await? else {
        warn!(
            request_id = %request_id,
            path = %path,
            method = ?method,
            "Handler produced no response"
        );
        return Err(RouteError::MissingResponse {
            path: path.to_string(),
            method,
        }
        .into());
    };
    headers.apply(&mut response);
    Ok(Some(response))
}
