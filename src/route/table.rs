use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;

use super::RouteError;
use crate::handler::{Handler, HandlerRequest, HandlerResponse, HandlerResult};

/// Per-method handlers for one path
pub type MethodMap = HashMap<Method, Handler>;

/// The value registered under a path key
///
/// A closed sum over the three shapes a route can take; every consumer
/// matches on it exhaustively.
#[derive(Clone)]
pub enum RouteEntry {
    /// One handler for every method; method dispatch is the handler's job
    Handler(Handler),
    /// Handlers keyed by HTTP method
    Methods(MethodMap),
    /// Pre-built response used as a status/headers template
    Static(HandlerResponse),
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEntry::Handler(_) => write!(f, "Handler(<function>)"),
            RouteEntry::Methods(map) => {
                let mut methods: Vec<&str> = map.keys().map(Method::as_str).collect();
                methods.sort_unstable();
                f.debug_tuple("Methods").field(&methods).finish()
            }
            RouteEntry::Static(response) => f.debug_tuple("Static").field(response).finish(),
        }
    }
}

impl RouteEntry {
    /// Build a method-map entry from `(method, handler)` pairs
    ///
    /// ```rust
    /// use http::Method;
    /// use route_cors::handler::{sync_handler, HandlerResponse};
    /// use route_cors::route::RouteEntry;
    ///
    /// let entry = RouteEntry::methods([
    ///     (Method::GET, sync_handler(|_| HandlerResponse::empty(200))),
    ///     (Method::DELETE, sync_handler(|_| HandlerResponse::empty(204))),
    /// ]);
    /// assert!(entry.handler_for(&Method::GET).is_some());
    /// assert!(entry.handler_for(&Method::POST).is_none());
    /// ```
    pub fn methods<I>(handlers: I) -> Self
    where
        I: IntoIterator<Item = (Method, Handler)>,
    {
        RouteEntry::Methods(handlers.into_iter().collect())
    }

    /// Resolve the handler that answers `method`
    ///
    /// Whole-path handlers answer every method; static templates answer none.
    #[must_use]
    pub fn handler_for(&self, method: &Method) -> Option<Handler> {
        match self {
            RouteEntry::Handler(handler) => Some(Arc::clone(handler)),
            RouteEntry::Methods(map) => map.get(method).map(Arc::clone),
            RouteEntry::Static(_) => None,
        }
    }

    /// Methods registered for a method-map entry, sorted by name
    #[must_use]
    pub fn method_names(&self) -> Vec<&str> {
        match self {
            RouteEntry::Methods(map) => {
                let mut names: Vec<&str> = map.keys().map(Method::as_str).collect();
                names.sort_unstable();
                names
            }
            RouteEntry::Handler(_) | RouteEntry::Static(_) => Vec::new(),
        }
    }

    /// Short name of the variant, for logs and CLI output
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RouteEntry::Handler(_) => "handler",
            RouteEntry::Methods(_) => "methods",
            RouteEntry::Static(_) => "static",
        }
    }
}

impl From<Handler> for RouteEntry {
    fn from(handler: Handler) -> Self {
        RouteEntry::Handler(handler)
    }
}

impl From<MethodMap> for RouteEntry {
    fn from(map: MethodMap) -> Self {
        RouteEntry::Methods(map)
    }
}

impl From<HandlerResponse> for RouteEntry {
    fn from(response: HandlerResponse) -> Self {
        RouteEntry::Static(response)
    }
}

/// Mapping from path key to [`RouteEntry`]
///
/// Path keys are opaque: placeholders such as `/pets/{id}` are only meaningful
/// to the host router. The table itself never matches request paths against
/// patterns; [`RouteTable::call`] looks keys up verbatim.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: HashMap<String, RouteEntry>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Register an entry (builder style); a repeated path replaces the earlier entry
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, entry: impl Into<RouteEntry>) -> Self {
        self.insert(path, entry);
        self
    }

    /// Register an entry, returning the one it replaced
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        entry: impl Into<RouteEntry>,
    ) -> Option<RouteEntry> {
        self.entries.insert(path.into(), entry.into())
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Path keys, sorted
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Invoke the handler registered under `path` for the request's method
    ///
    /// The path is an exact table key, not a request path to be matched. The
    /// handler's result is returned as-is, including `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::NoRoute`] when `path` is not a key
    /// - [`RouteError::StaticEntry`] when the key holds an unwrapped static template
    /// - [`RouteError::MethodNotAllowed`] when a method map lacks the method
    /// - whatever the handler itself returns
    pub async fn call(&self, path: &str, req: HandlerRequest) -> HandlerResult {
        let entry = self.entries.get(path).ok_or_else(|| RouteError::NoRoute {
            path: path.to_string(),
        })?;
        let handler = match entry {
            RouteEntry::Static(_) => {
                return Err(RouteError::StaticEntry {
                    path: path.to_string(),
                }
                .into())
            }
            other => other
                .handler_for(&req.method)
                .ok_or_else(|| RouteError::MethodNotAllowed {
                    path: path.to_string(),
                    method: req.method.clone(),
                })?,
        };
        handler(req).await
    }
}

impl IntoIterator for RouteTable {
    type Item = (String, RouteEntry);
    type IntoIter = hash_map::IntoIter<String, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<P: Into<String>> FromIterator<(P, RouteEntry)> for RouteTable {
    fn from_iter<I: IntoIterator<Item = (P, RouteEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(p, e)| (p.into(), e)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{handler_fn, sync_handler};

    fn ok(status: u16) -> Handler {
        sync_handler(move |_| HandlerResponse::empty(status))
    }

    #[test]
    fn test_builder_replaces_duplicate_paths() {
        let table = RouteTable::new()
            .route("/a", ok(200))
            .route("/a", HandlerResponse::empty(201))
            .route("/b", RouteEntry::methods([(Method::GET, ok(200))]));

        assert_eq!(table.len(), 2);
        assert_eq!(table.paths(), vec!["/a", "/b"]);
        assert!(table.contains_path("/a"));
        assert!(!table.contains_path("/a/"));
        assert_eq!(table.get("/a").map(RouteEntry::kind), Some("static"));
        assert_eq!(table.get("/b").map(RouteEntry::method_names), Some(vec!["GET"]));
    }

    #[test]
    fn test_debug_hides_functions() {
        let entry = RouteEntry::methods([(Method::POST, ok(201)), (Method::GET, ok(200))]);
        assert_eq!(format!("{entry:?}"), r#"Methods(["GET", "POST"])"#);
        assert_eq!(format!("{:?}", RouteEntry::Handler(ok(200))), "Handler(<function>)");
    }

    #[tokio::test]
    async fn test_call_dispatches_by_method() {
        let table = RouteTable::new()
            .route("/pets", RouteEntry::methods([(Method::GET, ok(200)), (Method::POST, ok(201))]))
            .route("/any", ok(202));

        let res = table
            .call("/pets", HandlerRequest::new(Method::POST, "/pets"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(res.status, 201);

        let res = table
            .call("/any", HandlerRequest::new(Method::DELETE, "/any"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(res.status, 202);
    }

    #[tokio::test]
    async fn test_call_errors() {
        let table = RouteTable::new()
            .route("/pets", RouteEntry::methods([(Method::GET, ok(200))]))
            .route("/static", HandlerResponse::empty(200));

        let err = table
            .call("/nope", HandlerRequest::new(Method::GET, "/nope"))
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<RouteError>(),
            Some(&RouteError::NoRoute { path: "/nope".into() })
        );

        let err = table
            .call("/pets", HandlerRequest::new(Method::PUT, "/pets"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RouteError>(),
            Some(RouteError::MethodNotAllowed { method, .. }) if *method == Method::PUT
        ));

        let err = table
            .call("/static", HandlerRequest::new(Method::GET, "/static"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RouteError>(),
            Some(RouteError::StaticEntry { .. })
        ));
    }

    #[tokio::test]
    async fn test_call_passes_through_empty_result() {
        let table = RouteTable::new().route("/void", handler_fn(|_| async { Ok(None) }));
        let res = table
            .call("/void", HandlerRequest::new(Method::GET, "/void"))
            .await
            .unwrap();
        assert!(res.is_none());
    }
}
