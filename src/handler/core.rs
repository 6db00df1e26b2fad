use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use http::{Method, StatusCode};
use serde::{Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

use crate::ids::{RequestId, REQUEST_ID_HEADER};

/// Maximum inline headers before heap allocation
/// Most responses carry ≤16 headers, CORS headers included
pub const MAX_INLINE_HEADERS: usize = 16;

/// Maximum inline path/query parameters before heap allocation
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated header storage
///
/// Header names are `Arc<str>` so a name built once, such as the CORS names
/// held by `CorsHeaderSet`, can be attached to many responses without copying.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Stack-allocated path/query parameter storage
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Outcome of a handler: `Ok(None)` means the handler produced no response.
pub type HandlerResult = anyhow::Result<Option<HandlerResponse>>;

/// Boxed future returned by every [`Handler`].
pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// A route handler: takes the request, eventually yields a response.
///
/// Handlers are shared behind `Arc` so wrapping a route table never has to
/// clone or take ownership of caller closures.
pub type Handler = Arc<dyn Fn(HandlerRequest) -> HandlerFuture + Send + Sync>;

/// Build a [`Handler`] from an async closure.
///
/// ```rust
/// use route_cors::handler::{handler_fn, HandlerResponse};
///
/// let handler = handler_fn(|_req| async {
///     Ok(Some(HandlerResponse::json(200, serde_json::json!({ "ok": true }))))
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> Handler
where
    F: Fn(HandlerRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |req: HandlerRequest| f(req).boxed())
}

/// Build a [`Handler`] from a plain closure that always answers.
pub fn sync_handler<F>(f: F) -> Handler
where
    F: Fn(HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
{
    Arc::new(move |req: HandlerRequest| ready_response(f(req)))
}

/// Already-completed [`HandlerFuture`] yielding `response`
#[must_use]
pub fn ready_response(response: HandlerResponse) -> HandlerFuture {
    future::ready(Ok::<_, anyhow::Error>(Some(response))).boxed()
}

/// Request data passed to a handler
///
/// The host server fills this in after matching a path; the CORS wrapper
/// only forwards it to the original handler.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path
    pub path: String,
    /// Path parameters extracted by the host router
    pub path_params: ParamVec,
    /// Query string parameters
    pub query_params: ParamVec,
    /// HTTP headers
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl HandlerRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            path_params: ParamVec::new(),
            query_params: ParamVec::new(),
            headers: HeaderVec::new(),
            body: None,
        }
    }

    /// Add a header. An `x-request-id` header also becomes the request id when
    /// it holds a valid ULID.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(REQUEST_ID_HEADER) {
            self.request_id = RequestId::from_header_or_new(Some(&value));
        }
        self.headers.push((Arc::from(name), value));
        self
    }

    #[must_use]
    pub fn with_path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    /// Get a path parameter by name
    ///
    /// Last write wins when the same name appears at several path depths.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name (last write wins)
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response produced by a handler
///
/// `body` is JSON; `Value::Null` stands for an empty body. `status_text`
/// overrides the canonical reason phrase when set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 204, 404, ...)
    pub status: u16,
    /// Explicit reason phrase, if the handler set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(serialize_with = "serialize_headers")]
    pub headers: HeaderVec,
    pub body: Value,
}

fn serialize_headers<S: Serializer>(headers: &HeaderVec, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(headers.iter().map(|(k, v)| (k.as_ref(), v.as_str())))
}

impl HandlerResponse {
    /// Create a new response with the given status, headers, and body
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            status_text: None,
            headers,
            body,
        }
    }

    /// Response with no headers and an empty body
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::new(status, HeaderVec::new(), Value::Null)
    }

    /// Create a JSON response with a `content-type` header
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self::new(status, headers, body)
    }

    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value.into());
        self
    }

    /// Reason phrase: the explicit one, else the canonical phrase for the status
    #[must_use]
    pub fn reason(&self) -> &str {
        match &self.status_text {
            Some(text) => text,
            None => StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or(""),
        }
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header
    ///
    /// Every existing entry with the same name (case-insensitive) is removed
    /// first, so the header appears exactly once afterwards.
    pub fn set_header(&mut self, name: &str, value: String) {
        self.insert_header(Arc::from(name), value);
    }

    /// [`HandlerResponse::set_header`] with a shared, already-built name
    pub fn insert_header(&mut self, name: Arc<str>, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut res = HandlerResponse::empty(200)
            .with_header("Access-Control-Allow-Origin", "https://old.example");
        res.headers
            .push((Arc::from("ACCESS-CONTROL-ALLOW-ORIGIN"), "dup".to_string()));
        res.set_header("access-control-allow-origin", "*".to_string());

        let matching: Vec<_> = res
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("access-control-allow-origin"))
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(res.get_header("Access-Control-Allow-Origin"), Some("*"));
    }

    #[test]
    fn test_reason_falls_back_to_canonical() {
        assert_eq!(HandlerResponse::empty(204).reason(), "No Content");
        assert_eq!(
            HandlerResponse::empty(200).with_status_text("Fine").reason(),
            "Fine"
        );
        assert_eq!(HandlerResponse::empty(799).reason(), "");
    }

    #[test]
    fn test_request_header_lookup_and_request_id() {
        let id = RequestId::new();
        let req = HandlerRequest::new(Method::GET, "/pets/7")
            .with_header("X-Request-Id", id.to_string())
            .with_header("Origin", "https://app.example")
            .with_path_param("id", "7")
            .with_query_param("limit", "10")
            .with_query_param("limit", "20");

        assert_eq!(req.request_id, id);
        assert_eq!(req.get_header("origin"), Some("https://app.example"));
        assert_eq!(req.get_path_param("id"), Some("7"));
        assert_eq!(req.get_query_param("limit"), Some("20"));
    }

    #[test]
    fn test_response_serializes_headers_as_map() {
        let res = HandlerResponse::empty(204).with_header("access-control-allow-origin", "*");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["status"], 204);
        assert_eq!(json["headers"]["access-control-allow-origin"], "*");
        assert!(json.get("status_text").is_none());
        assert!(json["body"].is_null());
    }

    #[tokio::test]
    async fn test_sync_handler_always_answers() {
        let handler = sync_handler(|req| HandlerResponse::json(200, serde_json::json!(req.path)));
        let res = handler(HandlerRequest::new(Method::GET, "/a"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(res.body, serde_json::json!("/a"));
    }
}
