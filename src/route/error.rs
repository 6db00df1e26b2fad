use http::Method;
use thiserror::Error;

/// Errors raised while invoking handlers from a route table
///
/// Wrapped handlers return these boxed in `anyhow::Error`; hosts that want to
/// map them to specific responses can `downcast_ref::<RouteError>()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The wrapped handler's delegate produced no response
    #[error("missing response: handler for {path}{} produced no response", method_suffix(.method))]
    MissingResponse {
        path: String,
        /// `None` for whole-path handlers that are not tied to a method
        method: Option<Method>,
    },
    /// No entry is registered under the path key
    #[error("no route registered for {path}")]
    NoRoute { path: String },
    /// The path has a method map without an entry for the method
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed { path: String, method: Method },
    /// The path holds a static response template that was never wrapped
    #[error("route {path} is a static response template and has no handler")]
    StaticEntry { path: String },
}

fn method_suffix(method: &Option<Method>) -> String {
    method
        .as_ref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_response_message() {
        let err = RouteError::MissingResponse {
            path: "/pets".into(),
            method: Some(Method::GET),
        };
        assert_eq!(
            err.to_string(),
            "missing response: handler for /pets (GET) produced no response"
        );

        let err = RouteError::MissingResponse {
            path: "/health".into(),
            method: None,
        };
        assert_eq!(
            err.to_string(),
            "missing response: handler for /health produced no response"
        );
    }
}
