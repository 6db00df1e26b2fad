use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;

use super::CorsOptions;
use crate::handler::{HandlerResponse, HeaderVec};

pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
pub const ALLOW_METHODS: &str = "access-control-allow-methods";
pub const ALLOW_HEADERS: &str = "access-control-allow-headers";

/// The three CORS headers derived from [`CorsOptions`]
///
/// Computed once per wrapper and shared read-only by every handler it
/// produces, so all responses from one wrapped table agree. Header names are
/// allocated here once and shared by every response the set is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaderSet {
    origin: String,
    methods: String,
    headers: String,
    names: [Arc<str>; 3],
}

impl CorsHeaderSet {
    #[must_use]
    pub fn from_options(options: &CorsOptions) -> Self {
        Self {
            origin: options.origin.clone(),
            methods: options.methods.clone(),
            headers: options.headers.clone(),
            names: [
                Arc::from(ALLOW_ORIGIN),
                Arc::from(ALLOW_METHODS),
                Arc::from(ALLOW_HEADERS),
            ],
        }
    }

    fn shared_pairs(&self) -> impl Iterator<Item = (Arc<str>, String)> + '_ {
        self.names
            .iter()
            .zip([&self.origin, &self.methods, &self.headers])
            .map(|(name, value)| (Arc::clone(name), value.clone()))
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn methods(&self) -> &str {
        &self.methods
    }

    #[must_use]
    pub fn headers(&self) -> &str {
        &self.headers
    }

    /// `(header name, value)` pairs, names lowercase
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (ALLOW_ORIGIN, self.origin.as_str()),
            (ALLOW_METHODS, self.methods.as_str()),
            (ALLOW_HEADERS, self.headers.as_str()),
        ]
    }

    /// Set all three headers on `response`, replacing same-named headers
    pub fn apply(&self, response: &mut HandlerResponse) {
        for (name, value) in self.shared_pairs() {
            response.insert_header(name, value);
        }
    }

    /// The three headers as a fresh [`HeaderVec`]
    #[must_use]
    pub fn to_header_vec(&self) -> HeaderVec {
        self.shared_pairs().collect()
    }

    /// Response returned by a synthesized `OPTIONS` handler:
    /// 204, empty body, exactly these three headers
    #[must_use]
    pub fn preflight_response(&self) -> HandlerResponse {
        HandlerResponse::new(
            StatusCode::NO_CONTENT.as_u16(),
            self.to_header_vec(),
            Value::Null,
        )
    }
}

impl From<&CorsOptions> for CorsHeaderSet {
    fn from(options: &CorsOptions) -> Self {
        Self::from_options(options)
    }
}
