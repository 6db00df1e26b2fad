use std::env;

use serde::{Deserialize, Serialize};

use super::CorsConfigError;

/// Value used for any option the caller leaves out
pub const WILDCARD: &str = "*";

/// Environment variable overriding [`CorsOptions::origin`]
pub const ENV_ORIGIN: &str = "ROUTE_CORS_ORIGIN";
/// Environment variable overriding [`CorsOptions::methods`]
pub const ENV_METHODS: &str = "ROUTE_CORS_METHODS";
/// Environment variable overriding [`CorsOptions::headers`]
pub const ENV_HEADERS: &str = "ROUTE_CORS_HEADERS";

/// Reads a process environment variable; the default lookup for option resolution
pub(crate) fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn wildcard() -> String {
    WILDCARD.to_string()
}

/// CORS options for a route table
///
/// Each value is copied verbatim into the matching response header; nothing
/// is parsed or validated against incoming requests.
///
/// | Field | Header | Default |
/// |-------|--------|---------|
/// | `origin` | `Access-Control-Allow-Origin` | `*` |
/// | `methods` | `Access-Control-Allow-Methods` | `*` |
/// | `headers` | `Access-Control-Allow-Headers` | `*` |
///
/// # Example
///
/// ```rust
/// use route_cors::cors::CorsOptions;
///
/// let options = CorsOptions::default()
///     .origin("https://app.example.com")
///     .methods("GET, POST");
/// assert_eq!(options.headers, "*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsOptions {
    #[serde(default = "wildcard")]
    pub origin: String,
    #[serde(default = "wildcard")]
    pub methods: String,
    #[serde(default = "wildcard")]
    pub headers: String,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            origin: wildcard(),
            methods: wildcard(),
            headers: wildcard(),
        }
    }
}

impl CorsOptions {
    /// Set the `Access-Control-Allow-Origin` value
    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Set the `Access-Control-Allow-Methods` value
    #[must_use]
    pub fn methods(mut self, methods: impl Into<String>) -> Self {
        self.methods = methods.into();
        self
    }

    /// Set the `Access-Control-Allow-Headers` value
    #[must_use]
    pub fn headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Load options from `ROUTE_CORS_ORIGIN`, `ROUTE_CORS_METHODS` and
    /// `ROUTE_CORS_HEADERS`. Unset or blank variables keep the `*` default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Layer the environment variables that are set (and not blank) over `self`
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(env_lookup)
    }

    pub(crate) fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(origin) = non_blank(ENV_ORIGIN) {
            self.origin = origin;
        }
        if let Some(methods) = non_blank(ENV_METHODS) {
            self.methods = methods;
        }
        if let Some(headers) = non_blank(ENV_HEADERS) {
            self.headers = headers;
        }
        self
    }

    /// Reject blank values
    ///
    /// Called by the configuration loaders; the wrapper itself never validates.
    ///
    /// # Errors
    ///
    /// Returns [`CorsConfigError::EmptyValue`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CorsConfigError> {
        for (field, value) in [
            ("origin", &self.origin),
            ("methods", &self.methods),
            ("headers", &self.headers),
        ] {
            if value.trim().is_empty() {
                return Err(CorsConfigError::EmptyValue { field });
            }
        }
        Ok(())
    }
}
