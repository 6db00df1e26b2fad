//! # Configuration Module
//!
//! Loads [`CorsOptions`] from configuration files and the environment.
//!
//! ## File Formats
//!
//! The format is chosen by extension:
//!
//! | Extension | Parser |
//! |-----------|--------|
//! | `.yaml`, `.yml` | `serde_yaml` |
//! | `.json` | `serde_json` |
//! | `.toml` | `toml` |
//!
//! Every field is optional and defaults to `*`:
//!
//! ```yaml
//! origin: https://app.example.com
//! methods: GET, POST, OPTIONS
//! # headers defaults to "*"
//! ```
//!
//! ## Environment Variables
//!
//! - `ROUTE_CORS_ORIGIN` - `Access-Control-Allow-Origin`
//! - `ROUTE_CORS_METHODS` - `Access-Control-Allow-Methods`
//! - `ROUTE_CORS_HEADERS` - `Access-Control-Allow-Headers`
//!
//! ## Precedence
//!
//! [`resolve_options`] layers sources from lowest to highest priority:
//! defaults, environment, configuration file, explicit overrides.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::cors::{env_lookup, CorsConfigError, CorsOptions};

/// Options where every field may be absent
///
/// This is the shape of a configuration file, and of explicit overrides such
/// as CLI flags. Absent fields leave the underlying value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialOptions {
    pub origin: Option<String>,
    pub methods: Option<String>,
    pub headers: Option<String>,
}

impl PartialOptions {
    /// Layer the present fields over `options`
    #[must_use]
    pub fn apply(&self, mut options: CorsOptions) -> CorsOptions {
        if let Some(origin) = &self.origin {
            options.origin.clone_from(origin);
        }
        if let Some(methods) = &self.methods {
            options.methods.clone_from(methods);
        }
        if let Some(headers) = &self.headers {
            options.headers.clone_from(headers);
        }
        options
    }
}

/// Parse a configuration file's content, picking the parser from `path`'s extension
///
/// # Errors
///
/// [`CorsConfigError::UnsupportedFormat`] for unknown extensions,
/// [`CorsConfigError::Parse`] for malformed content or unknown fields.
pub fn parse_partial(path: &Path, content: &str) -> Result<PartialOptions, CorsConfigError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse_error = |message: String| CorsConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match extension.as_deref() {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        Some("json") => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Some("toml") => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        _ => Err(CorsConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Parse options from `content`; fields missing from the file default to `*`
///
/// # Errors
///
/// As [`parse_partial`], plus [`CorsConfigError::EmptyValue`] for blank values.
pub fn parse_options(path: &Path, content: &str) -> Result<CorsOptions, CorsConfigError> {
    let options = parse_partial(path, content)?.apply(CorsOptions::default());
    options.validate()?;
    Ok(options)
}

fn read_partial(path: &Path) -> Result<PartialOptions, CorsConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| CorsConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_partial(path, &content)
}

/// Read and parse an options file
///
/// # Errors
///
/// [`CorsConfigError::Io`] when the file cannot be read, otherwise as
/// [`parse_options`].
pub fn load_options(path: impl AsRef<Path>) -> Result<CorsOptions, CorsConfigError> {
    let path = path.as_ref();
    let options = read_partial(path)?.apply(CorsOptions::default());
    options.validate()?;
    debug!(path = %path.display(), origin = %options.origin, "Loaded CORS options");
    Ok(options)
}

/// Resolve options from every source: defaults, environment, an optional
/// file, then explicit overrides
///
/// # Errors
///
/// Propagates file errors, and [`CorsConfigError::EmptyValue`] when the
/// resolved options contain a blank value.
pub fn resolve_options(
    file: Option<&Path>,
    overrides: &PartialOptions,
) -> Result<CorsOptions, CorsConfigError> {
    resolve_options_with(env_lookup, file, overrides)
}

/// [`resolve_options`] with the environment read through `lookup`
///
/// # Errors
///
/// As [`resolve_options`].
pub fn resolve_options_with<F>(
    lookup: F,
    file: Option<&Path>,
    overrides: &PartialOptions,
) -> Result<CorsOptions, CorsConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = CorsOptions::default().with_overrides(lookup);
    if let Some(path) = file {
        options = read_partial(path)?.apply(options);
        debug!(path = %path.display(), "Applied CORS options file");
    }
    let options = overrides.apply(options);
    options.validate()?;
    Ok(options)
}
