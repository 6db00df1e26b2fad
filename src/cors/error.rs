use std::path::PathBuf;

use thiserror::Error;

/// CORS configuration error
///
/// Returned when loading [`CorsOptions`](super::CorsOptions) from a file or
/// when [`CorsOptions::validate`](super::CorsOptions::validate) finds a blank
/// value. Wrapping a route table never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorsConfigError {
    /// The configuration file could not be read
    #[error("CORS configuration error: cannot read '{}': {message}", .path.display())]
    Io { path: PathBuf, message: String },
    /// The configuration file is not valid YAML/JSON/TOML for `CorsOptions`
    #[error("CORS configuration error: invalid options in '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    /// The file extension is not one of `.yaml`, `.yml`, `.json`, `.toml`
    #[error(
        "CORS configuration error: unsupported config format '{}'. \
        Expected a .yaml, .yml, .json or .toml file",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },
    /// An option was explicitly set to an empty string
    #[error("CORS configuration error: '{field}' must not be empty")]
    EmptyValue { field: &'static str },
}
