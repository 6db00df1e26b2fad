//! # route-cors
//!
//! **route-cors** decorates an HTTP route table with Cross-Origin Resource
//! Sharing headers. Give it a table of path → handler(s) and a few options;
//! it returns an equivalent table whose handlers stamp the CORS headers on
//! every response, and whose method maps answer preflight `OPTIONS`
//! requests.
//!
//! ## Overview
//!
//! The wrapper is a single pure transformation. It does not route, parse
//! requests or validate origins: the host HTTP server still matches paths
//! and invokes handlers, the wrapper only changes what those handlers return.
//!
//! ## Architecture
//!
//! - **[`handler`]** - request/response types and the async [`Handler`](handler::Handler) alias
//! - **[`route`]** - [`RouteTable`](route::RouteTable), [`RouteEntry`](route::RouteEntry) and the admitted [`MethodSet`](route::MethodSet)
//! - **[`cors`]** - [`CorsOptions`](cors::CorsOptions), the derived header set and the [`wrap`](cors::wrap) transformation
//! - **[`config`]** - loading options from YAML/JSON/TOML files and the environment
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//! - **[`ids`]** - ULID request identifiers
//! - **[`cli`]** - the `route-cors` inspection binary
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Host as Host Server
//!     participant Wrapped as Wrapped Handler
//!     participant Original as Original Handler
//!
//!     Client->>Host: GET /pets
//!     Host->>Host: match path + method
//!     Host->>Wrapped: invoke(request)
//!     Wrapped->>Original: invoke(request)
//!     Original-->>Wrapped: Some(response)
//!     Wrapped->>Wrapped: set Access-Control-Allow-* headers
//!     Wrapped-->>Host: response
//!     Host-->>Client: 200 + CORS headers
//!
//!     Client->>Host: OPTIONS /pets
//!     Host->>Wrapped: synthesized preflight
//!     Wrapped-->>Host: 204, no body, CORS headers
//!     Host-->>Client: 204
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use route_cors::{wrap, CorsOptions, HandlerRequest, HandlerResponse, RouteEntry, RouteTable};
//! use route_cors::handler::sync_handler;
//!
//! let routes = RouteTable::new()
//!     .route(
//!         "/pets",
//!         RouteEntry::methods([(Method::GET, sync_handler(|_| HandlerResponse::empty(200)))]),
//!     )
//!     .route("/health", HandlerResponse::empty(204));
//!
//! let wrapped = wrap(routes, Some(CorsOptions::default().origin("https://app.example.com")));
//!
//! let get = wrapped.get("/pets").unwrap().handler_for(&Method::GET).unwrap();
//! let response = futures::executor::block_on(get(HandlerRequest::new(Method::GET, "/pets")))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     response.get_header("Access-Control-Allow-Origin"),
//!     Some("https://app.example.com")
//! );
//! ```

pub mod cli;
pub mod config;
pub mod cors;
pub mod handler;
pub mod ids;
pub mod logging;
pub mod route;

pub use cors::{wrap, CorsConfigError, CorsHeaderSet, CorsOptions, CorsWrapper};
pub use handler::{Handler, HandlerRequest, HandlerResponse};
pub use route::{MethodMap, MethodSet, RouteEntry, RouteError, RouteTable};
