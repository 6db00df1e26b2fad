//! # Route Module
//!
//! Route tables as handed to a host HTTP server: a map from opaque path key to
//! a [`RouteEntry`].
//!
//! ## Entry Shapes
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`RouteEntry::Handler`] | one handler for every method on the path |
//! | [`RouteEntry::Methods`] | a [`MethodMap`] from `http::Method` to handler |
//! | [`RouteEntry::Static`] | a pre-built response used as a status/headers template |
//!
//! ## Method Set
//!
//! [`MethodSet`] lists the methods a method map may keep when the table is
//! wrapped for CORS. The default is [`DEFAULT_ROUTE_METHODS`]:
//! GET, POST, PUT, DELETE, PATCH, OPTIONS, HEAD.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use route_cors::handler::{sync_handler, HandlerResponse};
//! use route_cors::route::{RouteEntry, RouteTable};
//!
//! let table = RouteTable::new()
//!     .route("/health", HandlerResponse::empty(204))
//!     .route("/echo", sync_handler(|req| HandlerResponse::json(200, serde_json::json!(req.path))))
//!     .route(
//!         "/pets/{id}",
//!         RouteEntry::methods([(Method::GET, sync_handler(|_| HandlerResponse::empty(200)))]),
//!     );
//! assert_eq!(table.len(), 3);
//! ```

mod error;
mod methods;
mod table;

pub use error::RouteError;
pub use methods::{MethodSet, DEFAULT_ROUTE_METHODS};
pub use table::{MethodMap, RouteEntry, RouteTable};
