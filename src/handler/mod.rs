//! # Handler Module
//!
//! Request, response and handler types shared by route tables and the CORS
//! wrapper.
//!
//! ## Overview
//!
//! A [`Handler`] is an `Arc`-shared async function from [`HandlerRequest`] to
//! an optional [`HandlerResponse`]:
//!
//! - `Ok(Some(response))` - the handler answered
//! - `Ok(None)` - the handler produced no response (wrapped handlers turn
//!   this into [`RouteError::MissingResponse`](crate::route::RouteError))
//! - `Err(e)` - the handler failed; wrappers propagate `e` untouched
//!
//! ## Building Handlers
//!
//! ```rust
//! use route_cors::handler::{handler_fn, sync_handler, HandlerResponse};
//!
//! // async closure
//! let get_pet = handler_fn(|req| async move {
//!     let id = req.get_path_param("id").unwrap_or("0").to_string();
//!     Ok(Some(HandlerResponse::json(200, serde_json::json!({ "id": id }))))
//! });
//!
//! // plain closure that always answers
//! let health = sync_handler(|_req| HandlerResponse::empty(204));
//! # let _ = (get_pet, health);
//! ```
//!
//! ## Headers
//!
//! Headers live in a [`HeaderVec`] (a `SmallVec` of `(Arc<str>, String)`),
//! looked up case-insensitively. [`HandlerResponse::set_header`] removes every
//! same-named entry before inserting, which is the overwrite semantics the
//! CORS wrapper relies on.

mod core;

pub use core::{
    handler_fn, ready_response, sync_handler, Handler, HandlerFuture, HandlerRequest,
    HandlerResponse, HandlerResult, HeaderVec, ParamVec, MAX_INLINE_HEADERS, MAX_INLINE_PARAMS,
};
