#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Creates a temporary options file with the given extension
    ///
    /// The file is removed when the returned handle drops.
    pub fn create_temp_options(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("route_cors_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_options(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_options(content, "json")
    }

    pub fn create_temp_toml(content: &str) -> NamedTempFile {
        create_temp_options(content, "toml")
    }
}

pub mod fixtures {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use http::Method;
    use route_cors::handler::{handler_fn, sync_handler, Handler, HandlerRequest, HandlerResponse};
    use route_cors::route::{RouteEntry, RouteTable};

    /// Handler answering `status` with a JSON body naming the method it saw
    pub fn echo_method(status: u16) -> Handler {
        sync_handler(move |req: HandlerRequest| {
            HandlerResponse::json(status, serde_json::json!({ "method": req.method.as_str() }))
        })
    }

    /// Handler that resolves without producing a response
    pub fn no_response() -> Handler {
        handler_fn(|_req: HandlerRequest| async { Ok(None) })
    }

    /// Handler counting its invocations
    pub fn counting(counter: Arc<AtomicUsize>) -> Handler {
        sync_handler(move |_req: HandlerRequest| {
            counter.fetch_add(1, Ordering::SeqCst);
            HandlerResponse::empty(200)
        })
    }

    /// A table holding one entry of each shape
    pub fn mixed_table() -> RouteTable {
        RouteTable::new()
            .route(
                "/pets",
                RouteEntry::methods([(Method::GET, echo_method(200)), (Method::POST, echo_method(201))]),
            )
            .route("/pets/{id}", echo_method(200))
            .route(
                "/health",
                HandlerResponse::json(200, serde_json::json!({ "status": "ok" }))
                    .with_status_text("Healthy")
                    .with_header("cache-control", "no-store"),
            )
    }

    pub fn request(method: Method, path: &str) -> HandlerRequest {
        HandlerRequest::new(method, path)
    }
}
