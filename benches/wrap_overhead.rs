use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use route_cors::cors::{wrap, CorsOptions};
use route_cors::handler::{sync_handler, Handler, HandlerRequest, HandlerResponse};
use route_cors::route::{RouteEntry, RouteTable};

fn ok(status: u16) -> Handler {
    sync_handler(move |_| HandlerResponse::json(status, serde_json::json!({ "ok": true })))
}

fn example_table() -> RouteTable {
    let mut table = RouteTable::new();
    for i in 0..50 {
        table.insert(
            format!("/zoo/animals/{i}"),
            RouteEntry::methods([
                (Method::GET, ok(200)),
                (Method::PUT, ok(200)),
                (Method::DELETE, ok(204)),
                (Method::TRACE, ok(200)),
            ]),
        );
        table.insert(format!("/zoo/handlers/{i}"), ok(200));
        table.insert(
            format!("/zoo/static/{i}"),
            HandlerResponse::empty(204).with_header("cache-control", "no-store"),
        );
    }
    table
}

fn options() -> CorsOptions {
    CorsOptions::default()
        .origin("https://app.example.com")
        .methods("GET, PUT, DELETE")
}

fn bench_wrap(c: &mut Criterion) {
    c.bench_function("wrap_150_paths", |b| {
        b.iter_batched(
            example_table,
            |table| black_box(wrap(table, Some(options()))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_wrapped_call(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .expect("failed to build tokio runtime");
    let plain = example_table();
    let wrapped = wrap(example_table(), Some(options()));

    let calls = [
        ("/zoo/animals/7", Method::GET),
        ("/zoo/animals/7", Method::OPTIONS),
        ("/zoo/handlers/7", Method::POST),
        ("/zoo/static/7", Method::GET),
    ];

    for (name, table) in [("call_get_unwrapped", &plain), ("call_get_wrapped", &wrapped)] {
        c.bench_function(name, |b| {
            b.iter(|| {
                runtime.block_on(async {
                    let res = table
                        .call("/zoo/animals/7", HandlerRequest::new(Method::GET, "/zoo/animals/7"))
                        .await;
                    black_box(res)
                })
            })
        });
    }

    c.bench_function("call_wrapped_mixed", |b| {
        b.iter(|| {
            runtime.block_on(async {
                for (path, method) in calls.iter() {
                    let res = wrapped
                        .call(path, HandlerRequest::new(method.clone(), *path))
                        .await;
                    black_box(&res);
                }
            })
        })
    });
}

criterion_group!(benches, bench_wrap, bench_wrapped_call);
criterion_main!(benches);
