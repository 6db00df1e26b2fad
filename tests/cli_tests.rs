use std::process::{Command, Output};

mod common;
use common::temp_files::create_temp_yaml;

fn route_cors() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_route-cors"));
    cmd.env_remove("ROUTE_CORS_ORIGIN")
        .env_remove("ROUTE_CORS_METHODS")
        .env_remove("ROUTE_CORS_HEADERS")
        .env("ROUTE_CORS_LOG_LEVEL", "error");
    cmd
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_cli_headers_defaults() {
    let output = route_cors().arg("headers").output().expect("run cli");
    assert_eq!(
        stdout(&output),
        "access-control-allow-origin: *\n\
         access-control-allow-methods: *\n\
         access-control-allow-headers: *\n"
    );
}

#[test]
fn test_cli_env_file_and_flag_precedence() {
    let file = create_temp_yaml("origin: https://file.example\nmethods: GET\n");
    let output = route_cors()
        .env("ROUTE_CORS_ORIGIN", "https://env.example")
        .env("ROUTE_CORS_HEADERS", "X-From-Env")
        .arg("check")
        .arg("--config")
        .arg(file.path())
        .arg("--methods")
        .arg("GET, PUT")
        .output()
        .expect("run cli");

    let options: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(options["origin"], "https://file.example");
    assert_eq!(options["methods"], "GET, PUT");
    assert_eq!(options["headers"], "X-From-Env");
}

#[test]
fn test_cli_blank_env_value_is_ignored() {
    let output = route_cors()
        .env("ROUTE_CORS_ORIGIN", "   ")
        .arg("headers")
        .output()
        .expect("run cli");
    assert!(stdout(&output).starts_with("access-control-allow-origin: *\n"));
}

#[test]
fn test_cli_preflight_json() {
    let output = route_cors()
        .args(["preflight", "--origin", "https://app.example"])
        .output()
        .expect("run cli");

    let response: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(response["status"], 204);
    assert!(response["body"].is_null());
    assert_eq!(
        response["headers"]["access-control-allow-origin"],
        "https://app.example"
    );
}

#[test]
fn test_cli_rejects_bad_config() {
    let file = create_temp_yaml("origin: \"\"\n");
    let output = route_cors()
        .arg("check")
        .arg("--config")
        .arg(file.path())
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'origin' must not be empty"), "{stderr}");
}
