//! # CLI Module
//!
//! Command-line interface behind the `route-cors` binary. It resolves CORS
//! options the same way a host service would and shows what the wrapper
//! produces, without starting a server.
//!
//! ## Commands
//!
//! ### `headers`
//!
//! Print the three headers every wrapped response carries:
//!
//! ```bash
//! route-cors headers --origin https://app.example.com
//! ```
//!
//! ### `preflight`
//!
//! Print the synthesized `OPTIONS` response (204, empty body) as JSON:
//!
//! ```bash
//! route-cors preflight --config cors.yaml
//! ```
//!
//! ### `check`
//!
//! Validate an options file and print the resolved options:
//!
//! ```bash
//! route-cors check --config cors.toml
//! ```
//!
//! ### `inspect`
//!
//! Wrap a described route table and list each path's entry:
//!
//! ```bash
//! route-cors inspect --route "/pets=GET,POST" --route /health=static --route /echo
//! ```
//!
//! ## Option Sources
//!
//! `--origin`, `--methods` and `--headers` win over `--config`, which wins
//! over `ROUTE_CORS_*` environment variables, which win over the `*` defaults.

mod commands;


pub use commands::{
    parse_route_spec, run_cli, run_cli_with_env, run_cli_with_writer, Cli, Commands, OptionArgs,
    RouteSpec, RouteSpecKind,
};
