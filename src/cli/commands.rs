use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use http::Method;
use tracing::info;

use crate::config::{resolve_options_with, PartialOptions};
use crate::cors::{env_lookup, CorsOptions, CorsWrapper};
use crate::handler::{sync_handler, HandlerResponse};
use crate::route::{MethodSet, RouteEntry, RouteTable};

/// Command-line interface for route-cors
///
/// Inspects the CORS headers and preflight responses a configuration
/// produces, without starting a server.
#[derive(Parser, Debug)]
#[command(name = "route-cors")]
#[command(about = "Inspect CORS headers applied to route tables", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: OptionArgs,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Sources for the CORS options; flags win over the file, the file over the
/// environment
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Options file (.yaml, .yml, .json or .toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Access-Control-Allow-Origin value
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Access-Control-Allow-Methods value
    #[arg(long, global = true)]
    pub methods: Option<String>,

    /// Access-Control-Allow-Headers value
    #[arg(long, global = true)]
    pub headers: Option<String>,
}

impl OptionArgs {
    fn overrides(&self) -> PartialOptions {
        PartialOptions {
            origin: self.origin.clone(),
            methods: self.methods.clone(),
            headers: self.headers.clone(),
        }
    }

    /// Resolve defaults, environment, file and flags into options
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be loaded or a value is blank.
    pub fn resolve(&self) -> Result<CorsOptions> {
        self.resolve_with(env_lookup)
    }

    /// [`OptionArgs::resolve`] with the environment read through `env`
    ///
    /// # Errors
    ///
    /// As [`OptionArgs::resolve`].
    pub fn resolve_with<F>(&self, env: F) -> Result<CorsOptions>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_options_with(env, self.config.as_deref(), &self.overrides())
            .context("Failed to resolve CORS options")
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the three CORS headers every wrapped response carries
    Headers,
    /// Print the synthesized preflight response as JSON
    Preflight,
    /// Validate the options and print them as JSON
    Check,
    /// Wrap a described route table and print the resulting entries
    ///
    /// Each `--route` is `PATH` (one handler for every method),
    /// `PATH=static` (static response) or `PATH=GET,POST,...` (method map).
    Inspect {
        /// Route description, repeatable
        #[arg(short, long = "route", value_parser = parse_route_spec, required = true)]
        routes: Vec<RouteSpec>,

        /// Extra methods admitted into method maps (comma-separated)
        #[arg(long, value_delimiter = ',')]
        allow_method: Vec<String>,
    },
}

/// One `--route` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: String,
    pub kind: RouteSpecKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSpecKind {
    Handler,
    Static,
    Methods(Vec<Method>),
}

/// Parse `PATH`, `PATH=static` or `PATH=GET,POST`
///
/// # Errors
///
/// Rejects empty paths and invalid method tokens.
pub fn parse_route_spec(raw: &str) -> Result<RouteSpec, String> {
    let (path, rest) = match raw.split_once('=') {
        Some((path, rest)) => (path.trim(), Some(rest.trim())),
        None => (raw.trim(), None),
    };
    if path.is_empty() {
        return Err(format!("route '{raw}' has an empty path"));
    }

    let kind = match rest {
        None => RouteSpecKind::Handler,
        Some(r) if r.eq_ignore_ascii_case("static") => RouteSpecKind::Static,
        Some(r) => {
            let methods = r
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(|m| {
                    Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                        .map_err(|_| format!("invalid method '{m}' in route '{raw}'"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            RouteSpecKind::Methods(methods)
        }
    };

    Ok(RouteSpec {
        path: path.to_string(),
        kind,
    })
}

fn build_table(routes: &[RouteSpec]) -> RouteTable {
    routes
        .iter()
        .map(|spec| {
            let entry = match &spec.kind {
                RouteSpecKind::Handler => {
                    RouteEntry::Handler(sync_handler(|_| HandlerResponse::empty(200)))
                }
                RouteSpecKind::Static => RouteEntry::Static(HandlerResponse::empty(200)),
                RouteSpecKind::Methods(methods) => RouteEntry::methods(
                    methods
                        .iter()
                        .map(|m| (m.clone(), sync_handler(|_| HandlerResponse::empty(200)))),
                ),
            };
            (spec.path.clone(), entry)
        })
        .collect()
}

/// Run the CLI, writing results to stdout
///
/// # Errors
///
/// Propagates option resolution and output errors.
pub fn run_cli(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_cli_with_writer(cli, &mut out)
}

/// Run the CLI, writing results to `out`
///
/// # Errors
///
/// Propagates option resolution and output errors.
pub fn run_cli_with_writer<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    run_cli_with_env(cli, env_lookup, out)
}

/// Run the CLI with the environment read through `env`, writing results to `out`
///
/// # Errors
///
/// Propagates option resolution and output errors.
pub fn run_cli_with_env<W, F>(cli: Cli, env: F, out: &mut W) -> Result<()>
where
    W: Write,
    F: Fn(&str) -> Option<String>,
{
    let options = cli.options.resolve_with(env)?;
    let wrapper = CorsWrapper::new(options.clone());

    match cli.command {
        Commands::Headers => {
            for (name, value) in wrapper.header_set().pairs() {
                writeln!(out, "{name}: {value}")?;
            }
        }
        Commands::Preflight => {
            let response = wrapper.header_set().preflight_response();
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
        Commands::Check => {
            serde_json::to_writer_pretty(&mut *out, &options)?;
            writeln!(out)?;
            info!(origin = %options.origin, "CORS options are valid");
        }
        Commands::Inspect {
            routes,
            allow_method,
        } => {
            let mut methods = MethodSet::standard();
            for name in allow_method.iter().map(|m| m.trim()).filter(|m| !m.is_empty()) {
                let method = Method::from_bytes(name.to_ascii_uppercase().as_bytes())
                    .with_context(|| format!("invalid method '{name}'"))?;
                methods = methods.with(method);
            }
            let wrapped = wrapper.with_route_methods(methods).wrap(build_table(&routes));

            for path in wrapped.paths() {
                let Some(entry) = wrapped.get(path) else {
                    continue;
                };
                match entry {
                    RouteEntry::Methods(_) => {
                        writeln!(out, "{path}\tmethods\t{}", entry.method_names().join(", "))?
                    }
                    RouteEntry::Handler(_) | RouteEntry::Static(_) => {
                        writeln!(out, "{path}\t{}\t*", entry.kind())?
                    }
                }
            }
        }
    }

    Ok(())
}
