use clap::Parser;
use route_cors::cli::{run_cli, Cli};
use route_cors::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    run_cli(cli)
}
