mod app;
mod formatters;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let cli = app::Cli::parse();

    // Initialize the logger; -v / -vv raise the default level, RUST_LOG wins
    app::init_logger(cli.verbose);

    info!("Starting query-bench");

    let result = app::run(cli);

    info!("query-bench finished");

    result
}
