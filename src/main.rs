// file: src/main.rs
// version: 1.0.0
// guid: 7c550391-70c9-484f-ba0b-c2d3ec0c7ce1

//! sidechain-scripts - main entry point

use anyhow::Context;
use clap::Parser;
use sidechain_scripts::{
    cli::{execute, resolve_config, Cli},
    logging::logger,
    Network, Outcome,
};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging = if cli.log_json {
        logger::init_json_logger(cli.verbose, cli.quiet)
    } else {
        logger::init_logger(cli.verbose, cli.quiet)
    };
    logging.context("initializing logging")?;

    let outcome = match resolve_config(&cli) {
        Ok(config) => {
            debug!("Network: {}", Network::from(&config.network));
            execute(cli.command, &config)
        }
        Err(e) => Outcome::from(Err::<serde_json::Value, _>(e)),
    };

    println!("{}", outcome.to_json().context("rendering result")?);

    if !outcome.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
