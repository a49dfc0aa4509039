mod command;
pub mod config;
mod error;

use clap::Parser;
use config::{Arguments, Command};
use feedsift_common_logger::setup_logger;
use log::*;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let args = Arguments::parse();

    let filter_config = config::build_config(&args.config_dir)?;

    // Setup logger
    let _guard = setup_logger(&filter_config.logger)?;

    info!("Filter started with configuration from [{}]", args.config_dir);

    match args.command {
        Command::Check => command::check::check(&filter_config)?,
        Command::Evaluate { input } => {
            command::evaluate::evaluate(&filter_config, input.as_deref())?
        }
    };

    Ok(())
}
