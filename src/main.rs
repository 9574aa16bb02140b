mod classifier;
mod cli;
mod config;
mod converter;
mod document;
mod emitter;
mod error;
mod generator;
mod migrator;
mod model;
mod output;
mod parser;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::{info, LevelFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    output::print_banner();

    info!("Starting jenkins2gha");
    cli.execute()?;

    Ok(())
}
