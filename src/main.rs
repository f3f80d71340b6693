//! askbase - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use askbase::{
    cli::{commands, Args},
    config::Config,
};

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone()).context("Failed to load configuration")?;
    if let Some(path) = &args.history_file {
        config.paths.history_file = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &args.corpus {
        config.paths.corpus_file = Some(path.to_string_lossy().into_owned());
    }

    init_logging(args.log_level_override().unwrap_or(config.logging.level.as_str()));

    commands::run(&args.command, &config)
}
