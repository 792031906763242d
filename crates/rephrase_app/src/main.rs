mod config;
mod platform;

use anyhow::Result;
use clap::Parser;

use config::{AppConfig, Cli, API_BASE_ENV};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli, std::env::var(API_BASE_ENV).ok())?;
    platform::logging::initialize(&config.log_file, config.log_level);
    platform::run_app(config)
}
