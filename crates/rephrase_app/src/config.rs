//! Startup configuration: built-in defaults, an optional RON file, the
//! `REPHRASE_API_BASE` environment variable and CLI flags, applied in that
//! order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use rephrase_core::{StyleDescriptor, StyleSet};
use rephrase_engine::ClientSettings;
use serde::Deserialize;

pub const API_BASE_ENV: &str = "REPHRASE_API_BASE";

#[derive(Debug, Clone, Parser)]
#[command(name = "rephrase", version, about = "Rephrase text into several tones, streamed live")]
pub struct Cli {
    /// Backend base address, e.g. http://localhost:8000
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// RON file with `api_base` and `styles`
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level written to the log file
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: LevelFilter,

    /// Log file location
    #[arg(long, default_value = "rephrase.log", value_name = "PATH")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    api_base: Option<String>,
    styles: Option<Vec<StyleEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
struct StyleEntry {
    key: String,
    label: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
    pub styles: StyleSet,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Resolves the final configuration. `env_api_base` is the value of
    /// [`API_BASE_ENV`], passed in so callers control the environment.
    pub fn resolve(cli: &Cli, env_api_base: Option<String>) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };

        let styles = match file.styles {
            Some(entries) => StyleSet::new(
                entries
                    .into_iter()
                    .map(|entry| StyleDescriptor::new(entry.key, entry.label))
                    .collect(),
            )
            .context("invalid style list in config file")?,
            None => StyleSet::default(),
        };

        let api_base = cli
            .api_base
            .clone()
            .or(env_api_base.filter(|value| !value.trim().is_empty()))
            .or(file.api_base);
        let client = match api_base {
            Some(base) => ClientSettings::with_base(&base)
                .with_context(|| format!("invalid backend address {base:?}"))?,
            None => ClientSettings::default(),
        };

        Ok(Self {
            client,
            styles,
            log_level: cli.log_level,
            log_file: cli.log_file.clone(),
        })
    }
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}
