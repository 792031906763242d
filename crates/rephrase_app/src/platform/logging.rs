//! Platform logging initialization for the rephrase client.
//!
//! The terminal belongs to the UI, so logs go to a file. If the file cannot
//! be created logging stays disabled and a warning is printed before the UI
//! takes over the screen.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

pub fn initialize(log_file: &Path, level: LevelFilter) {
    let file = match File::create(log_file) {
        Ok(file) => file,
        Err(err) => {
            eprintln!(
                "Warning: Could not create log file at {:?}: {}",
                log_file, err
            );
            return;
        }
    };

    let _ = WriteLogger::init(level, build_config(), file);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("rephrase")
        .build()
}
