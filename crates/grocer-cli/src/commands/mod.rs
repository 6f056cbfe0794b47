//! Subcommand implementations.

pub mod batch;
pub mod categorize;
pub mod config;
pub mod scan;

use std::path::Path;

use grocer_core::GrocerConfig;
use tracing::debug;

/// Load the config named on the command line, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GrocerConfig> {
    if let Some(path) = config_path {
        return Ok(GrocerConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(GrocerConfig::from_file(&default_path)?)
    } else {
        Ok(GrocerConfig::default())
    }
}
