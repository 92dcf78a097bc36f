//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use chargenav_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::errors;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "chargenav.toml";

/// Load layered configuration: file, then environment, then CLI overrides
pub fn load_config(
    explicit: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = resolve_config_path(explicit)? {
        tracing::debug!("Loading configuration from {}", path.display());
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}

/// An explicit path must exist; the default file is optional
fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(errors::config_file_not_found(&path.display().to_string()).into()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            Ok(default.is_file().then_some(default))
        }
    }
}
