mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::{debug, warn};

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

/// Reads `path`, falling back to built-in defaults when the file is absent.
pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    debug!("Loading configuration from: {}", path.display());

    if !tokio::fs::try_exists(path).await? {
        warn!(
            "Configuration file {} not found, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let config_str = tokio::fs::read_to_string(path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an all-defaults map.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.engine.model.trim().is_empty() {
        return Err(Error::config("engine.model must not be empty"));
    }

    for options in [&config.generation.text, &config.generation.vision] {
        if options.max_length == 0 {
            return Err(Error::config("generation max_length must be positive"));
        }
        if options.num_return_sequences == 0 {
            return Err(Error::config(
                "generation num_return_sequences must be positive",
            ));
        }
    }

    Ok(())
}
