use aeye_server::{
    config::{self, Config},
    server,
};
use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Parses `server.logs.level`, which must be a plain level name.
fn configured_level(level: &str) -> Result<LevelFilter> {
    level.parse().map_err(|_| {
        anyhow::anyhow!(
            "server.logs.level '{}' is not one of error, warn, info, debug, trace, off",
            level
        )
    })
}

/// A `RUST_LOG` directive wins over the configured level.
fn log_filter(config: &Config) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = configured_level(&config.server.logs.level)?;
    Ok(EnvFilter::default().add_directive(level.into()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing is not installed yet, so config problems go to stderr
    let config = config::load()
        .await
        .context("Could not read server configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config)?)
        .json()
        .init();

    info!(
        mode = ?config.server.mode,
        model = %config.engine.model,
        backend = %config.engine.base_url,
        "A-Eye inference server starting"
    );

    // The engine is checked against the backend before the port is bound
    if let Err(e) = server::run(config).await {
        error!("Inference server stopped with error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
