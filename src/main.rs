use std::path::PathBuf;

use anyhow::{Context, Result};
use weatherdesk::{WeatherDeskConfig, logging, web};

const CONFIG_PATH_ENV: &str = "WEATHERDESK_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = WeatherDeskConfig::load_from_path(config_path)
        .context("Failed to load configuration")?;

    logging::init(&config)?;
    tracing::info!(
        "Starting WeatherDesk {} (history: {}, snapshots: {})",
        weatherdesk::VERSION,
        config.history_file.display(),
        config.snapshot_dir.display()
    );

    web::run(config).await
}
