#![allow(non_snake_case)]

use std::env;

use roomBooker::cli;
use roomBooker::config::{AppConfig, ClientSettings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring unreadable config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    let settings = match ClientSettings::from_config(&config) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            std::process::exit(2);
        }
    };

    if let Err(e) = cli::cli(settings).await {
        eprintln!("Booking request failed: {}", e);
        std::process::exit(1);
    }
}
