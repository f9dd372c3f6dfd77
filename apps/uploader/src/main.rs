mod cli;
mod client;
mod config;
mod controller;
mod errors;
mod export;
mod models;
mod render;
mod session;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr so rendered results on stdout stay clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting uploader v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::from_config(config)?;
    cli::run(state).await
}
