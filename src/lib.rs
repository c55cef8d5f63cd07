pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod sensor;
pub mod server;
pub mod target;
mod utils;
pub mod worker;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use analysis::{ResultCorrelator, TaskQueue};
use config::ServerConfig;
use db::Database;
use target::TargetSelector;

/// Shared state handed to every request handler.
///
/// Each in-memory resource carries its own lock; no handler ever holds two of
/// them at once, and none is held across a database call.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tasks: TaskQueue,
    pub results: ResultCorrelator,
    pub target: TargetSelector,
}

impl AppState {
    pub fn new(db: Database, default_target: impl Into<String>) -> Self {
        Self {
            db,
            tasks: TaskQueue::new(),
            results: ResultCorrelator::new(),
            target: TargetSelector::new(default_target),
        }
    }
}

pub fn run() -> Result<()> {
    let config = ServerConfig::parse();
    config.validate()?;

    // RUST_LOG wins over the configured level.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    info!("waterwatch starting up...");

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
    }
    let runtime = builder
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(serve(config))
}

async fn serve(config: ServerConfig) -> Result<()> {
    let database = Database::new(config.db.clone())?;
    info!(
        "Default target {}; database {}",
        config.default_target,
        config.db.display()
    );

    let state = AppState::new(database, config.default_target.clone());

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(err) => warn!("Failed to listen for shutdown signal: {err}"),
        }
    });

    server::serve(state, &config.bind, shutdown).await
}
