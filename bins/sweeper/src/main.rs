//! Expiry sweep daemon for Bahi.
//!
//! Periodically expires HELD number reservations past their TTL and
//! releases stale funds holds, so abandoned previews never lock numbers
//! or headroom indefinitely.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bahi_db::{connect, SweepService};
use bahi_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bahi=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let db = connect(&config.database).await?;
    info!("Connected to database");

    let sweeper = SweepService::new(db);
    let interval = Duration::from_secs(config.sweep.interval_secs);
    info!(interval_secs = config.sweep.interval_secs, "Sweep loop starting");

    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        if let Err(err) = sweeper.run_once().await {
            tracing::error!(error = %err, "sweep pass failed");
        }
    }
}
