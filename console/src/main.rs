//! Coworking reservations console.

use anyhow::Context;
use coworking_console::{Config, app};
use coworking_core::SystemClock;
use coworking_service::metrics::register_business_metrics;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env too, so RUST_LOG set there applies to the subscriber below.
    let config = Config::from_env().context("Invalid configuration")?;

    // Logs go to stderr; stdout belongs to the menu.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coworking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    register_business_metrics();

    info!(
        storage = %config.storage,
        management_policy = %config.management_policy,
        seed_demo_data = config.seed_demo_data,
        "Configuration loaded"
    );

    app::run(
        &config,
        Arc::new(SystemClock),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}
