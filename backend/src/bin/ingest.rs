//! Weather Forecast Service - batch ingestion entry point
//!
//! Fetches a 7-day forecast window for each seeded location and appends the
//! daily temperature samples to the store.

use chrono::{Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forecast_backend::config::Config;
use forecast_backend::db;
use forecast_backend::external::MeteomaticsClient;
use forecast_backend::services::ingest::{IngestService, LocationSeed};

/// Days covered by one ingestion run, endpoint dates inclusive.
const FORECAST_DAYS: i64 = 7;

/// Locations ingested on every run
fn seed_locations() -> Vec<LocationSeed> {
    vec![
        LocationSeed::new("Limassol", 34.7071, 33.0226),
        LocationSeed::new("Paphos", 34.7750, 32.4297),
        LocationSeed::new("Nicosia", 35.1856, 33.3823),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forecast_backend=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    if config.provider.username.is_empty() || config.provider.password.is_empty() {
        anyhow::bail!("provider credentials are not configured");
    }

    let db_pool = db::connect(&config.database).await?;
    db::init_schema(&db_pool).await?;

    let client = MeteomaticsClient::with_base_url(
        config.provider.username.clone(),
        config.provider.password.clone(),
        config.provider.base_url.clone(),
    );
    let service = IngestService::new(db_pool, client);

    let start = Utc::now().date_naive();
    let end = start + Duration::days(FORECAST_DAYS - 1);

    tracing::info!("Ingesting forecasts for {} through {}", start, end);
    let report = service.ingest(&seed_locations(), start, end).await?;

    for outcome in &report.succeeded {
        tracing::info!("{}: stored {} samples", outcome.location, outcome.samples);
    }
    for failure in &report.failed {
        tracing::warn!("{}: {}", failure.location, failure.reason);
    }

    tracing::info!(
        "Ingestion finished: {} succeeded, {} failed",
        report.succeeded.len(),
        report.failed.len()
    );

    Ok(())
}
