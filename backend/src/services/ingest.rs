//! Forecast ingestion service
//!
//! Fetches provider time series for each configured location and appends the
//! returned samples to the store. Locations are created on first encounter;
//! re-ingesting a known name never updates its coordinates. Samples are
//! appended without deduplication, so repeated runs for the same day
//! accumulate rows.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::external::MeteomaticsClient;
use crate::models::{ForecastSample, Location};

/// A location to ingest, as configured by the operator
#[derive(Debug, Clone)]
pub struct LocationSeed {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationSeed {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }
}

/// Outcome of one ingestion batch
#[derive(Debug, Default)]
pub struct IngestReport {
    pub succeeded: Vec<IngestOutcome>,
    pub failed: Vec<IngestFailure>,
}

/// Samples stored for one location
#[derive(Debug)]
pub struct IngestOutcome {
    pub location: String,
    pub samples: usize,
}

/// Provider failure for one location
#[derive(Debug)]
pub struct IngestFailure {
    pub location: String,
    pub reason: String,
}

/// Forecast ingestion service
#[derive(Clone)]
pub struct IngestService {
    db: SqlitePool,
    client: MeteomaticsClient,
}

impl IngestService {
    /// Create a new IngestService instance
    pub fn new(db: SqlitePool, client: MeteomaticsClient) -> Self {
        Self { db, client }
    }

    /// Ingest the date range for every seed location.
    ///
    /// A provider failure skips that location and the batch continues; rows
    /// committed for earlier locations are never rolled back. Database
    /// errors abort the batch.
    pub async fn ingest(
        &self,
        seeds: &[LocationSeed],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<IngestReport> {
        let mut report = IngestReport::default();

        for seed in seeds {
            tracing::info!("Fetching forecast for {}...", seed.name);

            let series = match self
                .client
                .fetch_series(seed.latitude, seed.longitude, start, end)
                .await
            {
                Ok(series) => series,
                Err(err) => {
                    tracing::warn!("Skipping {}: {}", seed.name, err);
                    report.failed.push(IngestFailure {
                        location: seed.name.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let location = self
                .get_or_create_location(&seed.name, seed.latitude, seed.longitude)
                .await?;

            for sample in &series {
                self.insert_sample(location.id, sample.date, sample.temperature)
                    .await?;
            }

            report.succeeded.push(IngestOutcome {
                location: seed.name.clone(),
                samples: series.len(),
            });
        }

        Ok(report)
    }

    /// Look up a location by name, creating it when absent.
    ///
    /// Existing rows keep their stored coordinates. The UNIQUE(name)
    /// constraint plus the conflict-tolerant insert keep concurrent creation
    /// from producing duplicate rows.
    pub async fn get_or_create_location(
        &self,
        name: &str,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Location> {
        if let Some(location) = self.location_by_name(name).await? {
            return Ok(location);
        }

        sqlx::query(
            "INSERT INTO locations (name, latitude, longitude) VALUES (?1, ?2, ?3) \
             ON CONFLICT(name) DO NOTHING",
        )
        .bind(name)
        .bind(latitude)
        .bind(longitude)
        .execute(&self.db)
        .await?;

        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, latitude, longitude FROM locations WHERE name = ?1",
        )
        .bind(name)
        .fetch_one(&self.db)
        .await?;

        Ok(location)
    }

    /// Fetch a location by its unique name
    pub async fn location_by_name(&self, name: &str) -> AppResult<Option<Location>> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, name, latitude, longitude FROM locations WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(location)
    }

    /// Append one sample row; a (location, day) pair may accumulate multiple
    /// rows across runs
    pub async fn insert_sample(
        &self,
        location_id: i64,
        date: NaiveDate,
        temperature: f64,
    ) -> AppResult<ForecastSample> {
        let sample = sqlx::query_as::<_, ForecastSample>(
            "INSERT INTO forecasts (location_id, date, temperature) VALUES (?1, ?2, ?3) \
             RETURNING id, location_id, date, temperature",
        )
        .bind(location_id)
        .bind(date)
        .bind(temperature)
        .fetch_one(&self.db)
        .await?;

        Ok(sample)
    }
}
