//! Read-only aggregation service over stored forecasts

use chrono::NaiveDate;
use sqlx::SqlitePool;

use shared::aggregate::{self, SampleRecord};

use crate::error::{AppError, AppResult};
use crate::models::{AverageForecast, LatestForecast, Location, TopLocation};

/// Metrics the ranking query knows how to aggregate
const SUPPORTED_METRICS: &[&str] = &["temperature"];

/// Forecast aggregation service
#[derive(Clone)]
pub struct ForecastService {
    db: SqlitePool,
}

/// Joined sample row fetched for aggregation
#[derive(Debug, sqlx::FromRow)]
struct SampleRow {
    id: i64,
    location_id: i64,
    location: String,
    date: NaiveDate,
    temperature: f64,
}

impl From<SampleRow> for SampleRecord {
    fn from(row: SampleRow) -> Self {
        SampleRecord {
            id: row.id,
            location_id: row.location_id,
            location: row.location,
            date: row.date,
            temperature: row.temperature,
        }
    }
}

impl ForecastService {
    /// Create a new ForecastService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// All locations in insertion order
    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, name, latitude, longitude FROM locations ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(locations)
    }

    /// The most recently inserted sample for every (location, day) pair
    pub async fn latest_forecasts(&self) -> AppResult<Vec<LatestForecast>> {
        let samples = self.fetch_samples().await?;
        Ok(aggregate::latest_per_day(&samples))
    }

    /// Rolling averages over the `window` most recent samples per
    /// (location, day) pair
    pub async fn rolling_averages(&self, window: usize) -> AppResult<Vec<AverageForecast>> {
        if window == 0 {
            return Err(AppError::InvalidArgument(
                "window must be at least 1".to_string(),
            ));
        }

        let samples = self.fetch_samples().await?;
        Ok(aggregate::rolling_averages(&samples, window))
    }

    /// Top `n` locations ranked by the global average of `metric`
    pub async fn top_by_metric(&self, metric: &str, n: i64) -> AppResult<Vec<TopLocation>> {
        if !SUPPORTED_METRICS.contains(&metric) {
            return Err(AppError::UnsupportedMetric(metric.to_string()));
        }
        if n <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "n must be a positive integer, got {}",
                n
            )));
        }

        let samples = self.fetch_samples().await?;
        Ok(aggregate::rank_by_mean_temperature(&samples, n as usize))
    }

    /// One id-ordered fetch of every sample joined with its location name
    async fn fetch_samples(&self) -> AppResult<Vec<SampleRecord>> {
        let rows = sqlx::query_as::<_, SampleRow>(
            r#"
            SELECT f.id, f.location_id, l.name AS location, f.date, f.temperature
            FROM forecasts f
            JOIN locations l ON l.id = f.location_id
            ORDER BY f.id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SampleRecord::from).collect())
    }
}
