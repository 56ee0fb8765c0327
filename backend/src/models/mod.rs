//! Database models for the Weather Forecast Service
//!
//! Re-exports the shared domain models and adds the database row types

use chrono::NaiveDate;
use serde::Serialize;

pub use shared::models::*;

/// A named geographic location
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One stored temperature sample for a location and calendar day
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ForecastSample {
    pub id: i64,
    pub location_id: i64,
    pub date: NaiveDate,
    pub temperature: f64,
}
