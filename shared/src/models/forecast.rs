//! Aggregate forecast views served by the API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The most recently inserted sample for one (location, day) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatestForecast {
    pub location: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Rolling average over the most recent samples for one (location, day) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AverageForecast {
    pub location: String,
    pub date: NaiveDate,
    pub average_temperature: f64,
}

/// One entry of the top-N ranking by global average temperature
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopLocation {
    pub location: String,
    pub avg_temperature: f64,
}
