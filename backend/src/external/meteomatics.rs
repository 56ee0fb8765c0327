//! Meteomatics API client for fetching forecast time series
//!
//! Requests daily 2-metre temperatures for a coordinate pair over a date
//! range and flattens the response into per-day samples.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Sampling interval requested from the API: one value per 24 hours.
const INTERVAL: &str = "PT24H";

/// Requested parameter: temperature two metres above ground, in Celsius.
const PARAMETER: &str = "t_2m:C";

/// Meteomatics API client
#[derive(Clone)]
pub struct MeteomaticsClient {
    client: Client,
    username: String,
    password: String,
    base_url: String,
}

/// One day of forecast data returned by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct DailySample {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Meteomatics time-series response
#[derive(Debug, Deserialize)]
struct SeriesResponse {
    data: Vec<ParameterSeries>,
}

#[derive(Debug, Deserialize)]
struct ParameterSeries {
    coordinates: Vec<CoordinateSeries>,
}

#[derive(Debug, Deserialize)]
struct CoordinateSeries {
    dates: Vec<DatedValue>,
}

#[derive(Debug, Deserialize)]
struct DatedValue {
    date: DateTime<Utc>,
    value: f64,
}

impl MeteomaticsClient {
    /// Create a new MeteomaticsClient
    pub fn new(username: String, password: String) -> Self {
        Self::with_base_url(username, password, "https://api.meteomatics.com".to_string())
    }

    /// Create a new MeteomaticsClient with custom base URL (for testing)
    pub fn with_base_url(username: String, password: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            username,
            password,
            base_url,
        }
    }

    /// Fetch one temperature sample per day for an inclusive date range
    pub async fn fetch_series(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailySample>> {
        let url = format!(
            "{}/{}T00:00:00Z--{}T00:00:00Z:{}/{}/{},{}/json",
            self.base_url, start, end, INTERVAL, PARAMETER, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!("{} - {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Provider(format!("failed to read response body: {}", e)))?;

        parse_series(&body)
    }
}

/// Parse a Meteomatics time-series payload into per-day samples.
///
/// The payload carries one parameter series with one coordinate series; a
/// body missing either is treated as malformed.
pub fn parse_series(body: &str) -> AppResult<Vec<DailySample>> {
    let response: SeriesResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Provider(format!("malformed response body: {}", e)))?;

    let coordinate = response
        .data
        .into_iter()
        .next()
        .and_then(|series| series.coordinates.into_iter().next())
        .ok_or_else(|| AppError::Provider("response contains no time series".to_string()))?;

    Ok(coordinate
        .dates
        .into_iter()
        .map(|entry| DailySample {
            date: entry.date.date_naive(),
            temperature: entry.value,
        })
        .collect())
}
