//! HTTP handlers for forecast query endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use shared::aggregate::DEFAULT_WINDOW;

use crate::error::AppResult;
use crate::models::{AverageForecast, LatestForecast, Location, TopLocation};
use crate::services::ForecastService;
use crate::AppState;

/// Default ranking size when the query string omits `n`
const DEFAULT_TOP_N: i64 = 3;

/// List all known locations
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    let service = ForecastService::new(state.db);
    let locations = service.list_locations().await?;
    Ok(Json(locations))
}

/// Latest stored forecast for every (location, day) pair
pub async fn latest_forecasts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LatestForecast>>> {
    let service = ForecastService::new(state.db);
    let forecasts = service.latest_forecasts().await?;
    Ok(Json(forecasts))
}

/// Rolling averages over the most recent samples per (location, day) pair
pub async fn rolling_averages(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AverageForecast>>> {
    let service = ForecastService::new(state.db);
    let averages = service.rolling_averages(DEFAULT_WINDOW).await?;
    Ok(Json(averages))
}

/// Query parameters for the top-N ranking
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<i64>,
}

/// Top locations ranked by global average of the requested metric
pub async fn top_by_metric(
    State(state): State<AppState>,
    Path(metric): Path<String>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<Vec<TopLocation>>> {
    let service = ForecastService::new(state.db);
    let n = query.n.unwrap_or(DEFAULT_TOP_N);
    let top = service.top_by_metric(&metric, n).await?;
    Ok(Json(top))
}
