//! Route definitions for the Weather Forecast Service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Locations
        .route("/locations", get(handlers::list_locations))
        // Derived forecast views
        .route("/forecasts/latest", get(handlers::latest_forecasts))
        .route("/forecasts/averages", get(handlers::rolling_averages))
        // Rankings
        .route("/top/:metric", get(handlers::top_by_metric))
}
