//! Business logic services for the Weather Forecast Service

pub mod forecast;
pub mod ingest;

pub use forecast::ForecastService;
pub use ingest::IngestService;
