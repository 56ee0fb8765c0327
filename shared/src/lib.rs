//! Shared types and aggregation logic for the Weather Forecast Service
//!
//! This crate contains the domain models returned by the API and the pure
//! aggregation queries computed over stored forecast samples. It carries no
//! database or HTTP dependencies so the query logic can be tested in
//! isolation.

pub mod aggregate;
pub mod models;

pub use models::*;
