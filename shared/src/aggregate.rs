//! Read-only aggregation over stored forecast samples
//!
//! All queries operate on a flat slice of joined sample records and never
//! mutate anything. Grouping and windowing are keyed on (location_id, date);
//! "latest" and "most recent" always mean highest insertion id, never
//! calendar recency or temperature value.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{AverageForecast, LatestForecast, TopLocation};

/// Number of most-recent samples included in a rolling average.
pub const DEFAULT_WINDOW: usize = 3;

/// One stored sample joined with its location name.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub id: i64,
    pub location_id: i64,
    pub location: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// For every distinct (location, date) pair, the sample with the highest id.
///
/// Results are ordered by (location id, date).
pub fn latest_per_day(samples: &[SampleRecord]) -> Vec<LatestForecast> {
    let mut latest: BTreeMap<(i64, NaiveDate), &SampleRecord> = BTreeMap::new();
    for sample in samples {
        latest
            .entry((sample.location_id, sample.date))
            .and_modify(|current| {
                if sample.id > current.id {
                    *current = sample;
                }
            })
            .or_insert(sample);
    }

    latest
        .into_values()
        .map(|sample| LatestForecast {
            location: sample.location.clone(),
            date: sample.date,
            temperature: sample.temperature,
        })
        .collect()
}

/// Mean of the up-to-`window` most recently inserted samples for each
/// (location, date) pair, rounded to two decimals.
///
/// Groups with fewer than `window` samples average whatever exists, so a
/// single sample averages to itself. `window` must be at least 1. Results
/// are ordered by (location id, date).
pub fn rolling_averages(samples: &[SampleRecord], window: usize) -> Vec<AverageForecast> {
    let mut groups: BTreeMap<(i64, NaiveDate), Vec<&SampleRecord>> = BTreeMap::new();
    for sample in samples {
        groups
            .entry((sample.location_id, sample.date))
            .or_default()
            .push(sample);
    }

    groups
        .into_iter()
        .map(|((_, date), mut group)| {
            group.sort_by_key(|sample| sample.id);
            let recent: Vec<f64> = group
                .iter()
                .rev()
                .take(window)
                .map(|sample| sample.temperature)
                .collect();
            let mean = recent.iter().sum::<f64>() / recent.len() as f64;
            AverageForecast {
                location: group[0].location.clone(),
                date,
                average_temperature: round2(mean),
            }
        })
        .collect()
}

/// Locations ranked descending by the mean of all their samples, truncated
/// to the top `n`. Ties keep location id order.
pub fn rank_by_mean_temperature(samples: &[SampleRecord], n: usize) -> Vec<TopLocation> {
    let mut totals: BTreeMap<i64, (String, f64, usize)> = BTreeMap::new();
    for sample in samples {
        let entry = totals
            .entry(sample.location_id)
            .or_insert_with(|| (sample.location.clone(), 0.0, 0));
        entry.1 += sample.temperature;
        entry.2 += 1;
    }

    let mut ranked: Vec<(String, f64)> = totals
        .into_values()
        .map(|(location, sum, count)| (location, sum / count as f64))
        .collect();
    // stable sort, so equal means keep location id order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(n)
        .map(|(location, mean)| TopLocation {
            location,
            avg_temperature: round2(mean),
        })
        .collect()
}
