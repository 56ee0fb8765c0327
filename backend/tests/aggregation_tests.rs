//! Aggregation integration tests
//!
//! Tests for the forecast aggregation queries including:
//! - Latest-sample selection by insertion order
//! - Rolling-window averaging and rounding
//! - Top-N ranking by global mean temperature

use chrono::NaiveDate;
use proptest::prelude::*;

use shared::aggregate::{
    latest_per_day, rank_by_mean_temperature, rolling_averages, round2, SampleRecord,
    DEFAULT_WINDOW,
};

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset as i64)
}

/// Build id-ordered records from (location_id, day offset, temperature)
fn records(rows: &[(i64, u32, f64)]) -> Vec<SampleRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, (location_id, offset, temperature))| SampleRecord {
            id: index as i64 + 1,
            location_id: *location_id,
            location: format!("loc-{}", location_id),
            date: day(*offset),
            temperature: *temperature,
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A window larger than the group averages everything in the group
    #[test]
    fn test_window_larger_than_group() {
        let samples = records(&[(1, 0, 10.0), (1, 0, 20.0)]);
        let averages = rolling_averages(&samples, DEFAULT_WINDOW);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].average_temperature, 15.0);
    }

    /// Five samples for one day average only the three most recent
    #[test]
    fn test_window_drops_oldest_samples() {
        let samples = records(&[(1, 0, 1.0), (1, 0, 2.0), (1, 0, 30.0), (1, 0, 40.0), (1, 0, 50.0)]);
        let averages = rolling_averages(&samples, DEFAULT_WINDOW);
        assert_eq!(averages[0].average_temperature, 40.0);
    }

    /// Averages round half away from zero
    #[test]
    fn test_average_rounding_half_away_from_zero() {
        // mean of 2.0 and 2.25 is exactly 2.125
        let samples = records(&[(1, 0, 2.0), (1, 0, 2.25)]);
        let averages = rolling_averages(&samples, DEFAULT_WINDOW);
        assert_eq!(averages[0].average_temperature, 2.13);

        let samples = records(&[(1, 0, -2.0), (1, 0, -2.25)]);
        let averages = rolling_averages(&samples, DEFAULT_WINDOW);
        assert_eq!(averages[0].average_temperature, -2.13);
    }

    /// Results come out ordered by location id, then date
    #[test]
    fn test_results_ordered_by_location_then_date() {
        let samples = records(&[(2, 1, 20.0), (1, 1, 10.0), (2, 0, 21.0), (1, 0, 11.0)]);

        let latest = latest_per_day(&samples);
        let order: Vec<(String, NaiveDate)> = latest
            .iter()
            .map(|row| (row.location.clone(), row.date))
            .collect();
        assert_eq!(
            order,
            vec![
                ("loc-1".to_string(), day(0)),
                ("loc-1".to_string(), day(1)),
                ("loc-2".to_string(), day(0)),
                ("loc-2".to_string(), day(1)),
            ]
        );
    }

    /// Latest selection is per day, not across days
    #[test]
    fn test_latest_keeps_one_row_per_day() {
        let samples = records(&[(1, 0, 10.0), (1, 1, 11.0), (1, 0, 12.0)]);
        let latest = latest_per_day(&samples);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].date, day(0));
        assert_eq!(latest[0].temperature, 12.0);
        assert_eq!(latest[1].date, day(1));
        assert_eq!(latest[1].temperature, 11.0);
    }

    /// Ranking uses every sample a location ever recorded
    #[test]
    fn test_ranking_is_global_not_windowed() {
        // four samples for one day; a 3-sample window would see mean 30,
        // the global mean is 25
        let samples = records(&[(1, 0, 10.0), (1, 0, 20.0), (1, 0, 30.0), (1, 0, 40.0)]);
        let top = rank_by_mean_temperature(&samples, 1);
        assert_eq!(top[0].avg_temperature, 25.0);
    }

    /// Requesting more locations than exist returns them all
    #[test]
    fn test_ranking_truncates_to_available_locations() {
        let samples = records(&[(1, 0, 10.0), (2, 0, 20.0)]);
        let top = rank_by_mean_temperature(&samples, 5);
        assert_eq!(top.len(), 2);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating plausible Celsius temperatures
    fn temperature_strategy() -> impl Strategy<Value = f64> {
        -40.0..50.0f64
    }

    /// Strategy for generating sample sets over a few locations and days
    fn rows_strategy() -> impl Strategy<Value = Vec<(i64, u32, f64)>> {
        proptest::collection::vec((1i64..=4, 0u32..=6, temperature_strategy()), 0..40)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// One output row per distinct (location, date) pair
        #[test]
        fn prop_one_row_per_group(rows in rows_strategy()) {
            let samples = records(&rows);
            let mut groups: Vec<(i64, NaiveDate)> =
                samples.iter().map(|s| (s.location_id, s.date)).collect();
            groups.sort();
            groups.dedup();

            prop_assert_eq!(latest_per_day(&samples).len(), groups.len());
            prop_assert_eq!(rolling_averages(&samples, DEFAULT_WINDOW).len(), groups.len());
        }

        /// Every rolling average lies within the group's temperature range
        #[test]
        fn prop_average_bounded_by_extremes(rows in rows_strategy()) {
            let samples = records(&rows);
            for average in rolling_averages(&samples, DEFAULT_WINDOW) {
                let group: Vec<f64> = samples
                    .iter()
                    .filter(|s| s.location == average.location && s.date == average.date)
                    .map(|s| s.temperature)
                    .collect();
                let min = group.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = group.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                // rounding may push the mean past an extreme by half a cent
                prop_assert!(average.average_temperature >= min - 0.005);
                prop_assert!(average.average_temperature <= max + 0.005);
            }
        }

        /// The latest row for a group carries the highest-id temperature
        #[test]
        fn prop_latest_matches_highest_id(rows in rows_strategy()) {
            let samples = records(&rows);
            for latest in latest_per_day(&samples) {
                let expected = samples
                    .iter()
                    .filter(|s| s.location == latest.location && s.date == latest.date)
                    .max_by_key(|s| s.id)
                    .map(|s| s.temperature);
                prop_assert_eq!(Some(latest.temperature), expected);
            }
        }

        /// Top-N length is bounded by n and by the number of locations
        #[test]
        fn prop_top_n_bounded(rows in rows_strategy(), n in 1usize..=6) {
            let samples = records(&rows);
            let mut locations: Vec<i64> = samples.iter().map(|s| s.location_id).collect();
            locations.sort_unstable();
            locations.dedup();

            let top = rank_by_mean_temperature(&samples, n);
            prop_assert_eq!(top.len(), n.min(locations.len()));
        }

        /// Ranking is monotonically non-increasing
        #[test]
        fn prop_ranking_descending(rows in rows_strategy()) {
            let top = rank_by_mean_temperature(&records(&rows), usize::MAX);
            for pair in top.windows(2) {
                prop_assert!(pair[0].avg_temperature >= pair[1].avg_temperature);
            }
        }

        /// round2 stays within half a cent of its input
        #[test]
        fn prop_round2_close(value in -1000.0..1000.0f64) {
            prop_assert!((round2(value) - value).abs() <= 0.005 + 1e-9);
        }
    }
}
