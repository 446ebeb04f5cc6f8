// ABOUTME: Timeline alignment for combining metric series recorded on different days
// ABOUTME: Builds unified daily timelines, forward-fills values and inner-joins exact timestamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;
use vitals_core::errors::{AppError, AppResult};
use vitals_core::models::TimedValue;

/// Timeline construction and value alignment
pub struct TimeAlignment;

impl TimeAlignment {
    /// Distinct calendar dates across all series, ascending
    #[must_use]
    pub fn build_unified_timeline(series_list: &[&[TimedValue]]) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = series_list
            .iter()
            .flat_map(|series| series.iter().map(|point| point.timestamp.date()))
            .collect();
        dates.into_iter().collect()
    }

    /// Align one series onto a daily timeline
    ///
    /// Each date takes the first value recorded on it (input order). Dates
    /// without a value repeat the last known value; dates before the first
    /// known value get `seed`. Points without a value are ignored.
    #[must_use]
    pub fn align_values(source: &[TimedValue], timeline: &[NaiveDate], seed: f64) -> Vec<f64> {
        let mut first_per_day: HashMap<NaiveDate, f64> = HashMap::with_capacity(source.len());
        for point in source {
            if let Some(value) = point.value {
                first_per_day.entry(point.timestamp.date()).or_insert(value);
            }
        }

        let mut last_known = seed;
        timeline
            .iter()
            .map(|date| {
                if let Some(value) = first_per_day.get(date) {
                    last_known = *value;
                }
                last_known
            })
            .collect()
    }

    /// Inner join on exact timestamps present in every series
    ///
    /// Output series are sorted by timestamp and have equal length; duplicate
    /// timestamps within one series keep the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns an input error when `series_list` is empty
    pub fn align_metrics_by_timestamp(
        series_list: &[Vec<TimedValue>],
    ) -> AppResult<Vec<Vec<TimedValue>>> {
        if series_list.is_empty() {
            return Err(AppError::invalid_input(
                "At least one metric series is required for timestamp alignment",
            ));
        }

        let indexed: Vec<BTreeMap<NaiveDateTime, TimedValue>> = series_list
            .iter()
            .map(|series| {
                let mut by_time = BTreeMap::new();
                for point in series {
                    by_time.entry(point.timestamp).or_insert(*point);
                }
                by_time
            })
            .collect();

        let common: Vec<NaiveDateTime> = indexed[0]
            .keys()
            .filter(|ts| indexed[1..].iter().all(|other| other.contains_key(ts)))
            .copied()
            .collect();

        debug!(
            series = series_list.len(),
            common_timestamps = common.len(),
            "aligned metrics by exact timestamp"
        );

        Ok(indexed
            .iter()
            .map(|by_time| {
                common
                    .iter()
                    .filter_map(|ts| by_time.get(ts).copied())
                    .collect()
            })
            .collect())
    }

    /// Midnight timestamps for a daily timeline
    #[must_use]
    pub fn timeline_timestamps(timeline: &[NaiveDate]) -> Vec<NaiveDateTime> {
        timeline
            .iter()
            .map(|date| date.and_time(NaiveTime::MIN))
            .collect()
    }
}

/// Last representable instant of the day containing `timestamp`
#[must_use]
pub fn end_of_day(timestamp: NaiveDateTime) -> NaiveDateTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
        .map_or(timestamp, |time| timestamp.date().and_time(time))
}
