// ABOUTME: Weekday and hour-of-day bucketing with per-bucket min/max/range and value histograms
// ABOUTME: Also maps bucket indices onto a synthetic timeline for parity comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;
use vitals_core::constants::buckets::{
    HOUR_BUCKETS, REFERENCE_MONDAY_DAY, REFERENCE_MONDAY_MONTH, REFERENCE_MONDAY_YEAR,
    WEEKDAY_BUCKETS,
};
use vitals_core::models::{BucketKind, DistributionResult, TimedValue, ValueInterval};

const WEEKDAY_LABELS: [&str; WEEKDAY_BUCKETS] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Number of buckets for a partition
#[must_use]
pub const fn bucket_count(kind: BucketKind) -> usize {
    match kind {
        BucketKind::DayOfWeek => WEEKDAY_BUCKETS,
        BucketKind::HourOfDay => HOUR_BUCKETS,
    }
}

/// Bucket of a local timestamp (Monday = 0, midnight = 0)
#[must_use]
pub fn bucket_index(kind: BucketKind, timestamp: NaiveDateTime) -> usize {
    match kind {
        BucketKind::DayOfWeek => timestamp.weekday().num_days_from_monday() as usize,
        BucketKind::HourOfDay => timestamp.hour() as usize,
    }
}

/// Display label of a bucket
#[must_use]
pub fn bucket_label(kind: BucketKind, index: usize) -> String {
    match kind {
        BucketKind::DayOfWeek => WEEKDAY_LABELS
            .get(index)
            .map_or_else(|| format!("Day {index}"), |label| (*label).to_owned()),
        BucketKind::HourOfDay => format!("{index:02}:00"),
    }
}

/// Synthetic timestamp of a bucket
///
/// Weekday `i` maps to the reference Monday plus `i` days, hour `h` to the
/// reference Monday at `h:00`.
#[must_use]
pub fn bucket_timestamp(kind: BucketKind, index: usize) -> NaiveDateTime {
    let monday = NaiveDate::from_ymd_opt(
        REFERENCE_MONDAY_YEAR,
        REFERENCE_MONDAY_MONTH,
        REFERENCE_MONDAY_DAY,
    )
    .unwrap_or(NaiveDate::MIN)
    .and_time(NaiveTime::MIN);
    let offset = i64::try_from(index).unwrap_or_default();
    match kind {
        BucketKind::DayOfWeek => monday + Duration::days(offset),
        BucketKind::HourOfDay => monday + Duration::hours(offset),
    }
}

/// Bucketing and histogram computations
pub struct DistributionCalculator;

impl DistributionCalculator {
    /// Values grouped by bucket; points without a value are skipped
    #[must_use]
    pub fn bucket_values(kind: BucketKind, points: &[TimedValue]) -> Vec<Vec<f64>> {
        let mut buckets = vec![Vec::new(); bucket_count(kind)];
        for point in points {
            if let Some(value) = point.value {
                buckets[bucket_index(kind, point.timestamp)].push(value);
            }
        }
        buckets
    }

    /// `count` uniform intervals over `[min, max]`
    ///
    /// Every interval is half-open except the last, which is closed so that
    /// `max` is counted. A zero-width range puts every value in the last interval.
    #[must_use]
    pub fn build_intervals(min: f64, max: f64, count: usize) -> Vec<ValueInterval> {
        let count = count.max(1);
        let width = (max - min) / count as f64;
        (0..count)
            .map(|i| {
                let last = i + 1 == count;
                ValueInterval {
                    lower: (i as f64).mul_add(width, min),
                    upper: if last {
                        max
                    } else {
                        ((i + 1) as f64).mul_add(width, min)
                    },
                    upper_inclusive: last,
                }
            })
            .collect()
    }

    /// Full bucket summary, `None` when no point carries a value
    #[must_use]
    pub fn summarize(
        kind: BucketKind,
        points: &[TimedValue],
        interval_count: usize,
    ) -> Option<DistributionResult> {
        let buckets = Self::bucket_values(kind, points);

        let mut mins = Vec::with_capacity(buckets.len());
        let mut maxs = Vec::with_capacity(buckets.len());
        let mut ranges = Vec::with_capacity(buckets.len());
        let mut counts = Vec::with_capacity(buckets.len());
        for values in &buckets {
            if values.is_empty() {
                mins.push(f64::NAN);
                maxs.push(f64::NAN);
                ranges.push(f64::NAN);
            } else {
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                mins.push(min);
                maxs.push(max);
                ranges.push(max - min);
            }
            counts.push(values.len());
        }

        let global_min = mins
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)?;
        let global_max = maxs
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)?;

        let intervals = Self::build_intervals(global_min, global_max, interval_count);
        let frequencies = buckets
            .iter()
            .map(|values| histogram(values, &intervals))
            .collect();

        debug!(
            kind = ?kind,
            values = counts.iter().sum::<usize>(),
            global_min,
            global_max,
            "computed bucket distribution"
        );

        Some(DistributionResult {
            kind,
            bucket_labels: (0..buckets.len()).map(|i| bucket_label(kind, i)).collect(),
            mins,
            maxs,
            ranges,
            counts,
            global_min,
            global_max,
            intervals,
            frequencies,
        })
    }
}

fn histogram(values: &[f64], intervals: &[ValueInterval]) -> Vec<u32> {
    let mut counts = vec![0_u32; intervals.len()];
    for value in values {
        if let Some(slot) = intervals.iter().position(|interval| interval.contains(*value)) {
            counts[slot] += 1;
        }
    }
    counts
}
