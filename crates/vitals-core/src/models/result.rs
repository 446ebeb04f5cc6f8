// ABOUTME: Chart computation output contract consumed by the rendering layer
// ABOUTME: ChartComputationResult, per-series results, tick intervals and distribution summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use crate::constants::tick_thresholds::{DAILY_MAX_DAYS, HOURLY_MAX_DAYS, WEEKLY_MAX_DAYS};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Axis tick spacing suggested to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickInterval {
    /// One tick per hour
    Hourly,
    /// One tick per day
    Daily,
    /// One tick per week
    Weekly,
    /// One tick per month
    Monthly,
}

impl TickInterval {
    /// Pick an interval from the span covered by `first..=last`
    #[must_use]
    pub fn for_span(first: NaiveDateTime, last: NaiveDateTime) -> Self {
        let days = (last - first).num_days().abs();
        if days <= HOURLY_MAX_DAYS {
            Self::Hourly
        } else if days <= DAILY_MAX_DAYS {
            Self::Daily
        } else if days <= WEEKLY_MAX_DAYS {
            Self::Weekly
        } else {
            Self::Monthly
        }
    }

    /// Interval for an ordered timestamp list, daily when empty
    #[must_use]
    pub fn for_timestamps(timestamps: &[NaiveDateTime]) -> Self {
        match (timestamps.first(), timestamps.last()) {
            (Some(first), Some(last)) => Self::for_span(*first, *last),
            _ => Self::Daily,
        }
    }
}

/// Inclusive bounds of the request a result was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Lower bound
    pub from: NaiveDateTime,
    /// Upper bound (end of day)
    pub to: NaiveDateTime,
}

/// One metric of a multi-metric chart, aligned to the shared timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResult {
    /// Stable identifier (metric id or subtype)
    pub series_id: String,
    /// Label shown in the legend
    pub display_name: String,
    /// Shared timeline
    pub timestamps: Vec<NaiveDateTime>,
    /// Forward-filled raw values
    pub raw_values: Vec<f64>,
    /// Moving average of `raw_values`
    pub smoothed_values: Vec<f64>,
    /// Unit label
    pub unit: Option<String>,
}

/// Calendar partition used by a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Seven buckets, Monday first
    DayOfWeek,
    /// Twenty-four buckets, midnight first
    HourOfDay,
}

/// One uniform-width value interval of a frequency histogram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueInterval {
    /// Lower bound, always inclusive
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Only the last interval includes its upper bound
    pub upper_inclusive: bool,
}

impl ValueInterval {
    /// Whether `value` falls in this interval
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if self.upper_inclusive {
            value >= self.lower && value <= self.upper
        } else {
            value >= self.lower && value < self.upper
        }
    }
}

/// Bucketed min/max/range summary plus per-bucket value histograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    /// Bucket partition
    pub kind: BucketKind,
    /// Label per bucket (`Monday`, `00:00`, ...)
    pub bucket_labels: Vec<String>,
    /// Minimum per bucket, NaN for empty buckets
    pub mins: Vec<f64>,
    /// Maximum per bucket, NaN for empty buckets
    pub maxs: Vec<f64>,
    /// `max - min` per bucket, NaN for empty buckets
    pub ranges: Vec<f64>,
    /// Number of values per bucket
    pub counts: Vec<usize>,
    /// Minimum across all buckets
    pub global_min: f64,
    /// Maximum across all buckets
    pub global_max: f64,
    /// Histogram intervals spanning `[global_min, global_max]`
    pub intervals: Vec<ValueInterval>,
    /// `frequencies[bucket][interval]` value counts
    pub frequencies: Vec<Vec<u32>>,
}

/// Canonical output of every computation strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartComputationResult {
    /// Shared x-axis
    pub timestamps: Vec<NaiveDateTime>,
    /// Primary metric values
    pub primary_raw_values: Vec<f64>,
    /// Secondary metric values, when the chart has two metrics
    pub secondary_raw_values: Option<Vec<f64>>,
    /// Smoothed primary values
    pub primary_smoothed: Vec<f64>,
    /// Smoothed secondary values
    pub secondary_smoothed: Option<Vec<f64>>,
    /// Populated instead of the primary/secondary slots for 3+ metrics
    pub series: Option<Vec<SeriesResult>>,
    /// Suggested axis tick spacing
    pub tick_interval: TickInterval,
    /// Request bounds
    pub date_range: DateRange,
    /// Unit label, shared or compound
    pub unit: Option<String>,
    /// Bucket summary for distribution strategies
    pub distribution: Option<DistributionResult>,
}

impl ChartComputationResult {
    /// Single-series result
    #[must_use]
    pub fn single(
        timestamps: Vec<NaiveDateTime>,
        raw: Vec<f64>,
        smoothed: Vec<f64>,
        date_range: DateRange,
        unit: Option<String>,
    ) -> Self {
        let tick_interval = TickInterval::for_timestamps(&timestamps);
        Self {
            timestamps,
            primary_raw_values: raw,
            secondary_raw_values: None,
            primary_smoothed: smoothed,
            secondary_smoothed: None,
            series: None,
            tick_interval,
            date_range,
            unit,
            distribution: None,
        }
    }

    /// Two-series result sharing one timeline
    #[must_use]
    pub fn pair(
        timestamps: Vec<NaiveDateTime>,
        primary: (Vec<f64>, Vec<f64>),
        secondary: (Vec<f64>, Vec<f64>),
        date_range: DateRange,
        unit: Option<String>,
    ) -> Self {
        let mut result = Self::single(timestamps, primary.0, primary.1, date_range, unit);
        result.secondary_raw_values = Some(secondary.0);
        result.secondary_smoothed = Some(secondary.1);
        result
    }

    /// Multi-series result; primary slots stay empty
    #[must_use]
    pub fn multi(
        timestamps: Vec<NaiveDateTime>,
        series: Vec<SeriesResult>,
        date_range: DateRange,
        unit: Option<String>,
    ) -> Self {
        let mut result = Self::single(timestamps, Vec::new(), Vec::new(), date_range, unit);
        result.series = Some(series);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_tick_interval_thresholds() {
        let s = start();
        assert_eq!(TickInterval::for_span(s, s + Duration::hours(30)), TickInterval::Hourly);
        assert_eq!(TickInterval::for_span(s, s + Duration::days(30)), TickInterval::Daily);
        assert_eq!(TickInterval::for_span(s, s + Duration::days(200)), TickInterval::Weekly);
        assert_eq!(TickInterval::for_span(s, s + Duration::days(800)), TickInterval::Monthly);
        assert_eq!(TickInterval::for_timestamps(&[]), TickInterval::Daily);
    }

    #[test]
    fn test_value_interval_bounds() {
        let half_open = ValueInterval { lower: 0.0, upper: 10.0, upper_inclusive: false };
        let closed = ValueInterval { lower: 10.0, upper: 20.0, upper_inclusive: true };
        assert!(half_open.contains(0.0));
        assert!(!half_open.contains(10.0));
        assert!(closed.contains(10.0));
        assert!(closed.contains(20.0));
        assert!(!closed.contains(20.000_001));
    }
}
