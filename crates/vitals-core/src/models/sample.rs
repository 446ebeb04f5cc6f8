// ABOUTME: Input data models for legacy records and Canonical Metric Series samples
// ABOUTME: Includes adapters converting between the two representations for parity runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// One sample of a canonical metric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Instant the sample was taken, with the offset it was recorded in
    pub timestamp: DateTime<FixedOffset>,
    /// Sample value, `None` when the source reported no reading
    pub value: Option<f64>,
}

impl MetricSample {
    /// Create a sample
    #[must_use]
    pub const fn new(timestamp: DateTime<FixedOffset>, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// Wall-clock time of the sample in its own offset
    ///
    /// This is the instant legacy records carry, so both paths compare
    /// the same local timestamps.
    #[must_use]
    pub fn local_timestamp(&self) -> NaiveDateTime {
        self.timestamp.naive_local()
    }

    /// Build a sample from a legacy record, interpreting its local time in `offset`
    #[must_use]
    pub fn from_legacy(record: &LegacyRecord, offset: FixedOffset) -> Option<Self> {
        offset
            .from_local_datetime(&record.timestamp)
            .single()
            .map(|timestamp| Self::new(timestamp, record.value))
    }
}

/// How the timestamps of a canonical series should be read
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSemantics {
    /// Point-in-time measurement
    #[default]
    Instant,
    /// Measurement covering an interval starting at the timestamp
    Interval,
    /// One aggregated value per calendar day
    DailyAggregate,
}

/// Quality tier assigned by the mapping stage
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricQuality {
    /// Mapped as-is from the source
    #[default]
    Raw,
    /// Passed range validation
    Validated,
    /// Computed from other series
    Derived,
}

/// Where a canonical series came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Originating provider (e.g. a wearable vendor)
    pub provider: Option<String>,
    /// Identifier of the source table or export the series was mapped from
    pub source_id: Option<String>,
}

/// Normalized, unit-tagged time series for one canonical metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMetricSeries {
    /// Canonical metric identifier, e.g. `weight.body_mass`
    pub metric_id: String,
    /// How timestamps are to be interpreted
    #[serde(default)]
    pub time_semantics: TimeSemantics,
    /// Samples; not guaranteed to be sorted
    pub samples: Vec<MetricSample>,
    /// Unit symbol, e.g. `kg`
    pub unit: Option<String>,
    /// Physical dimension, e.g. `mass`
    pub dimension: Option<String>,
    /// Source information
    #[serde(default)]
    pub provenance: Provenance,
    /// Quality tier
    #[serde(default)]
    pub quality: MetricQuality,
}

impl CanonicalMetricSeries {
    /// Create a raw-quality series with no dimension or provenance
    #[must_use]
    pub fn new(metric_id: impl Into<String>, unit: Option<String>, samples: Vec<MetricSample>) -> Self {
        Self {
            metric_id: metric_id.into(),
            time_semantics: TimeSemantics::default(),
            samples,
            unit,
            dimension: None,
            provenance: Provenance::default(),
            quality: MetricQuality::default(),
        }
    }

    /// Number of non-null samples whose local timestamp lies within `[from, to]`
    #[must_use]
    pub fn count_valid_in_range(&self, from: NaiveDateTime, to: NaiveDateTime) -> usize {
        self.samples
            .iter()
            .filter(|sample| sample.value.is_some())
            .filter(|sample| {
                let local = sample.local_timestamp();
                local >= from && local <= to
            })
            .count()
    }

    /// Flatten the series into equivalent legacy records
    #[must_use]
    pub fn to_legacy_records(&self) -> Vec<LegacyRecord> {
        self.samples
            .iter()
            .map(|sample| LegacyRecord {
                provider: self.provenance.provider.clone(),
                ..LegacyRecord::from_sample(sample, self.unit.clone())
            })
            .collect()
    }
}

/// Flat, denormalized health metric record from the legacy store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecord {
    /// Local timestamp
    pub timestamp: NaiveDateTime,
    /// Value, `None` when absent
    pub value: Option<f64>,
    /// Unit label, if recorded
    #[serde(default)]
    pub unit: Option<String>,
    /// Provider label, if recorded
    #[serde(default)]
    pub provider: Option<String>,
}

impl LegacyRecord {
    /// Record with only a timestamp and value
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value,
            unit: None,
            provider: None,
        }
    }

    /// Record equivalent to a CMS sample
    #[must_use]
    pub fn from_sample(sample: &MetricSample, unit: Option<String>) -> Self {
        Self {
            timestamp: sample.local_timestamp(),
            value: sample.value,
            unit,
            provider: None,
        }
    }
}

/// Representation-neutral point consumed by the computation core
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedValue {
    /// Local timestamp
    pub timestamp: NaiveDateTime,
    /// Value, `None` when absent
    pub value: Option<f64>,
}

impl TimedValue {
    /// Create a point
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }
}

impl From<&LegacyRecord> for TimedValue {
    fn from(record: &LegacyRecord) -> Self {
        Self::new(record.timestamp, record.value)
    }
}

impl From<&MetricSample> for TimedValue {
    fn from(sample: &MetricSample) -> Self {
        Self::new(sample.local_timestamp(), sample.value)
    }
}
