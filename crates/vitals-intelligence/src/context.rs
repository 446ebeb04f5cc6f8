// ABOUTME: Per-request chart data context holding raw inputs, metadata and aligned arrays
// ABOUTME: Built once by ChartDataContextBuilder and read by strategy construction and parity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Chart Data Context
//!
//! One [`ChartDataContext`] is built per chart request. It keeps both raw
//! representations of every metric so either data path can be served from
//! the same context, and it precomputes the daily-aligned arrays for the
//! path it was built from:
//!
//! - unified timeline, aligned raw and smoothed values per metric
//! - difference, zero-safe ratio and normalized pair for the first two metrics
//!
//! The context is never mutated after `build`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use vitals_core::errors::{AppError, AppResult};
use vitals_core::models::{CanonicalMetricSeries, DateRange, LegacyRecord, TimedValue};

use crate::alignment::TimeAlignment;
use crate::config::ComputationConfig;
use crate::derived::{DerivedSeriesMath, NormalizationMode};
use crate::smoothing::smooth;
use crate::strategies::input::request_range;
use crate::strategies::{DataPath, SeriesInput, StrategyInput, StrategyRequest};
use crate::transform::TransformExpression;

/// Both representations of one requested metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInputs {
    /// Stable identifier (subtype or metric id)
    pub series_id: String,
    /// Legend label, defaults to `series_id`
    #[serde(default)]
    pub display_name: Option<String>,
    /// Unit label overriding whatever the data records
    #[serde(default)]
    pub unit: Option<String>,
    /// Legacy records
    #[serde(default)]
    pub legacy: Vec<LegacyRecord>,
    /// Canonical series, when migrated
    #[serde(default)]
    pub cms: Option<CanonicalMetricSeries>,
}

impl MetricInputs {
    /// Metric with legacy records only
    #[must_use]
    pub fn legacy(series_id: impl Into<String>, records: Vec<LegacyRecord>) -> Self {
        Self {
            series_id: series_id.into(),
            display_name: None,
            unit: None,
            legacy: records,
            cms: None,
        }
    }

    /// Metric available in both representations, legacy records derived from the series
    #[must_use]
    pub fn from_cms(series_id: impl Into<String>, series: CanonicalMetricSeries) -> Self {
        Self {
            series_id: series_id.into(),
            display_name: None,
            unit: series.unit.clone(),
            legacy: series.to_legacy_records(),
            cms: Some(series),
        }
    }

    /// Set the legend label
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Legend label
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.series_id)
    }

    /// Input for `path`, `None` when the CMS representation is missing
    #[must_use]
    pub fn strategy_input(&self, path: DataPath) -> Option<StrategyInput> {
        let data = match path {
            DataPath::Legacy => SeriesInput::Legacy(self.legacy.clone()),
            DataPath::Cms => SeriesInput::Cms(self.cms.clone()?),
        };
        let unit = self
            .unit
            .clone()
            .or_else(|| data.recorded_unit().map(str::to_owned));
        Some(StrategyInput {
            series_id: self.series_id.clone(),
            display_name: self.label().to_owned(),
            unit,
            data,
        })
    }
}

/// Request-level chart metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    /// Metric family, e.g. `heart_rate`
    pub metric_type: String,
    /// Primary subtype, if any
    #[serde(default)]
    pub primary_subtype: Option<String>,
    /// Secondary subtype, if any
    #[serde(default)]
    pub secondary_subtype: Option<String>,
    /// Window lower bound
    pub from: NaiveDateTime,
    /// Window upper bound (the whole day is included)
    pub to: NaiveDateTime,
    /// Normalization override
    #[serde(default)]
    pub normalization_mode: Option<NormalizationMode>,
    /// Expression for transform charts
    #[serde(default)]
    pub transform: Option<TransformExpression>,
}

/// Immutable per-request aggregate
#[derive(Debug, Clone)]
pub struct ChartDataContext {
    /// Correlates log lines and errors of one request
    pub request_id: Uuid,
    /// Request metadata
    pub metadata: ChartMetadata,
    /// Metrics in request order, primary first
    pub metrics: Vec<MetricInputs>,
    /// Path the aligned arrays were computed from
    pub source: DataPath,
    /// Legend label per metric
    pub display_labels: Vec<String>,
    /// Unit per metric
    pub units: Vec<Option<String>>,
    /// Distinct recording days across all metrics
    pub timeline: Vec<NaiveDate>,
    /// Forward-filled values per metric on `timeline`
    pub aligned_raw: Vec<Vec<f64>>,
    /// Moving average of `aligned_raw`
    pub smoothed: Vec<Vec<f64>>,
    /// `primary - secondary` on `timeline`
    pub difference: Option<Vec<f64>>,
    /// `primary / secondary` with the configured zero sentinel
    pub ratio: Option<Vec<f64>>,
    /// Normalized primary and secondary
    pub normalized: Option<(Vec<f64>, Vec<f64>)>,
}

impl ChartDataContext {
    /// Request window, `None` when empty
    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        request_range(self.metadata.from, self.metadata.to)
    }

    /// CMS series per metric, `None` where not migrated
    #[must_use]
    pub fn cms_series(&self) -> Vec<Option<&CanonicalMetricSeries>> {
        self.metrics.iter().map(|metric| metric.cms.as_ref()).collect()
    }

    /// Strategy request reading from `path`
    ///
    /// # Errors
    ///
    /// Returns an input error when `path` is CMS and a metric has no CMS series
    pub fn strategy_request(&self, path: DataPath) -> AppResult<StrategyRequest> {
        let inputs = self
            .metrics
            .iter()
            .map(|metric| {
                metric.strategy_input(path).ok_or_else(|| {
                    AppError::invalid_input(format!(
                        "Metric '{}' has no canonical series for the CMS path",
                        metric.series_id
                    ))
                    .with_request_id(self.request_id)
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(StrategyRequest {
            inputs,
            from: self.metadata.from,
            to: self.metadata.to,
            normalization_mode: self.metadata.normalization_mode,
            transform: self.metadata.transform.clone(),
        })
    }
}

/// Builder for [`ChartDataContext`]
#[derive(Debug, Clone)]
pub struct ChartDataContextBuilder {
    request_id: Uuid,
    metadata: ChartMetadata,
    metrics: Vec<MetricInputs>,
    source: DataPath,
}

impl ChartDataContextBuilder {
    /// Start a context for `metadata`
    #[must_use]
    pub fn new(metadata: ChartMetadata) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            metadata,
            metrics: Vec::new(),
            source: DataPath::Legacy,
        }
    }

    /// Use a caller-supplied request id
    #[must_use]
    pub const fn request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Append a metric
    #[must_use]
    pub fn metric(mut self, metric: MetricInputs) -> Self {
        self.metrics.push(metric);
        self
    }

    /// Append several metrics
    #[must_use]
    pub fn metrics(mut self, metrics: impl IntoIterator<Item = MetricInputs>) -> Self {
        self.metrics.extend(metrics);
        self
    }

    /// Path the aligned arrays are computed from
    #[must_use]
    pub const fn source(mut self, source: DataPath) -> Self {
        self.source = source;
        self
    }

    /// Align the inputs and assemble the context
    ///
    /// # Errors
    ///
    /// Returns an input error when no metric was added or the source path is
    /// CMS and a metric has no CMS series
    pub fn build(self, config: &ComputationConfig) -> AppResult<ChartDataContext> {
        if self.metrics.is_empty() {
            return Err(AppError::invalid_input("A chart needs at least one metric")
                .with_request_id(self.request_id));
        }

        let mut context = ChartDataContext {
            request_id: self.request_id,
            display_labels: self.metrics.iter().map(|m| m.label().to_owned()).collect(),
            units: Vec::new(),
            metadata: self.metadata,
            metrics: self.metrics,
            source: self.source,
            timeline: Vec::new(),
            aligned_raw: Vec::new(),
            smoothed: Vec::new(),
            difference: None,
            ratio: None,
            normalized: None,
        };

        let request = context.strategy_request(self.source)?;
        context.units = request.inputs.iter().map(|input| input.unit.clone()).collect();

        let Some(range) = request.range() else {
            debug!(request_id = %context.request_id, "empty request window");
            return Ok(context);
        };
        let points: Vec<Vec<TimedValue>> = request
            .inputs
            .iter()
            .map(|input| input.points(&range))
            .collect();
        let slices: Vec<&[TimedValue]> = points.iter().map(Vec::as_slice).collect();

        context.timeline = TimeAlignment::build_unified_timeline(&slices);
        context.aligned_raw = points
            .iter()
            .map(|series| {
                TimeAlignment::align_values(series, &context.timeline, config.forward_fill_seed)
            })
            .collect();
        context.smoothed = context
            .aligned_raw
            .iter()
            .map(|values| smooth(values, config.smoothing_window))
            .collect();

        if let [primary, secondary, ..] = context.aligned_raw.as_slice() {
            context.difference = Some(DerivedSeriesMath::difference(primary, secondary));
            context.ratio = Some(DerivedSeriesMath::ratio(
                primary,
                secondary,
                config.ratio_zero_sentinel,
            ));
            let mode = context
                .metadata
                .normalization_mode
                .unwrap_or(config.default_normalization_mode);
            context.normalized = Some(DerivedSeriesMath::normalize_pair(primary, secondary, mode));
        }

        debug!(
            request_id = %context.request_id,
            source = %context.source,
            metrics = context.metrics.len(),
            days = context.timeline.len(),
            "built chart data context"
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, day)
            .and_then(|d| d.and_hms_opt(7, 0, 0))
            .unwrap()
    }

    fn metadata() -> ChartMetadata {
        ChartMetadata {
            metric_type: "body".to_owned(),
            primary_subtype: Some("weight".to_owned()),
            secondary_subtype: Some("fat".to_owned()),
            from: at(1),
            to: at(10),
            normalization_mode: None,
            transform: None,
        }
    }

    #[test]
    fn test_build_aligns_and_derives() {
        let weight = MetricInputs::legacy(
            "weight",
            vec![
                LegacyRecord::new(at(1), Some(80.0)),
                LegacyRecord::new(at(3), Some(79.0)),
            ],
        );
        let fat = MetricInputs::legacy("fat", vec![LegacyRecord::new(at(2), Some(20.0))])
            .with_display_name("Body fat");

        let context = ChartDataContextBuilder::new(metadata())
            .metric(weight)
            .metric(fat)
            .build(&ComputationConfig::default())
            .unwrap();

        assert_eq!(context.timeline.len(), 3);
        assert_eq!(context.aligned_raw[0], vec![80.0, 80.0, 79.0]);
        assert_eq!(context.aligned_raw[1], vec![0.0, 20.0, 20.0]);
        assert_eq!(context.difference.as_ref().unwrap()[2], 59.0);
        assert_eq!(context.ratio.as_ref().unwrap()[0], 0.0);
        assert_eq!(context.display_labels, vec!["weight", "Body fat"]);
    }

    #[test]
    fn test_build_requires_metrics() {
        let result = ChartDataContextBuilder::new(metadata()).build(&ComputationConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_cms_request_requires_cms_series() {
        let context = ChartDataContextBuilder::new(metadata())
            .metric(MetricInputs::legacy("weight", Vec::new()))
            .build(&ComputationConfig::default())
            .unwrap();
        assert!(context.strategy_request(DataPath::Legacy).is_ok());
        assert!(context.strategy_request(DataPath::Cms).is_err());
    }
}
