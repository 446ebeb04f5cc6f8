// ABOUTME: Multi-metric strategy aligning any number of series onto one daily timeline
// ABOUTME: Emits one SeriesResult per metric, all of equal length
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::models::{ChartComputationResult, SeriesResult, TimedValue};

use super::input::shared_unit;
use super::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};
use crate::alignment::TimeAlignment;
use crate::smoothing::smooth;

/// Three or more metrics on one shared timeline
///
/// A metric with no points in range is kept and filled with the seed value;
/// only a request where every metric is empty yields no chart.
pub struct MultiMetricStrategy {
    request: StrategyRequest,
    deps: StrategyDeps,
    path: DataPath,
}

impl MultiMetricStrategy {
    /// Bind the strategy to a request
    #[must_use]
    pub const fn new(request: StrategyRequest, deps: StrategyDeps, path: DataPath) -> Self {
        Self {
            request,
            deps,
            path,
        }
    }
}

impl ComputationStrategy for MultiMetricStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::MultiMetric
    }

    fn path(&self) -> DataPath {
        self.path
    }

    fn compute(&self) -> Option<ChartComputationResult> {
        let range = self.request.range()?;
        let points: Vec<Vec<TimedValue>> = self
            .request
            .inputs
            .iter()
            .map(|input| input.points(&range))
            .collect();
        if points.iter().all(Vec::is_empty) {
            return None;
        }

        let config = &self.deps.config;
        let slices: Vec<&[TimedValue]> = points.iter().map(Vec::as_slice).collect();
        let timeline = TimeAlignment::build_unified_timeline(&slices);
        let timestamps = TimeAlignment::timeline_timestamps(&timeline);

        let series: Vec<SeriesResult> = self
            .request
            .inputs
            .iter()
            .zip(&points)
            .map(|(input, series_points)| {
                let raw_values =
                    TimeAlignment::align_values(series_points, &timeline, config.forward_fill_seed);
                SeriesResult {
                    series_id: input.series_id.clone(),
                    display_name: input.display_name.clone(),
                    timestamps: timestamps.clone(),
                    smoothed_values: smooth(&raw_values, config.smoothing_window),
                    raw_values,
                    unit: input.unit.clone(),
                }
            })
            .collect();

        debug!(
            path = %self.path,
            series = series.len(),
            days = timeline.len(),
            "aligned multi-metric chart"
        );

        let unit = shared_unit(self.request.inputs.iter().map(|input| input.unit.as_deref()));
        Some(ChartComputationResult::multi(timestamps, series, range, unit))
    }
}
