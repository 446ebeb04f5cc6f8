// ABOUTME: Single-metric strategy: filtered, sorted samples plus their moving average
// ABOUTME: Timestamps are the sample timestamps, not a daily timeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::models::ChartComputationResult;

use super::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};
use crate::smoothing::smooth;

/// One metric over time
pub struct SingleMetricStrategy {
    request: StrategyRequest,
    deps: StrategyDeps,
    path: DataPath,
}

impl SingleMetricStrategy {
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

impl ComputationStrategy for SingleMetricStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::SingleMetric
    }

    fn path(&self) -> DataPath {
        self.path
    }

    fn compute(&self) -> Option<ChartComputationResult> {
        let range = self.request.range()?;
        let input = self.request.inputs.first()?;
        let points = input.points(&range);
        if points.is_empty() {
            debug!(path = %self.path, series = %input.series_id, "no samples in range");
            return None;
        }

        let (timestamps, raw): (Vec<_>, Vec<_>) = points
            .iter()
            .filter_map(|point| point.value.map(|value| (point.timestamp, value)))
            .unzip();
        let smoothed = smooth(&raw, self.deps.config.smoothing_window);

        Some(ChartComputationResult::single(
            timestamps,
            raw,
            smoothed,
            range,
            input.unit.clone(),
        ))
    }
}
