// ABOUTME: Combined two-metric strategy on a forward-filled daily timeline
// ABOUTME: Resolves a shared or compound unit for the pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::models::ChartComputationResult;

use super::input::compound_unit;
use super::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};
use crate::alignment::TimeAlignment;
use crate::smoothing::smooth;

/// Two metrics aligned to the union of their recording days
pub struct CombinedMetricStrategy {
    request: StrategyRequest,
    deps: StrategyDeps,
    path: DataPath,
}

impl CombinedMetricStrategy {
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

impl ComputationStrategy for CombinedMetricStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::CombinedMetric
    }

    fn path(&self) -> DataPath {
        self.path
    }

    fn compute(&self) -> Option<ChartComputationResult> {
        let range = self.request.range()?;
        let [primary, secondary, ..] = self.request.inputs.as_slice() else {
            return None;
        };

        let primary_points = primary.points(&range);
        let secondary_points = secondary.points(&range);
        if primary_points.is_empty() || secondary_points.is_empty() {
            debug!(path = %self.path, "combined chart missing one side");
            return None;
        }

        let config = &self.deps.config;
        let timeline =
            TimeAlignment::build_unified_timeline(&[&primary_points, &secondary_points]);
        let primary_raw =
            TimeAlignment::align_values(&primary_points, &timeline, config.forward_fill_seed);
        let secondary_raw =
            TimeAlignment::align_values(&secondary_points, &timeline, config.forward_fill_seed);
        let primary_smoothed = smooth(&primary_raw, config.smoothing_window);
        let secondary_smoothed = smooth(&secondary_raw, config.smoothing_window);

        Some(ChartComputationResult::pair(
            TimeAlignment::timeline_timestamps(&timeline),
            (primary_raw, primary_smoothed),
            (secondary_raw, secondary_smoothed),
            range,
            compound_unit(primary.unit.as_deref(), secondary.unit.as_deref()),
        ))
    }
}
