// ABOUTME: Normalized pair strategy rescaling two aligned metrics to a common range
// ABOUTME: Zero-to-one, percentage-of-max or relative-to-range normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use vitals_core::models::ChartComputationResult;

use super::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};
use crate::alignment::TimeAlignment;
use crate::derived::{DerivedSeriesMath, NormalizationMode};
use crate::smoothing::smooth;

/// Two metrics rescaled so their shapes can be compared
pub struct NormalizedStrategy {
    request: StrategyRequest,
    deps: StrategyDeps,
    path: DataPath,
}

impl NormalizedStrategy {
    /// Bind the strategy to a request
    #[must_use]
    pub const fn new(request: StrategyRequest, deps: StrategyDeps, path: DataPath) -> Self {
        Self {
            request,
            deps,
            path,
        }
    }

    /// Request override, else the configured default
    #[must_use]
    pub fn mode(&self) -> NormalizationMode {
        self.request
            .normalization_mode
            .unwrap_or(self.deps.config.default_normalization_mode)
    }
}

impl ComputationStrategy for NormalizedStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Normalized
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
            return None;
        }

        let config = &self.deps.config;
        let timeline =
            TimeAlignment::build_unified_timeline(&[&primary_points, &secondary_points]);
        let (primary_values, secondary_values) = DerivedSeriesMath::normalize_pair(
            &TimeAlignment::align_values(&primary_points, &timeline, config.forward_fill_seed),
            &TimeAlignment::align_values(&secondary_points, &timeline, config.forward_fill_seed),
            self.mode(),
        );
        let primary_smoothed = smooth(&primary_values, config.smoothing_window);
        let secondary_smoothed = smooth(&secondary_values, config.smoothing_window);

        let unit = match self.mode() {
            NormalizationMode::ZeroToOne => None,
            NormalizationMode::PercentageOfMax | NormalizationMode::RelativeToMax => {
                Some("%".to_owned())
            }
        };

        Some(ChartComputationResult::pair(
            TimeAlignment::timeline_timestamps(&timeline),
            (primary_values, primary_smoothed),
            (secondary_values, secondary_smoothed),
            range,
            unit,
        ))
    }
}
