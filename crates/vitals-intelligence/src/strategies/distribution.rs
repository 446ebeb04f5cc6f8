// ABOUTME: Weekly and hourly distribution strategies over the primary metric
// ABOUTME: Buckets map onto a synthetic timeline; the full summary rides in the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use vitals_core::models::{BucketKind, ChartComputationResult};

use super::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};
use crate::distribution::{bucket_timestamp, DistributionCalculator};

/// Per-bucket min/max/range of the primary metric
///
/// The primary slot holds bucket minimums and the secondary slot bucket
/// ranges, so a stacked bar reads min..max. Values are not smoothed.
pub struct DistributionStrategy {
    kind: BucketKind,
    request: StrategyRequest,
    deps: StrategyDeps,
    path: DataPath,
}

impl DistributionStrategy {
    /// Seven weekday buckets, Monday first
    #[must_use]
    pub const fn weekly(request: StrategyRequest, deps: StrategyDeps, path: DataPath) -> Self {
        Self {
            kind: BucketKind::DayOfWeek,
            request,
            deps,
            path,
        }
    }

    /// Twenty-four hour buckets, midnight first
    #[must_use]
    pub const fn hourly(request: StrategyRequest, deps: StrategyDeps, path: DataPath) -> Self {
        Self {
            kind: BucketKind::HourOfDay,
            request,
            deps,
            path,
        }
    }

    /// Bucket partition
    #[must_use]
    pub const fn kind(&self) -> BucketKind {
        self.kind
    }
}

impl ComputationStrategy for DistributionStrategy {
    fn strategy_type(&self) -> StrategyType {
        match self.kind {
            BucketKind::DayOfWeek => StrategyType::WeeklyDistribution,
            BucketKind::HourOfDay => StrategyType::HourlyDistribution,
        }
    }

    fn path(&self) -> DataPath {
        self.path
    }

    fn compute(&self) -> Option<ChartComputationResult> {
        let range = self.request.range()?;
        let input = self.request.inputs.first()?;
        let points = input.points(&range);
        let summary = DistributionCalculator::summarize(
            self.kind,
            &points,
            self.deps.config.distribution_intervals,
        )?;

        let timestamps = (0..summary.mins.len())
            .map(|index| bucket_timestamp(self.kind, index))
            .collect();
        let mut result = ChartComputationResult::pair(
            timestamps,
            (summary.mins.clone(), summary.mins.clone()),
            (summary.ranges.clone(), summary.ranges.clone()),
            range,
            input.unit.clone(),
        );
        result.distribution = Some(summary);
        Some(result)
    }
}
