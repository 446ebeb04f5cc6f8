// ABOUTME: Computation strategy family producing chart results from legacy or CMS inputs
// ABOUTME: Defines the strategy trait, strategy types, data paths and shared dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Computation Strategies
//!
//! Each strategy turns one request into an optional [`ChartComputationResult`].
//! `None` is the "no chart" signal: an empty request window or no valued
//! points after filtering never produce an error.
//!
//! Every strategy exists once per [`DataPath`]; the two instances differ only
//! in how raw points are read, so their results must be identical for
//! equivalent inputs.

/// Combined two-metric strategy
pub mod combined;
/// Weekday and hour-of-day distributions
pub mod distribution;
/// Strategy construction from a chart context
pub mod factory;
/// Path-specific inputs and unit helpers
pub mod input;
/// Multi-metric strategy
pub mod multi;
/// Normalized pair strategy
pub mod normalized;
/// Single-metric strategy
pub mod single;
/// Transform-expression strategies (difference, ratio, arbitrary)
pub mod transform_result;

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use vitals_core::models::{ChartComputationResult, DateRange};

use crate::config::ComputationConfig;
use crate::derived::NormalizationMode;
use crate::transform::{OperationRegistry, TransformExpression};

pub use combined::CombinedMetricStrategy;
pub use distribution::DistributionStrategy;
pub use factory::build_strategy;
pub use input::{SeriesInput, StrategyInput};
pub use multi::MultiMetricStrategy;
pub use normalized::NormalizedStrategy;
pub use single::SingleMetricStrategy;
pub use transform_result::TransformResultStrategy;

/// Chart computation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// One metric over time
    SingleMetric,
    /// Two metrics on a shared daily timeline
    CombinedMetric,
    /// Three or more metrics on a shared daily timeline
    MultiMetric,
    /// Two metrics rescaled to a common range
    Normalized,
    /// `primary - secondary` at shared timestamps
    Difference,
    /// `primary / secondary` at shared timestamps
    Ratio,
    /// Arbitrary transform expression at shared timestamps
    Transform,
    /// Min/max/range per weekday
    WeeklyDistribution,
    /// Min/max/range per hour of day
    HourlyDistribution,
}

impl StrategyType {
    /// Every strategy type
    pub const ALL: [Self; 9] = [
        Self::SingleMetric,
        Self::CombinedMetric,
        Self::MultiMetric,
        Self::Normalized,
        Self::Difference,
        Self::Ratio,
        Self::Transform,
        Self::WeeklyDistribution,
        Self::HourlyDistribution,
    ];

    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleMetric => "single_metric",
            Self::CombinedMetric => "combined_metric",
            Self::MultiMetric => "multi_metric",
            Self::Normalized => "normalized",
            Self::Difference => "difference",
            Self::Ratio => "ratio",
            Self::Transform => "transform",
            Self::WeeklyDistribution => "weekly_distribution",
            Self::HourlyDistribution => "hourly_distribution",
        }
    }

    /// Suffix of the per-strategy CMS flag (`VITALS_CMS_<SUFFIX>`)
    #[must_use]
    pub fn env_suffix(self) -> String {
        self.as_str().to_ascii_uppercase()
    }

    /// Whether results carry a bucket distribution
    #[must_use]
    pub const fn is_distribution(self) -> bool {
        matches!(self, Self::WeeklyDistribution | Self::HourlyDistribution)
    }

    /// Minimum number of metrics the strategy reads
    #[must_use]
    pub const fn required_metrics(self) -> usize {
        match self {
            Self::SingleMetric
            | Self::Transform
            | Self::WeeklyDistribution
            | Self::HourlyDistribution => 1,
            Self::CombinedMetric | Self::Normalized | Self::Difference | Self::Ratio => 2,
            Self::MultiMetric => 3,
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representation a strategy reads its inputs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPath {
    /// Legacy records
    #[default]
    Legacy,
    /// Canonical metric series
    Cms,
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Cms => f.write_str("cms"),
        }
    }
}

/// Long-lived collaborators shared by every strategy
#[derive(Debug, Clone)]
pub struct StrategyDeps {
    /// Numeric settings
    pub config: ComputationConfig,
    /// Transform operations, read-only after startup
    pub operations: Arc<OperationRegistry>,
}

impl StrategyDeps {
    /// Dependencies with the built-in operations
    #[must_use]
    pub fn new(config: ComputationConfig) -> Self {
        Self {
            config,
            operations: Arc::new(OperationRegistry::with_builtins()),
        }
    }
}

impl Default for StrategyDeps {
    fn default() -> Self {
        Self::new(ComputationConfig::default())
    }
}

/// Everything a strategy needs from one request
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRequest {
    /// Metrics in request order (primary first)
    pub inputs: Vec<StrategyInput>,
    /// Request window lower bound
    pub from: NaiveDateTime,
    /// Request window upper bound, extended to end of day before filtering
    pub to: NaiveDateTime,
    /// Normalization override for the normalized strategy
    pub normalization_mode: Option<NormalizationMode>,
    /// Expression for the transform strategy
    pub transform: Option<TransformExpression>,
}

impl StrategyRequest {
    /// Request window, `None` when `from` lies after the end of `to`'s day
    #[must_use]
    pub fn range(&self) -> Option<DateRange> {
        input::request_range(self.from, self.to)
    }
}

/// A chart computation bound to one request and one data path
pub trait ComputationStrategy: Send + Sync {
    /// Strategy kind
    fn strategy_type(&self) -> StrategyType;

    /// Representation the inputs are read from
    fn path(&self) -> DataPath;

    /// Compute the chart, `None` when there is nothing to draw
    fn compute(&self) -> Option<ChartComputationResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_suffix() {
        assert_eq!(StrategyType::SingleMetric.env_suffix(), "SINGLE_METRIC");
        assert_eq!(StrategyType::HourlyDistribution.env_suffix(), "HOURLY_DISTRIBUTION");
    }

    #[test]
    fn test_serde_matches_display() {
        for strategy in StrategyType::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{strategy}\""));
        }
    }
}
