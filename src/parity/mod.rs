// ABOUTME: Parity validation between legacy-path and CMS-path chart results
// ABOUTME: Layered comparison types, the series harness, the bucket harness and reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Parity Validation
//!
//! A parity run computes the same request twice, once per data path, and
//! compares the results layer by layer:
//!
//! 1. **Structural**: both sides produce the same number of series
//! 2. **Temporal**: positional series pairs have the same timestamps
//! 3. **Value**: values agree (NaN equals NaN), optionally within an epsilon
//!
//! The first failing layer ends the run. In diagnostic mode the failure is
//! returned in the [`ParityResult`]; in strict mode it becomes an error.

/// Chart result to parity series adapters
pub mod adapters;
/// Distribution bucket harness
pub mod bucket;
/// Series harness
pub mod harness;
/// Serializable run summary
pub mod report;

pub use crate::config::{ParityMode, ParityOptions};
pub use bucket::BucketDistributionParityHarness;
pub use harness::ParityHarness;
pub use report::ParityReport;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use vitals_intelligence::StrategyType;

/// Comparison layer a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParityLayer {
    /// Inputs handed to the two paths disagree
    InputParity,
    /// Series counts disagree
    StructuralParity,
    /// Point counts or timestamps disagree
    TemporalParity,
    /// Values disagree beyond tolerance
    ValueParity,
    /// Derived quantities contradict each other
    SemanticIntegrity,
    /// Labels, units or display metadata disagree
    PresentationParity,
}

impl fmt::Display for ParityLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InputParity => "InputParity",
            Self::StructuralParity => "StructuralParity",
            Self::TemporalParity => "TemporalParity",
            Self::ValueParity => "ValueParity",
            Self::SemanticIntegrity => "SemanticIntegrity",
            Self::PresentationParity => "PresentationParity",
        };
        f.write_str(name)
    }
}

/// One `(time, value)` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParityPoint {
    /// Local timestamp
    pub time: NaiveDateTime,
    /// Value, NaN for missing
    pub value: f64,
}

/// Keyed point list compared positionally against its counterpart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParitySeries {
    /// Slot key (`Primary`, `Secondary`, a series id or a bucket statistic)
    pub series_key: String,
    /// Points in result order
    pub points: Vec<ParityPoint>,
}

impl ParitySeries {
    /// Zip timestamps with values
    #[must_use]
    pub fn from_values(
        series_key: impl Into<String>,
        timestamps: &[NaiveDateTime],
        values: &[f64],
    ) -> Self {
        Self {
            series_key: series_key.into(),
            points: timestamps
                .iter()
                .zip(values)
                .map(|(time, value)| ParityPoint {
                    time: *time,
                    value: *value,
                })
                .collect(),
        }
    }
}

/// First disagreement found by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityFailure {
    /// Layer that failed
    pub layer: ParityLayer,
    /// Human-readable description
    pub message: String,
}

/// Outcome of a parity run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityResult {
    /// Whether every layer passed
    pub passed: bool,
    /// Failures, at most one since layers short-circuit
    pub failures: Vec<ParityFailure>,
}

impl ParityResult {
    /// Passing result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            failures: Vec::new(),
        }
    }

    /// Failing result
    #[must_use]
    pub fn fail(layer: ParityLayer, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            failures: vec![ParityFailure {
                layer,
                message: message.into(),
            }],
        }
    }

    /// Layer of the first failure
    #[must_use]
    pub fn first_failed_layer(&self) -> Option<ParityLayer> {
        self.failures.first().map(|failure| failure.layer)
    }
}

/// Identifies the request a parity run belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyParityContext {
    /// Request id carried into errors and logs
    pub request_id: Uuid,
    /// Strategy under comparison
    pub strategy: StrategyType,
    /// Metric family
    pub metric_type: String,
}

impl StrategyParityContext {
    /// Context with a fresh request id
    #[must_use]
    pub fn new(strategy: StrategyType, metric_type: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            strategy,
            metric_type: metric_type.into(),
        }
    }
}
