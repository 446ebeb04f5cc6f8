// ABOUTME: Serializable summary of one legacy-versus-CMS parity run
// ABOUTME: Printed by the CLI and returned by the cut-over service's parity runner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitals_intelligence::StrategyType;

use super::{ParityFailure, ParityResult, StrategyParityContext};

/// Outcome of a parity run with enough context to file it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityReport {
    /// Request the run belongs to
    pub request_id: Uuid,
    /// Strategy compared
    pub strategy: StrategyType,
    /// Metric family
    pub metric_type: String,
    /// Whether every layer passed
    pub passed: bool,
    /// First failure, if any
    pub failures: Vec<ParityFailure>,
    /// Series produced by the legacy path
    pub legacy_series: usize,
    /// Series produced by the CMS path
    pub cms_series: usize,
}

impl ParityReport {
    /// Combine a run's context, result and series counts
    #[must_use]
    pub fn new(
        context: &StrategyParityContext,
        result: ParityResult,
        legacy_series: usize,
        cms_series: usize,
    ) -> Self {
        Self {
            request_id: context.request_id,
            strategy: context.strategy,
            metric_type: context.metric_type.clone(),
            passed: result.passed,
            failures: result.failures,
            legacy_series,
            cms_series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity::ParityLayer;

    #[test]
    fn test_report_serializes_layer_names() {
        let context = StrategyParityContext::new(StrategyType::Ratio, "nutrition");
        let report = ParityReport::new(
            &context,
            ParityResult::fail(ParityLayer::ValueParity, "mismatch"),
            1,
            1,
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["strategy"], "ratio");
        assert_eq!(json["passed"], false);
        assert_eq!(json["failures"][0]["layer"], "ValueParity");
    }
}
