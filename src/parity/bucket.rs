// ABOUTME: Parity harness for bucketed distributions (weekday and hour-of-day)
// ABOUTME: Maps bucket statistics onto a synthetic timeline and reuses the series harness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use vitals_core::errors::AppResult;
use vitals_core::models::DistributionResult;

use super::{ParityHarness, ParityLayer, ParityOptions, ParityResult, ParitySeries, StrategyParityContext};

/// Compares per-bucket Min, Max, Range and Count of two distributions
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketDistributionParityHarness {
    inner: ParityHarness,
}

impl BucketDistributionParityHarness {
    /// Harness with the given options
    #[must_use]
    pub const fn new(options: ParityOptions) -> Self {
        Self {
            inner: ParityHarness::new(options),
        }
    }

    /// Compare two distributions
    ///
    /// Distributions of different kinds fail the structural layer.
    ///
    /// # Errors
    ///
    /// In strict mode, returns a parity-violation error naming the first
    /// failing layer
    pub fn validate(
        &self,
        context: &StrategyParityContext,
        legacy: Option<&DistributionResult>,
        cms: Option<&DistributionResult>,
    ) -> AppResult<ParityResult> {
        if let (Some(a), Some(b)) = (legacy, cms) {
            if a.kind != b.kind {
                let result = ParityResult::fail(
                    ParityLayer::StructuralParity,
                    format!("Bucket kind mismatch: legacy {:?} vs cms {:?}", a.kind, b.kind),
                );
                return self.inner.finish(context, result);
            }
        }

        self.inner.validate(
            context,
            || ParitySeries::from_distribution(legacy),
            || ParitySeries::from_distribution(cms),
        )
    }
}
