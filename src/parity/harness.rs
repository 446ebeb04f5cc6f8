// ABOUTME: Layered parity harness comparing legacy and CMS series lists
// ABOUTME: Structural, temporal and value layers with NaN-aware, optionally tolerant comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::errors::{AppError, AppResult};

use super::{
    ParityLayer, ParityMode, ParityOptions, ParityResult, ParitySeries, StrategyParityContext,
};
use crate::logging::ParityLogger;

/// Compares two producers of parity series
#[derive(Debug, Clone, Copy, Default)]
pub struct ParityHarness {
    options: ParityOptions,
}

impl ParityHarness {
    /// Harness with the given options
    #[must_use]
    pub const fn new(options: ParityOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &ParityOptions {
        &self.options
    }

    /// Run both producers and compare their series
    ///
    /// # Errors
    ///
    /// In strict mode, returns a parity-violation error naming the first
    /// failing layer
    pub fn validate<L, C>(
        &self,
        context: &StrategyParityContext,
        legacy_producer: L,
        cms_producer: C,
    ) -> AppResult<ParityResult>
    where
        L: FnOnce() -> Vec<ParitySeries>,
        C: FnOnce() -> Vec<ParitySeries>,
    {
        let legacy = legacy_producer();
        let cms = cms_producer();
        let result = self.compare(&legacy, &cms);
        self.finish(context, result)
    }

    /// Compare two series lists without running producers or applying the mode
    #[must_use]
    pub fn compare(&self, legacy: &[ParitySeries], cms: &[ParitySeries]) -> ParityResult {
        if legacy.len() != cms.len() {
            return ParityResult::fail(
                ParityLayer::StructuralParity,
                format!(
                    "Series count mismatch: legacy has {}, cms has {}",
                    legacy.len(),
                    cms.len()
                ),
            );
        }

        for (legacy_series, cms_series) in legacy.iter().zip(cms) {
            if let Some(message) = temporal_mismatch(legacy_series, cms_series) {
                return ParityResult::fail(ParityLayer::TemporalParity, message);
            }
        }

        for (legacy_series, cms_series) in legacy.iter().zip(cms) {
            if let Some(message) = self.value_mismatch(legacy_series, cms_series) {
                return ParityResult::fail(ParityLayer::ValueParity, message);
            }
        }

        debug!(series = legacy.len(), "parity layers passed");
        ParityResult::pass()
    }

    pub(crate) fn finish(
        &self,
        context: &StrategyParityContext,
        result: ParityResult,
    ) -> AppResult<ParityResult> {
        let strategy = context.strategy.as_str();
        match result.failures.first() {
            None => {
                ParityLogger::log_parity_outcome(strategy, true, None, "");
                Ok(result)
            }
            Some(failure) => {
                let layer = failure.layer.to_string();
                ParityLogger::log_parity_outcome(strategy, false, Some(&layer), &failure.message);
                match self.options.mode {
                    ParityMode::Diagnostic => Ok(result),
                    ParityMode::Strict => Err(AppError::parity_violation(format!(
                        "{layer}: {}",
                        failure.message
                    ))
                    .with_strategy(strategy)
                    .with_request_id(context.request_id)
                    .with_details(serde_json::json!({
                        "layer": layer,
                        "metric_type": context.metric_type,
                    }))),
                }
            }
        }
    }

    fn values_match(&self, legacy: f64, cms: f64) -> bool {
        if legacy.is_nan() || cms.is_nan() {
            return legacy.is_nan() && cms.is_nan();
        }
        if self.options.allow_floating_point_drift {
            (legacy - cms).abs() <= self.options.value_epsilon
        } else {
            legacy.to_bits() == cms.to_bits()
        }
    }

    fn value_mismatch(&self, legacy: &ParitySeries, cms: &ParitySeries) -> Option<String> {
        legacy
            .points
            .iter()
            .zip(&cms.points)
            .find(|(a, b)| !self.values_match(a.value, b.value))
            .map(|(a, b)| {
                format!(
                    "Series '{}' value mismatch at {}: legacy {} vs cms {} (epsilon {}, drift {})",
                    legacy.series_key,
                    a.time,
                    a.value,
                    b.value,
                    self.options.value_epsilon,
                    self.options.allow_floating_point_drift
                )
            })
    }
}

fn temporal_mismatch(legacy: &ParitySeries, cms: &ParitySeries) -> Option<String> {
    if legacy.points.len() != cms.points.len() {
        return Some(format!(
            "Series '{}' point count mismatch: legacy has {}, cms has {}",
            legacy.series_key,
            legacy.points.len(),
            cms.points.len()
        ));
    }
    legacy
        .points
        .iter()
        .zip(&cms.points)
        .enumerate()
        .find(|(_, (a, b))| a.time != b.time)
        .map(|(index, (a, b))| {
            format!(
                "Series '{}' timestamp mismatch at index {index}: legacy {} vs cms {}",
                legacy.series_key, a.time, b.time
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parity::ParityPoint;
    use chrono::{NaiveDate, NaiveDateTime};
    use vitals_core::errors::ErrorCode;
    use vitals_intelligence::StrategyType;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn series(points: &[(u32, f64)]) -> ParitySeries {
        ParitySeries {
            series_key: "Primary".to_owned(),
            points: points
                .iter()
                .map(|(day, value)| ParityPoint {
                    time: at(*day),
                    value: *value,
                })
                .collect(),
        }
    }

    fn context() -> StrategyParityContext {
        StrategyParityContext::new(StrategyType::SingleMetric, "steps")
    }

    #[test]
    fn test_nan_equals_nan() {
        let harness = ParityHarness::default();
        let result = harness.compare(
            &[series(&[(1, f64::NAN), (2, 1.0)])],
            &[series(&[(1, f64::NAN), (2, 1.0)])],
        );
        assert!(result.passed);
    }

    #[test]
    fn test_drift_tolerance() {
        let tolerant = ParityHarness::default();
        let exact = ParityHarness::new(ParityOptions {
            allow_floating_point_drift: false,
            ..ParityOptions::default()
        });
        let legacy = [series(&[(1, 0.1 + 0.2)])];
        let cms = [series(&[(1, 0.3)])];

        assert!(tolerant.compare(&legacy, &cms).passed);
        assert_eq!(
            exact.compare(&legacy, &cms).first_failed_layer(),
            Some(ParityLayer::ValueParity)
        );
    }

    #[test]
    fn test_structural_before_temporal() {
        let harness = ParityHarness::default();
        let result = harness.compare(&[series(&[(1, 1.0)])], &[]);
        assert_eq!(result.first_failed_layer(), Some(ParityLayer::StructuralParity));
    }

    #[test]
    fn test_strict_mode_errors() {
        let harness = ParityHarness::new(ParityOptions::strict());
        let error = harness
            .validate(&context(), || vec![series(&[(1, 1.0)])], || vec![series(&[(2, 1.0)])])
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ParityViolation);
        assert!(error.message.starts_with("TemporalParity"));
    }
}
