// ABOUTME: Constructs boxed strategies for a strategy type and data path
// ABOUTME: Validates the request shape before any computation runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::errors::{AppError, AppResult};

use super::{
    CombinedMetricStrategy, ComputationStrategy, DataPath, DistributionStrategy,
    MultiMetricStrategy, NormalizedStrategy, SingleMetricStrategy, StrategyDeps, StrategyRequest,
    StrategyType, TransformResultStrategy,
};

/// Build the `kind` strategy reading from `path`
///
/// # Errors
///
/// Returns an input error when the request has fewer metrics than the
/// strategy reads, or when a transform request has no valid expression
pub fn build_strategy(
    kind: StrategyType,
    path: DataPath,
    request: StrategyRequest,
    deps: StrategyDeps,
) -> AppResult<Box<dyn ComputationStrategy>> {
    let required = kind.required_metrics();
    if request.inputs.len() < required {
        return Err(AppError::invalid_input(format!(
            "{kind} needs at least {required} metrics, got {}",
            request.inputs.len()
        ))
        .with_strategy(kind.as_str()));
    }

    debug!(strategy = %kind, path = %path, metrics = request.inputs.len(), "building strategy");

    Ok(match kind {
        StrategyType::SingleMetric => Box::new(SingleMetricStrategy::new(request, deps, path)),
        StrategyType::CombinedMetric => Box::new(CombinedMetricStrategy::new(request, deps, path)),
        StrategyType::MultiMetric => Box::new(MultiMetricStrategy::new(request, deps, path)),
        StrategyType::Normalized => Box::new(NormalizedStrategy::new(request, deps, path)),
        StrategyType::Difference => Box::new(TransformResultStrategy::difference(request, deps, path)),
        StrategyType::Ratio => Box::new(TransformResultStrategy::ratio(request, deps, path)),
        StrategyType::Transform => {
            let expression = request.transform.clone().ok_or_else(|| {
                AppError::invalid_input("Transform charts need an expression")
                    .with_strategy(kind.as_str())
            })?;
            expression
                .validate()
                .map_err(|error| error.with_strategy(kind.as_str()))?;
            Box::new(TransformResultStrategy::new(expression, request, deps, path))
        }
        StrategyType::WeeklyDistribution => {
            Box::new(DistributionStrategy::weekly(request, deps, path))
        }
        StrategyType::HourlyDistribution => {
            Box::new(DistributionStrategy::hourly(request, deps, path))
        }
    })
}

/// Legacy-path constructor with a function-pointer signature
///
/// # Errors
///
/// See [`build_strategy`]
pub fn build_legacy(
    kind: StrategyType,
    request: StrategyRequest,
    deps: StrategyDeps,
) -> AppResult<Box<dyn ComputationStrategy>> {
    build_strategy(kind, DataPath::Legacy, request, deps)
}

/// CMS-path constructor with a function-pointer signature
///
/// # Errors
///
/// See [`build_strategy`]
pub fn build_cms(
    kind: StrategyType,
    request: StrategyRequest,
    deps: StrategyDeps,
) -> AppResult<Box<dyn ComputationStrategy>> {
    build_strategy(kind, DataPath::Cms, request, deps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vitals_core::errors::ErrorCode;

    fn request() -> StrategyRequest {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        StrategyRequest {
            inputs: Vec::new(),
            from: day,
            to: day,
            normalization_mode: None,
            transform: None,
        }
    }

    #[test]
    fn test_missing_metrics_is_input_error() {
        let error = build_strategy(
            StrategyType::CombinedMetric,
            DataPath::Legacy,
            request(),
            StrategyDeps::default(),
        )
        .err()
        .unwrap();
        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.context.strategy.as_deref(), Some("combined_metric"));
    }
}
