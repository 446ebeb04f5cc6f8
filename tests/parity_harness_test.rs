// ABOUTME: Integration tests for legacy-versus-CMS parity validation
// ABOUTME: Layer ordering, strict mode, adapters and end-to-end strategy parity runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{at, average_heart_rate, context, init_test_logging, metadata, resting_heart_rate};
use vitals_core::errors::ErrorCode;
use vitals_core::models::{ChartComputationResult, DateRange};
use vitals_intelligence::transform::operations::ids;
use vitals_intelligence::transform::TransformExpressionBuilder;
use vitals_intelligence::StrategyType;
use vitals_parity::config::{ParityOptions, VitalsConfig};
use vitals_parity::cutover::StrategyCutOverService;
use vitals_parity::parity::{
    ParityHarness, ParityLayer, ParityPoint, ParitySeries, StrategyParityContext,
};

fn two_points(shift_second: bool) -> Vec<ParitySeries> {
    let second = if shift_second { at(3, 0) } else { at(2, 0) };
    vec![ParitySeries {
        series_key: "Primary".to_owned(),
        points: vec![
            ParityPoint {
                time: at(1, 0),
                value: 1.0,
            },
            ParityPoint {
                time: second,
                value: 2.0,
            },
        ],
    }]
}

fn parity_context(strategy: StrategyType) -> StrategyParityContext {
    StrategyParityContext::new(strategy, "heart_rate")
}

#[test]
fn test_identical_series_pass() {
    init_test_logging();
    let harness = ParityHarness::default();

    let result = harness
        .validate(
            &parity_context(StrategyType::SingleMetric),
            || two_points(false),
            || two_points(false),
        )
        .unwrap();

    assert!(result.passed);
    assert!(result.failures.is_empty());
}

#[test]
fn test_shifted_day_fails_temporal_first() {
    init_test_logging();
    let harness = ParityHarness::default();

    let result = harness
        .validate(
            &parity_context(StrategyType::SingleMetric),
            || two_points(false),
            || two_points(true),
        )
        .unwrap();

    assert!(!result.passed);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.first_failed_layer(), Some(ParityLayer::TemporalParity));
}

#[test]
fn test_comparison_is_symmetric() {
    let harness = ParityHarness::default();
    let forward = harness.compare(&two_points(false), &two_points(true));
    let backward = harness.compare(&two_points(true), &two_points(false));
    assert_eq!(forward.first_failed_layer(), backward.first_failed_layer());
}

#[test]
fn test_strict_mode_names_layer() {
    init_test_logging();
    let harness = ParityHarness::new(ParityOptions::strict());
    let context = parity_context(StrategyType::SingleMetric);

    let error = harness
        .validate(&context, || two_points(false), Vec::new)
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ParityViolation);
    assert!(error.message.contains("StructuralParity"));
    assert_eq!(error.context.request_id, Some(context.request_id));
}

#[test]
fn test_chart_result_adapter_slots() {
    let range = DateRange {
        from: at(1, 0),
        to: at(2, 0),
    };
    let pair = ChartComputationResult::pair(
        vec![at(1, 0), at(2, 0)],
        (vec![1.0, 2.0], vec![1.0, 2.0]),
        (vec![3.0, 4.0], vec![3.0, 4.0]),
        range,
        None,
    );

    let series = ParitySeries::from_chart_result(Some(&pair));
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].series_key, "Primary");
    assert_eq!(series[1].series_key, "Secondary");
    assert_eq!(series[1].points[1].value, 4.0);

    assert!(ParitySeries::from_chart_result(None).is_empty());
}

#[test]
fn test_equivalent_inputs_pass_for_every_two_metric_strategy() {
    init_test_logging();
    let service = StrategyCutOverService::new(VitalsConfig::default());
    let context = context(
        vec![resting_heart_rate(), average_heart_rate()],
        metadata("heart_rate"),
    );

    for strategy in [
        StrategyType::SingleMetric,
        StrategyType::CombinedMetric,
        StrategyType::Normalized,
        StrategyType::Difference,
        StrategyType::Ratio,
        StrategyType::WeeklyDistribution,
        StrategyType::HourlyDistribution,
    ] {
        let run = service.execute_with_parity(&context, strategy).unwrap();
        assert!(run.report.passed, "{strategy}: {:?}", run.report.failures);
        assert_eq!(run.report.legacy_series, run.report.cms_series);
        assert!(run.legacy.is_some(), "{strategy} produced no chart");
    }
}

#[test]
fn test_transform_parity() {
    init_test_logging();
    let service = StrategyCutOverService::new(VitalsConfig::default());
    let mut meta = metadata("heart_rate");
    meta.transform = Some(TransformExpressionBuilder::binary(ids::SUBTRACT, 1, 0));
    let context = context(vec![resting_heart_rate(), average_heart_rate()], meta);

    let run = service
        .execute_with_parity(&context, StrategyType::Transform)
        .unwrap();

    assert!(run.report.passed);
    let chart = run.cms.unwrap();
    assert_eq!(chart.primary_raw_values, vec![14.0, 14.0, 13.0, 14.0]);
}

#[test]
fn test_distribution_report_counts_bucket_series() {
    let service = StrategyCutOverService::new(VitalsConfig::default());
    let context = context(vec![resting_heart_rate()], metadata("heart_rate"));

    let run = service
        .execute_with_parity(&context, StrategyType::WeeklyDistribution)
        .unwrap();

    assert!(run.report.passed);
    assert_eq!(run.report.legacy_series, 4);
}

#[test]
fn test_diverging_legacy_value_fails_value_layer() {
    init_test_logging();
    let service = StrategyCutOverService::new(VitalsConfig::default());
    let mut resting = resting_heart_rate();
    resting.legacy[0].value = Some(59.0);
    let context = context(vec![resting], metadata("heart_rate"));

    let run = service
        .execute_with_parity(&context, StrategyType::SingleMetric)
        .unwrap();

    assert!(!run.report.passed);
    assert_eq!(run.report.failures[0].layer, ParityLayer::ValueParity);
}

#[test]
fn test_shifted_legacy_timestamp_fails_temporal_layer() {
    init_test_logging();
    let service = StrategyCutOverService::new(VitalsConfig::default());
    let mut resting = resting_heart_rate();
    resting.legacy[1].timestamp += Duration::hours(1);
    let context = context(vec![resting], metadata("heart_rate"));

    let run = service
        .execute_with_parity(&context, StrategyType::SingleMetric)
        .unwrap();

    assert_eq!(run.report.failures[0].layer, ParityLayer::TemporalParity);
}

#[test]
fn test_strict_service_run_errors() {
    init_test_logging();
    let config = VitalsConfig {
        parity: ParityOptions::strict(),
        ..VitalsConfig::default()
    };
    let service = StrategyCutOverService::new(config);
    let mut resting = resting_heart_rate();
    resting.legacy.pop();
    let context = context(vec![resting], metadata("heart_rate"));

    let error = service
        .execute_with_parity(&context, StrategyType::SingleMetric)
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ParityViolation);
    assert_eq!(error.context.request_id, Some(context.request_id));
}
