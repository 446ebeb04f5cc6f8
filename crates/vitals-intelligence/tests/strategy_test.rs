// ABOUTME: Integration tests for the computation strategy family on both data paths
// ABOUTME: Covers no-data signals, units, transforms, normalization modes and distribution bucketing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use vitals_core::models::{
    BucketKind, CanonicalMetricSeries, ChartComputationResult, LegacyRecord, MetricSample,
    TickInterval,
};
use vitals_intelligence::context::{ChartDataContextBuilder, ChartMetadata, MetricInputs};
use vitals_intelligence::derived::NormalizationMode;
use vitals_intelligence::strategies::{
    build_strategy, DataPath, StrategyDeps, StrategyType, TransformResultStrategy,
};
use vitals_intelligence::transform::operations::ids;
use vitals_intelligence::transform::{TransformExpression, TransformExpressionBuilder};
use vitals_intelligence::ComputationConfig;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}

fn cms(id: &str, unit: &str, points: &[(u32, u32, Option<f64>)]) -> CanonicalMetricSeries {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let samples = points
        .iter()
        .map(|(day, hour, value)| {
            MetricSample::new(
                offset.from_local_datetime(&at(*day, *hour)).unwrap(),
                *value,
            )
        })
        .collect();
    CanonicalMetricSeries::new(id, Some(unit.to_owned()), samples)
}

fn metadata(from: NaiveDateTime, to: NaiveDateTime) -> ChartMetadata {
    ChartMetadata {
        metric_type: "activity".to_owned(),
        primary_subtype: Some("steps".to_owned()),
        secondary_subtype: Some("calories".to_owned()),
        from,
        to,
        normalization_mode: None,
        transform: None,
    }
}

fn steps() -> MetricInputs {
    MetricInputs::from_cms(
        "steps",
        cms(
            "steps",
            "count",
            &[
                (1, 9, Some(1000.0)),
                (2, 9, Some(3000.0)),
                (2, 18, Some(9999.0)),
                (4, 9, None),
                (5, 9, Some(5000.0)),
            ],
        ),
    )
}

fn calories() -> MetricInputs {
    MetricInputs::from_cms(
        "calories",
        cms(
            "calories",
            "kcal",
            &[(1, 9, Some(200.0)), (3, 9, Some(0.0)), (5, 9, Some(400.0))],
        ),
    )
    .with_display_name("Calories")
}

fn heart_rate() -> MetricInputs {
    MetricInputs::from_cms(
        "heart_rate",
        cms("heart_rate", "bpm", &[(2, 9, Some(60.0)), (6, 9, Some(70.0))]),
    )
}

fn compute_both(
    kind: StrategyType,
    metadata: ChartMetadata,
    metrics: Vec<MetricInputs>,
) -> (Option<ChartComputationResult>, Option<ChartComputationResult>) {
    let context = ChartDataContextBuilder::new(metadata)
        .metrics(metrics)
        .build(&ComputationConfig::default())
        .unwrap();
    let run = |path| {
        build_strategy(
            kind,
            path,
            context.strategy_request(path).unwrap(),
            StrategyDeps::default(),
        )
        .unwrap()
        .compute()
    };
    (run(DataPath::Legacy), run(DataPath::Cms))
}

#[test]
fn test_single_metric_uses_sample_timestamps() {
    let (legacy, cms) = compute_both(
        StrategyType::SingleMetric,
        metadata(at(1, 0), at(5, 0)),
        vec![steps()],
    );
    let legacy = legacy.unwrap();
    assert_eq!(Some(&legacy), cms.as_ref());

    assert_eq!(
        legacy.timestamps,
        vec![at(1, 9), at(2, 9), at(2, 18), at(5, 9)]
    );
    assert_eq!(legacy.primary_raw_values, vec![1000.0, 3000.0, 9999.0, 5000.0]);
    assert_eq!(legacy.primary_smoothed.len(), 4);
    assert_eq!(legacy.unit.as_deref(), Some("count"));
    assert_eq!(legacy.tick_interval, TickInterval::Daily);
}

#[test]
fn test_empty_window_and_empty_range_yield_no_chart() {
    let (legacy, cms) = compute_both(
        StrategyType::SingleMetric,
        metadata(at(20, 0), at(25, 0)),
        vec![steps()],
    );
    assert!(legacy.is_none());
    assert!(cms.is_none());

    let (inverted, _) = compute_both(
        StrategyType::SingleMetric,
        metadata(at(5, 0), at(1, 0)),
        vec![steps()],
    );
    assert!(inverted.is_none());
}

#[test]
fn test_combined_forward_fills_with_compound_unit() {
    let (legacy, cms) = compute_both(
        StrategyType::CombinedMetric,
        metadata(at(1, 0), at(5, 0)),
        vec![steps(), calories()],
    );
    let legacy = legacy.unwrap();
    assert_eq!(Some(&legacy), cms.as_ref());

    // days 1, 2, 3, 5; first record of day 2 wins
    assert_eq!(legacy.timestamps.len(), 4);
    assert_eq!(legacy.primary_raw_values, vec![1000.0, 3000.0, 3000.0, 5000.0]);
    assert_eq!(
        legacy.secondary_raw_values.as_deref(),
        Some(&[200.0, 200.0, 0.0, 400.0][..])
    );
    assert_eq!(legacy.unit.as_deref(), Some("count / kcal"));
}

#[test]
fn test_normalized_zero_to_one() {
    let mut request = metadata(at(1, 0), at(5, 0));
    request.normalization_mode = Some(NormalizationMode::ZeroToOne);
    let (legacy, _) = compute_both(StrategyType::Normalized, request, vec![steps(), calories()]);
    let legacy = legacy.unwrap();

    assert_eq!(legacy.primary_raw_values, vec![0.0, 0.5, 0.5, 1.0]);
    assert_eq!(
        legacy.secondary_raw_values.unwrap(),
        vec![0.5, 0.5, 0.0, 1.0]
    );
}

#[test]
fn test_difference_and_ratio_use_shared_timestamps() {
    let (difference, cms_difference) = compute_both(
        StrategyType::Difference,
        metadata(at(1, 0), at(5, 0)),
        vec![steps(), calories()],
    );
    let difference = difference.unwrap();
    assert_eq!(Some(&difference), cms_difference.as_ref());
    assert_eq!(difference.timestamps, vec![at(1, 9), at(5, 9)]);
    assert_eq!(difference.primary_raw_values, vec![800.0, 4600.0]);

    let (ratio, _) = compute_both(
        StrategyType::Ratio,
        metadata(at(1, 0), at(5, 0)),
        vec![calories(), calories()],
    );
    let ratio = ratio.unwrap();
    assert_eq!(ratio.primary_raw_values[0], 1.0);
    assert!(ratio.primary_raw_values[1].is_nan());
    assert_eq!(ratio.unit, None);
}

#[test]
fn test_transform_label() {
    let context = ChartDataContextBuilder::new(metadata(at(1, 0), at(5, 0)))
        .metrics([steps(), calories()])
        .build(&ComputationConfig::default())
        .unwrap();
    let strategy = TransformResultStrategy::ratio(
        context.strategy_request(DataPath::Legacy).unwrap(),
        StrategyDeps::default(),
        DataPath::Legacy,
    );
    assert_eq!(strategy.label(), "[Transform] steps / Calories");
}

#[test]
fn test_transform_strategy_requires_expression() {
    let context = ChartDataContextBuilder::new(metadata(at(1, 0), at(5, 0)))
        .metric(steps())
        .build(&ComputationConfig::default())
        .unwrap();
    let request = context.strategy_request(DataPath::Legacy).unwrap();
    assert!(build_strategy(
        StrategyType::Transform,
        DataPath::Legacy,
        request.clone(),
        StrategyDeps::default()
    )
    .is_err());

    let mut with_expression = request;
    with_expression.transform = Some(TransformExpressionBuilder::unary(ids::LOG, 0));
    let result = build_strategy(
        StrategyType::Transform,
        DataPath::Legacy,
        with_expression,
        StrategyDeps::default(),
    )
    .unwrap()
    .compute()
    .unwrap();
    assert!((result.primary_raw_values[0] - 1000.0_f64.ln()).abs() < 1e-12);
}

#[test]
fn test_multi_metric_keeps_every_series() {
    let (legacy, cms) = compute_both(
        StrategyType::MultiMetric,
        metadata(at(1, 0), at(6, 0)),
        vec![steps(), calories(), heart_rate()],
    );
    let legacy = legacy.unwrap();
    assert_eq!(Some(&legacy), cms.as_ref());

    let series = legacy.series.as_ref().unwrap();
    assert_eq!(series.len(), 3);
    assert!(legacy.primary_raw_values.is_empty());
    // heart rate starts on day 2: day 1 gets the seed
    assert_eq!(series[2].raw_values[0], 0.0);
    assert_eq!(series[2].raw_values.last(), Some(&70.0));
    assert_eq!(legacy.unit, None);
}

#[test]
fn test_weekly_distribution_buckets() {
    let (legacy, cms) = compute_both(
        StrategyType::WeeklyDistribution,
        metadata(at(1, 0), at(7, 0)),
        vec![steps()],
    );
    let legacy = legacy.unwrap();
    let distribution = legacy.distribution.as_ref().unwrap();
    assert_eq!(distribution.kind, BucketKind::DayOfWeek);
    assert_eq!(distribution.counts, vec![1, 2, 0, 0, 1, 0, 0]);
    assert_eq!(distribution.ranges[1], 6999.0);
    assert!(distribution.mins[2].is_nan());
    assert_eq!(legacy.timestamps.len(), 7);
    assert_eq!(legacy.tick_interval, TickInterval::Daily);

    let cms = cms.unwrap();
    assert_eq!(cms.distribution.unwrap().counts, distribution.counts);
}

#[test]
fn test_hourly_distribution_uses_local_hour() {
    let (legacy, _) = compute_both(
        StrategyType::HourlyDistribution,
        metadata(at(1, 0), at(7, 0)),
        vec![steps()],
    );
    let legacy = legacy.unwrap();
    let distribution = legacy.distribution.unwrap();
    assert_eq!(distribution.counts[9], 3);
    assert_eq!(distribution.counts[18], 1);
    assert_eq!(legacy.tick_interval, TickInterval::Hourly);
}

#[test]
fn test_legacy_only_metric_cannot_take_cms_path() {
    let legacy_only = MetricInputs::legacy("steps", vec![LegacyRecord::new(at(1, 9), Some(1.0))]);
    let context = ChartDataContextBuilder::new(metadata(at(1, 0), at(2, 0)))
        .metric(legacy_only)
        .build(&ComputationConfig::default())
        .unwrap();
    assert!(context.strategy_request(DataPath::Cms).is_err());
}

fn empty_metric() -> MetricInputs {
    MetricInputs::from_cms("sleep", cms("sleep", "h", &[]))
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
    }
}

#[test]
fn test_difference_and_ratio_ignore_extra_metrics() {
    for kind in [StrategyType::Difference, StrategyType::Ratio] {
        let (pair, _) = compute_both(kind, metadata(at(1, 0), at(6, 0)), vec![steps(), calories()]);
        let pair = pair.unwrap();

        for extra in [heart_rate(), empty_metric()] {
            let (legacy, cms) = compute_both(
                kind,
                metadata(at(1, 0), at(6, 0)),
                vec![steps(), calories(), extra],
            );
            let legacy = legacy.unwrap();
            assert_eq!(legacy.timestamps, pair.timestamps);
            assert_eq!(legacy.primary_raw_values, pair.primary_raw_values);
            assert_eq!(legacy.unit, pair.unit);
            assert_eq!(Some(&legacy), cms.as_ref());
        }
    }
}

#[test]
fn test_transform_joins_only_referenced_metrics() {
    let mut request = metadata(at(1, 0), at(6, 0));
    request.transform = Some(TransformExpressionBuilder::binary(ids::ADD, 0, 2));

    // heart rate sits between the two operands and shares no timestamp with them
    let (legacy, cms) = compute_both(
        StrategyType::Transform,
        request,
        vec![steps(), heart_rate(), calories()],
    );
    let legacy = legacy.unwrap();
    assert_eq!(Some(&legacy), cms.as_ref());
    assert_eq!(legacy.timestamps, vec![at(1, 9), at(5, 9)]);
    assert_eq!(legacy.primary_raw_values, vec![1200.0, 5400.0]);
    assert_eq!(legacy.unit, None);
}

#[test]
fn test_transform_without_operands_is_nan() {
    let mut request = metadata(at(1, 0), at(6, 0));
    request.transform = Some(TransformExpression::operation(ids::SUM, Vec::new()));

    let (legacy, _) = compute_both(StrategyType::Transform, request, vec![steps()]);
    let legacy = legacy.unwrap();
    assert_eq!(legacy.timestamps.len(), 4);
    assert!(legacy.primary_raw_values.iter().all(|value| value.is_nan()));
}

#[test]
fn test_normalized_percentage_of_max() {
    let mut request = metadata(at(1, 0), at(5, 0));
    request.normalization_mode = Some(NormalizationMode::PercentageOfMax);
    let (legacy, cms) = compute_both(StrategyType::Normalized, request, vec![steps(), calories()]);
    let legacy = legacy.unwrap();
    assert_eq!(Some(&legacy), cms.as_ref());

    assert_close(&legacy.primary_raw_values, &[20.0, 60.0, 60.0, 100.0]);
    assert_close(
        legacy.secondary_raw_values.as_deref().unwrap(),
        &[50.0, 50.0, 0.0, 100.0],
    );
    assert_eq!(legacy.unit.as_deref(), Some("%"));
}

#[test]
fn test_normalized_relative_to_max_flat_series_is_nan() {
    let flat = MetricInputs::from_cms(
        "calories",
        cms("calories", "kcal", &[(1, 9, Some(250.0)), (5, 9, Some(250.0))]),
    );
    let mut request = metadata(at(1, 0), at(5, 0));
    request.normalization_mode = Some(NormalizationMode::RelativeToMax);
    let (legacy, _) = compute_both(StrategyType::Normalized, request, vec![steps(), flat]);
    let legacy = legacy.unwrap();

    // days 1, 2 and 5
    assert_close(&legacy.primary_raw_values, &[0.0, 50.0, 100.0]);
    assert!(legacy
        .secondary_raw_values
        .unwrap()
        .iter()
        .all(|value| value.is_nan()));
    assert_eq!(legacy.unit.as_deref(), Some("%"));
}
