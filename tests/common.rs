// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup and canonical/legacy metric fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitals_parity`

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::Once;
use vitals_core::models::{CanonicalMetricSeries, MetricSample};
use vitals_intelligence::{
    ChartDataContext, ChartDataContextBuilder, ChartMetadata, ComputationConfig, MetricInputs,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Local time on 2024-01-`day`
pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}

/// Canonical series recorded at UTC+1
pub fn cms_series(id: &str, unit: &str, points: &[(u32, u32, Option<f64>)]) -> CanonicalMetricSeries {
    let offset = FixedOffset::east_opt(3600).unwrap();
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

/// Resting heart rate over five days with one gap
pub fn resting_heart_rate() -> MetricInputs {
    MetricInputs::from_cms(
        "resting",
        cms_series(
            "heart_rate.resting",
            "bpm",
            &[
                (1, 7, Some(58.0)),
                (2, 7, Some(61.0)),
                (3, 7, None),
                (4, 7, Some(57.0)),
                (5, 7, Some(60.0)),
            ],
        ),
    )
    .with_display_name("Resting")
}

/// Average heart rate on four of the five days, same hour as the resting samples
pub fn average_heart_rate() -> MetricInputs {
    MetricInputs::from_cms(
        "average",
        cms_series(
            "heart_rate.average",
            "bpm",
            &[
                (1, 7, Some(72.0)),
                (2, 7, Some(75.0)),
                (4, 7, Some(70.0)),
                (5, 7, Some(74.0)),
            ],
        ),
    )
    .with_display_name("Average")
}

/// Metadata for January 1st through 5th
pub fn metadata(metric_type: &str) -> ChartMetadata {
    ChartMetadata {
        metric_type: metric_type.to_owned(),
        primary_subtype: None,
        secondary_subtype: None,
        from: at(1, 0),
        to: at(5, 0),
        normalization_mode: None,
        transform: None,
    }
}

/// Context over the given metrics with default computation settings
pub fn context(metrics: Vec<MetricInputs>, metadata: ChartMetadata) -> ChartDataContext {
    ChartDataContextBuilder::new(metadata)
        .metrics(metrics)
        .build(&ComputationConfig::default())
        .unwrap()
}
