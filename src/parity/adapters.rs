// ABOUTME: Converts chart computation results into keyed parity series
// ABOUTME: Primary/Secondary slots, one series per multi-metric item, or bucket statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use vitals_core::constants::series_keys;
use vitals_core::models::{ChartComputationResult, DistributionResult};
use vitals_intelligence::distribution::bucket_timestamp;

use super::ParitySeries;

impl ParitySeries {
    /// Series of a chart result; `None` produces no series
    #[must_use]
    pub fn from_chart_result(result: Option<&ChartComputationResult>) -> Vec<Self> {
        let Some(result) = result else {
            return Vec::new();
        };

        if let Some(series) = &result.series {
            return series
                .iter()
                .map(|item| Self::from_values(&item.series_id, &item.timestamps, &item.raw_values))
                .collect();
        }

        let mut out = vec![Self::from_values(
            series_keys::PRIMARY,
            &result.timestamps,
            &result.primary_raw_values,
        )];
        if let Some(secondary) = &result.secondary_raw_values {
            out.push(Self::from_values(
                series_keys::SECONDARY,
                &result.timestamps,
                secondary,
            ));
        }
        out
    }

    /// Min, Max, Range and Count series of a distribution on the synthetic bucket timeline
    #[must_use]
    pub fn from_distribution(distribution: Option<&DistributionResult>) -> Vec<Self> {
        let Some(distribution) = distribution else {
            return Vec::new();
        };

        let timeline: Vec<_> = (0..distribution.mins.len())
            .map(|index| bucket_timestamp(distribution.kind, index))
            .collect();
        let counts: Vec<f64> = distribution.counts.iter().map(|c| *c as f64).collect();

        vec![
            Self::from_values(series_keys::BUCKET_MIN, &timeline, &distribution.mins),
            Self::from_values(series_keys::BUCKET_MAX, &timeline, &distribution.maxs),
            Self::from_values(series_keys::BUCKET_RANGE, &timeline, &distribution.ranges),
            Self::from_values(series_keys::BUCKET_COUNT, &timeline, &counts),
        ]
    }
}
