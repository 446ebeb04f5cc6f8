// ABOUTME: Element-wise derived series math over aligned metric arrays
// ABOUTME: Difference, zero-safe ratio, max-normalization and the three strategy normalization modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use serde::{Deserialize, Serialize};
use vitals_core::constants::computation::RELATIVE_BASELINE_PERCENT;

/// Normalization applied by the normalized strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// `(v - min) / (max - min)`
    #[default]
    ZeroToOne,
    /// `v / max * 100`
    PercentageOfMax,
    /// Both series as a percentage of their own range on a shared 100% baseline
    RelativeToMax,
}

/// Derived series computations; inputs must already be aligned
pub struct DerivedSeriesMath;

impl DerivedSeriesMath {
    /// `a[i] - b[i]` over the common length
    #[must_use]
    pub fn difference(a: &[f64], b: &[f64]) -> Vec<f64> {
        a.iter().zip(b).map(|(x, y)| x - y).collect()
    }

    /// `a[i] / b[i]`, emitting `zero_sentinel` where `b[i] == 0`
    #[must_use]
    pub fn ratio(a: &[f64], b: &[f64], zero_sentinel: f64) -> Vec<f64> {
        a.iter()
            .zip(b)
            .map(|(x, y)| if *y == 0.0 { zero_sentinel } else { x / y })
            .collect()
    }

    /// `values[i] / max(values)` when the maximum is positive, else unchanged
    #[must_use]
    pub fn normalize(values: &[f64]) -> Vec<f64> {
        let max = max_of(values);
        if max > 0.0 {
            values.iter().map(|v| v / max).collect()
        } else {
            values.to_vec()
        }
    }

    /// Normalize a single series with a per-series mode
    ///
    /// `RelativeToMax` applied to one series behaves like the pair variant
    /// with that series alone.
    #[must_use]
    pub fn normalize_with_mode(values: &[f64], mode: NormalizationMode) -> Vec<f64> {
        match mode {
            NormalizationMode::ZeroToOne => zero_to_one(values),
            NormalizationMode::PercentageOfMax => percentage_of_max(values),
            NormalizationMode::RelativeToMax => relative_to_range(values),
        }
    }

    /// Normalize two aligned series with the same mode
    #[must_use]
    pub fn normalize_pair(
        primary: &[f64],
        secondary: &[f64],
        mode: NormalizationMode,
    ) -> (Vec<f64>, Vec<f64>) {
        (
            Self::normalize_with_mode(primary, mode),
            Self::normalize_with_mode(secondary, mode),
        )
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn zero_to_one(values: &[f64]) -> Vec<f64> {
    let (min, max) = (min_of(values), max_of(values));
    let range = max - min;
    if range > 0.0 {
        values.iter().map(|v| (v - min) / range).collect()
    } else {
        vec![0.0; values.len()]
    }
}

fn percentage_of_max(values: &[f64]) -> Vec<f64> {
    let max = max_of(values);
    if max > 0.0 {
        values.iter().map(|v| v / max * 100.0).collect()
    } else {
        values.to_vec()
    }
}

// A flat series carries no signal: every element becomes NaN.
fn relative_to_range(values: &[f64]) -> Vec<f64> {
    let (min, max) = (min_of(values), max_of(values));
    let range = max - min;
    if range > 0.0 {
        values
            .iter()
            .map(|v| (v - min) / range * RELATIVE_BASELINE_PERCENT)
            .collect()
    } else {
        vec![f64::NAN; values.len()]
    }
}
