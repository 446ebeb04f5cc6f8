// ABOUTME: Centered moving average smoothing for aligned metric series
// ABOUTME: Variable-width window clamped at the series edges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

/// Centered moving average over `[i - window, i + window]`, clamped to bounds
///
/// A `window` of 0 or 1 returns the input unchanged. Edge points average
/// over the part of the window that exists, so the output always has the
/// input's length.
#[must_use]
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let last = values.len() - 1;
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(window);
            let end = i.saturating_add(window).min(last);
            let slice = &values[start..=end];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}
