// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Series keys, computation defaults, distribution bucket sizes and env variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! Constants grouped by domain.

/// Keys used when chart results are flattened into named series
pub mod series_keys {
    /// Primary metric slot
    pub const PRIMARY: &str = "Primary";
    /// Secondary metric slot
    pub const SECONDARY: &str = "Secondary";
    /// Per-bucket minimum of a distribution
    pub const BUCKET_MIN: &str = "Min";
    /// Per-bucket maximum of a distribution
    pub const BUCKET_MAX: &str = "Max";
    /// Per-bucket range of a distribution
    pub const BUCKET_RANGE: &str = "Range";
    /// Per-bucket sample count of a distribution
    pub const BUCKET_COUNT: &str = "Count";
}

/// Default values for numeric computations
pub mod computation {
    /// Half-width of the centered moving average
    pub const DEFAULT_SMOOTHING_WINDOW: usize = 3;
    /// Value emitted for timeline slots before the first known value
    pub const DEFAULT_FORWARD_FILL_SEED: f64 = 0.0;
    /// Value emitted by ratio when the denominator is zero
    pub const DEFAULT_RATIO_ZERO_SENTINEL: f64 = 0.0;
    /// Number of uniform value intervals in distribution histograms
    pub const DEFAULT_DISTRIBUTION_INTERVALS: usize = 10;
    /// Baseline used by relative-to-max normalization
    pub const RELATIVE_BASELINE_PERCENT: f64 = 100.0;
}

/// Calendar bucket sizes and the synthetic timeline used to compare buckets
pub mod buckets {
    /// Day-of-week buckets (Monday first)
    pub const WEEKDAY_BUCKETS: usize = 7;
    /// Hour-of-day buckets
    pub const HOUR_BUCKETS: usize = 24;
    /// Year of the reference Monday anchoring synthetic bucket timelines
    pub const REFERENCE_MONDAY_YEAR: i32 = 2024;
    /// Month of the reference Monday
    pub const REFERENCE_MONDAY_MONTH: u32 = 1;
    /// Day of the reference Monday (2024-01-01 is a Monday)
    pub const REFERENCE_MONDAY_DAY: u32 = 1;
}

/// Tick interval thresholds, in days of span covered by a result
pub mod tick_thresholds {
    /// Up to this span ticks are hourly
    pub const HOURLY_MAX_DAYS: i64 = 2;
    /// Up to this span ticks are daily
    pub const DAILY_MAX_DAYS: i64 = 60;
    /// Up to this span ticks are weekly, beyond it monthly
    pub const WEEKLY_MAX_DAYS: i64 = 366;
}

/// Parity tolerance defaults
pub mod parity {
    /// Absolute tolerance when floating point drift is allowed
    pub const DEFAULT_VALUE_EPSILON: f64 = 1e-9;
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// Global CMS switch
    pub const USE_CMS_DATA: &str = "VITALS_USE_CMS_DATA";
    /// Prefix of per-strategy CMS switches, e.g. `VITALS_CMS_SINGLE_METRIC`
    pub const CMS_STRATEGY_PREFIX: &str = "VITALS_CMS_";
    /// Minimum in-range CMS samples before the CMS path is chosen
    pub const CMS_MIN_SAMPLES: &str = "VITALS_CMS_MIN_SAMPLES";
    /// Parity harness mode (`diagnostic` or `strict`)
    pub const PARITY_MODE: &str = "VITALS_PARITY_MODE";
    /// Parity absolute tolerance
    pub const PARITY_EPSILON: &str = "VITALS_PARITY_EPSILON";
    /// Whether parity allows floating point drift
    pub const PARITY_ALLOW_DRIFT: &str = "VITALS_PARITY_ALLOW_DRIFT";
    /// Smoothing half-width
    pub const SMOOTHING_WINDOW: &str = "VITALS_SMOOTHING_WINDOW";
    /// Distribution histogram interval count
    pub const DISTRIBUTION_INTERVALS: &str = "VITALS_DISTRIBUTION_INTERVALS";
}

/// Service names for structured logging
pub mod service_names {
    /// Name reported by the CLI and library logging
    pub const VITALS_PARITY: &str = "vitals-parity";
}
