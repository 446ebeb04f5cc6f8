// ABOUTME: Computation configuration for smoothing, forward-fill, ratio and histogram settings
// ABOUTME: Environment-driven with validated defaults, plus shared env parsing helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! Computation Configuration
//!
//! Numeric knobs shared by every strategy. Values come from the environment
//! with the defaults in `vitals_core::constants::computation`.

/// Configuration error types
pub mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use vitals_core::constants::computation::{
    DEFAULT_DISTRIBUTION_INTERVALS, DEFAULT_FORWARD_FILL_SEED, DEFAULT_RATIO_ZERO_SENTINEL,
    DEFAULT_SMOOTHING_WINDOW,
};
use vitals_core::constants::env_vars;

use crate::derived::NormalizationMode;

/// Numeric settings for strategy computations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputationConfig {
    /// Half-width of the centered moving average (`<= 1` disables smoothing)
    pub smoothing_window: usize,
    /// Value used before the first known value on a forward-filled timeline
    pub forward_fill_seed: f64,
    /// Value emitted by ratio where the denominator is zero
    pub ratio_zero_sentinel: f64,
    /// Number of uniform intervals in distribution histograms
    pub distribution_intervals: usize,
    /// Mode used by the normalized strategy when a request names none
    pub default_normalization_mode: NormalizationMode,
}

impl Default for ComputationConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            forward_fill_seed: DEFAULT_FORWARD_FILL_SEED,
            ratio_zero_sentinel: DEFAULT_RATIO_ZERO_SENTINEL,
            distribution_intervals: DEFAULT_DISTRIBUTION_INTERVALS,
            default_normalization_mode: NormalizationMode::default(),
        }
    }
}

impl ComputationConfig {
    /// Load from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            smoothing_window: env_parse(env_vars::SMOOTHING_WINDOW, defaults.smoothing_window)?,
            distribution_intervals: env_parse(
                env_vars::DISTRIBUTION_INTERVALS,
                defaults.distribution_intervals,
            )?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram has no intervals or a fill value is not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distribution_intervals == 0 {
            return Err(ConfigError::InvalidRange(
                "distribution_intervals must be at least 1",
            ));
        }
        if !self.forward_fill_seed.is_finite() || !self.ratio_zero_sentinel.is_finite() {
            return Err(ConfigError::InvalidRange(
                "forward_fill_seed and ratio_zero_sentinel must be finite",
            ));
        }
        Ok(())
    }
}

/// Parse an environment variable, returning `default` when it is unset
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the variable is set but does not parse
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Parse {
            key: key.to_owned(),
            value: raw,
        }),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}

/// Parse a boolean flag accepting `true/false`, `1/0`, `yes/no`, `on/off`
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for any other value
pub fn env_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Parse {
                key: key.to_owned(),
                value: raw,
            }),
        },
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(ConfigError::EnvVar(e)),
    }
}
