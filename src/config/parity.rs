// ABOUTME: Parity harness options: failure mode and numeric tolerance
// ABOUTME: Diagnostic mode reports failures, strict mode turns them into errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vitals_core::constants::{env_vars, parity::DEFAULT_VALUE_EPSILON};
use vitals_intelligence::config::{env_bool, env_parse, ConfigError};

/// What the harness does with a disagreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityMode {
    /// Return a failed result
    #[default]
    Diagnostic,
    /// Return a parity-violation error
    Strict,
}

impl FromStr for ParityMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diagnostic" => Ok(Self::Diagnostic),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::Parse {
                key: env_vars::PARITY_MODE.to_owned(),
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ParityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diagnostic => f.write_str("diagnostic"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Tolerance and failure handling for one parity run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParityOptions {
    /// Failure handling
    pub mode: ParityMode,
    /// Largest accepted `|legacy - cms|` when drift is allowed
    pub value_epsilon: f64,
    /// When false, values must be bit-identical
    pub allow_floating_point_drift: bool,
}

impl Default for ParityOptions {
    fn default() -> Self {
        Self {
            mode: ParityMode::Diagnostic,
            value_epsilon: DEFAULT_VALUE_EPSILON,
            allow_floating_point_drift: true,
        }
    }
}

impl ParityOptions {
    /// Strict-mode options with default tolerance
    #[must_use]
    pub fn strict() -> Self {
        Self {
            mode: ParityMode::Strict,
            ..Self::default()
        }
    }

    /// Load from `VITALS_PARITY_MODE`, `VITALS_PARITY_EPSILON` and `VITALS_PARITY_ALLOW_DRIFT`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the epsilon is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let options = Self {
            mode: env_parse(env_vars::PARITY_MODE, defaults.mode)?,
            value_epsilon: env_parse(env_vars::PARITY_EPSILON, defaults.value_epsilon)?,
            allow_floating_point_drift: env_bool(
                env_vars::PARITY_ALLOW_DRIFT,
                defaults.allow_floating_point_drift,
            )?,
        };
        options.validate()?;
        Ok(options)
    }

    /// Validate value ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the epsilon is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.value_epsilon.is_finite() || self.value_epsilon < 0.0 {
            return Err(ConfigError::InvalidRange(
                "value_epsilon must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}
