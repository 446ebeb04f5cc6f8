// ABOUTME: Configuration error types for computation and cut-over settings
// ABOUTME: Defines error variants for invalid ranges, env parse failures and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! Configuration error types.

use std::env;
use thiserror::Error;
use vitals_core::errors::{AppError, ErrorCode};

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g. zero histogram intervals)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Environment variable access error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to parse configuration value
    #[error("Parse error for {key}: {value:?}")]
    Parse {
        /// Variable or field that failed to parse
        key: String,
        /// Raw value
        value: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}
