// ABOUTME: Unified error handling for the Vitals engine with standard error codes
// ABOUTME: Defines ErrorCode, AppError and AppResult shared by every workspace crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. The error
//! taxonomy follows the computation core:
//!
//! - input errors (empty or missing arguments to the evaluator / aligner)
//! - alignment errors (series of different lengths handed to the evaluator)
//! - configuration errors (unsupported strategy, invalid settings)
//! - parity violations (raised only when the harness runs in strict mode)
//!
//! "No data" is never an error: strategies return `None` instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the engine
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Required argument missing or empty
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Aligned series handed to the evaluator have different lengths
    #[serde(rename = "ALIGNMENT_MISMATCH")]
    AlignmentMismatch = 3001,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed or failed validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6001,
    /// No constructor pair registered for the requested strategy type
    #[serde(rename = "UNSUPPORTED_STRATEGY")]
    UnsupportedStrategy = 6002,

    // Parity (7000-7999)
    /// Legacy and CMS results disagree (strict mode only)
    #[serde(rename = "PARITY_VIOLATION")]
    ParityViolation = 7000,

    // Internal Errors (9000-9999)
    /// Reading a request or writing a report failed
    #[serde(rename = "IO_ERROR")]
    IoError = 9001,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::AlignmentMismatch => "Aligned series do not have matching lengths",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::UnsupportedStrategy => "The requested strategy is not supported",
            Self::ParityViolation => "Legacy and CMS results are not equivalent",
            Self::IoError => "I/O operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the error stems from caller-supplied arguments
    #[must_use]
    pub const fn is_validation(self) -> bool {
        matches!(self, Self::InvalidInput | Self::AlignmentMismatch)
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Chart request the error belongs to
    pub request_id: Option<Uuid>,
    /// Strategy that was executing, if any
    pub strategy: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            strategy: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach the chart request id
    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.context.request_id = Some(request_id);
        self
    }

    /// Attach the executing strategy name
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.context.strategy = Some(strategy.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input (null/empty required argument)
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Series lengths disagree
    #[must_use]
    pub fn alignment_mismatch(expected: usize, actual: usize, series_index: usize) -> Self {
        Self::new(
            ErrorCode::AlignmentMismatch,
            format!(
                "Series {series_index} has {actual} points but {expected} were expected; align metrics by timestamp first"
            ),
        )
        .with_details(serde_json::json!({
            "expected": expected,
            "actual": actual,
            "series_index": series_index,
        }))
    }

    /// Requested strategy has no registered constructors
    #[must_use]
    pub fn unsupported_strategy(strategy: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::UnsupportedStrategy,
            format!("No strategy factory registered for {strategy}"),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Parity disagreement raised in strict mode
    #[must_use]
    pub fn parity_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParityViolation, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::new(ErrorCode::IoError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_mismatch_details() {
        let error = AppError::alignment_mismatch(3, 2, 1);
        assert_eq!(error.code, ErrorCode::AlignmentMismatch);
        assert!(error.code.is_validation());
        assert_eq!(error.context.details["actual"], 2);
        assert!(error.to_string().contains("Series 1 has 2 points"));
    }

    #[test]
    fn test_error_context_builders() {
        let request_id = Uuid::new_v4();
        let error = AppError::unsupported_strategy("WeeklyDistribution")
            .with_request_id(request_id)
            .with_strategy("WeeklyDistribution");

        assert_eq!(error.code, ErrorCode::UnsupportedStrategy);
        assert!(!error.code.is_validation());
        assert_eq!(error.context.request_id, Some(request_id));
        assert_eq!(error.context.strategy.as_deref(), Some("WeeklyDistribution"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ParityViolation).unwrap();
        assert_eq!(json, "\"PARITY_VIOLATION\"");
    }

    #[test]
    fn test_serde_json_conversion_keeps_source() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(std::error::Error::source(&error).is_some());
    }
}
