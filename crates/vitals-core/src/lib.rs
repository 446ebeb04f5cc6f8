// ABOUTME: Core types and constants for the Vitals strategy computation engine
// ABOUTME: Foundation crate with error handling, data models and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

#![deny(unsafe_code)]

//! # Vitals Core
//!
//! Foundation crate providing shared types for the Vitals engine. This crate
//! is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Defaults, series keys and environment variable names
//! - **models**: Legacy and CMS inputs, chart computation outputs

/// Unified error handling system with standard error codes
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Core data models (`LegacyRecord`, `CanonicalMetricSeries`, `ChartComputationResult`)
pub mod models;
