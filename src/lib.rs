// ABOUTME: Main library entry point for the Vitals strategy computation and parity engine
// ABOUTME: Cut-over routing, parity validation, configuration, logging and request loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

#![deny(unsafe_code)]

//! # Vitals Parity
//!
//! Chart computation for health metrics stored in two representations:
//! flat legacy records and canonical metric series (CMS). The same strategy
//! runs on either representation, and the parity harness checks that both
//! produce the same chart before a strategy is cut over to CMS.
//!
//! ## Architecture
//!
//! - **vitals-core**: errors, constants, sample and result models
//! - **vitals-intelligence**: alignment, smoothing, transforms, distributions
//!   and the strategy family
//! - **cutover**: per-request path selection and the strategy registry
//! - **parity**: layered legacy-versus-CMS comparison
//! - **config**: environment-driven settings for all of the above
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitals_parity::config::VitalsConfig;
//! use vitals_parity::cutover::StrategyCutOverService;
//! use vitals_parity::request::ChartRequest;
//! use vitals_core::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = VitalsConfig::from_env()?;
//!     let request = ChartRequest::from_path("request.json".as_ref())?;
//!     let strategy = request.strategy;
//!     let context = request.into_context(&config)?;
//!
//!     let service = StrategyCutOverService::new(config);
//!     let chart = service.compute(&context, strategy)?;
//!     println!("has data: {}", chart.is_some());
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Legacy-to-CMS cut-over routing
pub mod cutover;

/// Structured logging setup
pub mod logging;

/// Legacy-versus-CMS parity validation
pub mod parity;

/// Chart request loading
pub mod request;

pub use vitals_core::errors::{AppError, AppResult, ErrorCode};
