// ABOUTME: Chart computation engine for legacy and canonical health metric series
// ABOUTME: Alignment, smoothing, derived math, transforms, distributions and strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

#![deny(unsafe_code)]

//! # Vitals Intelligence
//!
//! Pure, synchronous computations behind every chart. Nothing in this crate
//! performs I/O; every strategy is a function of its request.
//!
//! ## Modules
//!
//! - **alignment**: unified daily timelines, forward-fill and exact-timestamp joins
//! - **smoothing**: centered moving average
//! - **derived**: difference, ratio and normalization
//! - **transform**: expression trees, operation registry, evaluation and labels
//! - **distribution**: weekday / hour-of-day bucketing and histograms
//! - **strategies**: the computation strategy family and its factory
//! - **context**: per-request chart data context
//! - **config**: numeric computation settings

/// Timeline alignment
pub mod alignment;
/// Computation configuration
pub mod config;
/// Per-request chart data context
pub mod context;
/// Derived series math
pub mod derived;
/// Bucket distributions
pub mod distribution;
/// Moving-average smoothing
pub mod smoothing;
/// Computation strategies
pub mod strategies;
/// Transform expressions
pub mod transform;

pub use config::{ComputationConfig, ConfigError};
pub use context::{ChartDataContext, ChartDataContextBuilder, ChartMetadata, MetricInputs};
pub use strategies::{
    build_strategy, ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType,
};
