// ABOUTME: Core data models shared by the strategy engine and the parity harness
// ABOUTME: Re-exports metric sample inputs and chart computation outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Data Models
//!
//! All models are value-like and scoped to one chart request.
//!
//! - `LegacyRecord`: flat record from the legacy store
//! - `CanonicalMetricSeries` / `MetricSample`: normalized CMS representation
//! - `TimedValue`: representation-neutral point used inside the core
//! - `ChartComputationResult`: output contract for the rendering layer

mod result;
mod sample;

pub use result::{
    BucketKind, ChartComputationResult, DateRange, DistributionResult, SeriesResult,
    TickInterval, ValueInterval,
};
pub use sample::{
    CanonicalMetricSeries, LegacyRecord, MetricQuality, MetricSample, Provenance, TimeSemantics,
    TimedValue,
};
