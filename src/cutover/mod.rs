// ABOUTME: Legacy-to-CMS cut-over: strategy constructor registry and routing service
// ABOUTME: Decides per request which representation a strategy reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

/// Constructor registry
pub mod registry;
/// Path selection and parity runner
pub mod service;

pub use registry::{StrategyConstructor, StrategyConstructors, StrategyRegistry};
pub use service::{CutOverDecision, ParityRun, StrategyCutOverService};
