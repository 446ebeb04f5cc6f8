// ABOUTME: Transform expression subsystem: trees, operations, evaluation, building and labels
// ABOUTME: Operations are resolved through an explicit OperationRegistry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Transform Expressions
//!
//! A transform is a tree of named operations over metric-index leaves,
//! evaluated independently at every row of a set of aligned series.
//!
//! ```text
//! Divide
//! ├── Metric(0)
//! └── Sum
//!     ├── Metric(1)
//!     └── Metric(2)
//! ```
//!
//! NaN is the missing-value marker: missing metric values, unknown
//! operations and operations given too few operands all yield NaN.

/// Expression builder helpers
pub mod builder;
/// Per-row expression evaluation
pub mod evaluator;
/// Expression tree types
pub mod expression;
/// Label generation
pub mod label;
/// Operation definitions and registry
pub mod operations;

pub use builder::TransformExpressionBuilder;
pub use evaluator::TransformEvaluator;
pub use expression::{TransformExpression, TransformOperand};
pub use label::generate_label;
pub use operations::{Arity, OperationRegistry, TransformOperation};
