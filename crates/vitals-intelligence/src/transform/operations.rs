// ABOUTME: Named transform operations and the explicit registry used to look them up
// ABOUTME: Registers built-in math operations; re-registration overwrites (last writer wins)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! # Operation Registry
//!
//! Operations are looked up by id when expressions are built and evaluated.
//! The registry is an explicit object passed by reference (or shared through
//! an `Arc`) instead of process-wide state:
//!
//! - [`OperationRegistry::with_builtins`] registers the built-in operations
//! - [`OperationRegistry::register`] overwrites an existing id, which lets
//!   tests stub an operation without touching any other registration
//!
//! The registry is built once at startup and then only read.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

/// Built-in operation ids
pub mod ids {
    /// Natural logarithm, NaN for `<= 0`
    pub const LOG: &str = "Log";
    /// Square root, NaN for `< 0`
    pub const SQRT: &str = "Sqrt";
    /// Absolute value
    pub const ABS: &str = "Abs";
    /// `e^x`
    pub const EXP: &str = "Exp";
    /// `-x`
    pub const NEGATE: &str = "Negate";
    /// `a + b`
    pub const ADD: &str = "Add";
    /// `a - b`
    pub const SUBTRACT: &str = "Subtract";
    /// `a * b`
    pub const MULTIPLY: &str = "Multiply";
    /// `a / b`, NaN when `b == 0`
    pub const DIVIDE: &str = "Divide";
    /// Sum of all operands
    pub const SUM: &str = "Sum";
    /// Mean of all operands
    pub const AVERAGE: &str = "Average";
    /// Smallest operand
    pub const MIN: &str = "Min";
    /// Largest operand
    pub const MAX: &str = "Max";
}

/// Number of operands an operation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one operand
    Unary,
    /// Exactly two operands
    Binary,
    /// One or more operands
    Variadic,
}

impl Arity {
    /// Minimum operand count before the operation yields NaN
    #[must_use]
    pub const fn min_operands(self) -> usize {
        match self {
            Self::Unary | Self::Variadic => 1,
            Self::Binary => 2,
        }
    }
}

type OperationFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Named numeric operation applied per timestamp
#[derive(Clone)]
pub struct TransformOperation {
    id: String,
    display_name: String,
    arity: Arity,
    function: Arc<OperationFn>,
}

impl TransformOperation {
    /// Create an operation
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        arity: Arity,
        function: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            arity,
            function: Arc::new(function),
        }
    }

    /// Registry key
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Operand arity
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Apply the operation, NaN when too few operands are supplied
    #[must_use]
    pub fn execute(&self, operands: &[f64]) -> f64 {
        if operands.len() < self.arity.min_operands() {
            return f64::NAN;
        }
        (self.function)(operands)
    }
}

impl fmt::Debug for TransformOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOperation")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Id-keyed operation registry
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Arc<TransformOperation>>,
}

impl OperationRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in operations
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    /// Register an operation, replacing any previous one with the same id
    ///
    /// # Returns
    ///
    /// The operation that was replaced, if any
    pub fn register(&mut self, operation: TransformOperation) -> Option<Arc<TransformOperation>> {
        let id = operation.id().to_owned();
        let previous = self.operations.insert(id.clone(), Arc::new(operation));
        if previous.is_some() {
            warn!("Transform operation '{}' re-registered, previous definition replaced", id);
        } else {
            debug!("Registered transform operation '{}'", id);
        }
        previous
    }

    /// Look up an operation by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<TransformOperation>> {
        self.operations.get(id)
    }

    /// Check if an operation is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.operations.contains_key(id)
    }

    /// Number of registered operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn register_builtins(&mut self) {
        self.register(TransformOperation::new(ids::LOG, "Natural log", Arity::Unary, |v| {
            if v[0] > 0.0 {
                v[0].ln()
            } else {
                f64::NAN
            }
        }));
        self.register(TransformOperation::new(ids::SQRT, "Square root", Arity::Unary, |v| {
            if v[0] >= 0.0 {
                v[0].sqrt()
            } else {
                f64::NAN
            }
        }));
        self.register(TransformOperation::new(ids::ABS, "Absolute value", Arity::Unary, |v| {
            v[0].abs()
        }));
        self.register(TransformOperation::new(ids::EXP, "Exponential", Arity::Unary, |v| {
            v[0].exp()
        }));
        self.register(TransformOperation::new(ids::NEGATE, "Negate", Arity::Unary, |v| -v[0]));

        self.register(TransformOperation::new(ids::ADD, "Add", Arity::Binary, |v| v[0] + v[1]));
        self.register(TransformOperation::new(ids::SUBTRACT, "Subtract", Arity::Binary, |v| {
            v[0] - v[1]
        }));
        self.register(TransformOperation::new(ids::MULTIPLY, "Multiply", Arity::Binary, |v| {
            v[0] * v[1]
        }));
        self.register(TransformOperation::new(ids::DIVIDE, "Divide", Arity::Binary, |v| {
            if v[1] == 0.0 {
                f64::NAN
            } else {
                v[0] / v[1]
            }
        }));

        self.register(TransformOperation::new(ids::SUM, "Sum", Arity::Variadic, |v| {
            v.iter().sum()
        }));
        self.register(TransformOperation::new(ids::AVERAGE, "Average", Arity::Variadic, |v| {
            v.iter().sum::<f64>() / v.len() as f64
        }));
        self.register(TransformOperation::new(ids::MIN, "Minimum", Arity::Variadic, |v| {
            v.iter().copied().fold(f64::INFINITY, f64::min)
        }));
        self.register(TransformOperation::new(ids::MAX, "Maximum", Arity::Variadic, |v| {
            v.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        }));
    }
}
