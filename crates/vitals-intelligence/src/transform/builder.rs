// ABOUTME: Convenience constructors for common transform expression shapes
// ABOUTME: Unary, binary, chained and n-ary expressions over metric indices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use vitals_core::errors::{AppError, AppResult};

use super::expression::{TransformExpression, TransformOperand};
use super::operations::OperationRegistry;

/// Builds expression trees; arity is enforced at evaluation time
pub struct TransformExpressionBuilder;

impl TransformExpressionBuilder {
    /// `op(M[index])`
    #[must_use]
    pub fn unary(operation: &str, index: usize) -> TransformExpression {
        TransformExpression::operation(operation, vec![TransformOperand::Metric(index)])
    }

    /// `op(M[left], M[right])`
    #[must_use]
    pub fn binary(operation: &str, left: usize, right: usize) -> TransformExpression {
        TransformExpression::operation(
            operation,
            vec![TransformOperand::Metric(left), TransformOperand::Metric(right)],
        )
    }

    /// `outer(inner)`
    #[must_use]
    pub fn chained(outer: &str, inner: TransformExpression) -> TransformExpression {
        TransformExpression::operation(outer, vec![inner.into()])
    }

    /// `outer(inner, M[index])`
    #[must_use]
    pub fn chained_binary(
        outer: &str,
        inner: TransformExpression,
        index: usize,
    ) -> TransformExpression {
        TransformExpression::operation(outer, vec![inner.into(), TransformOperand::Metric(index)])
    }

    /// `op(M[i0], M[i1], ...)` for a registered operation
    ///
    /// # Errors
    ///
    /// Returns an input error if `operation` is not registered or `indices` is empty
    pub fn n_ary(
        registry: &OperationRegistry,
        operation: &str,
        indices: &[usize],
    ) -> AppResult<TransformExpression> {
        if !registry.contains(operation) {
            return Err(AppError::invalid_input(format!(
                "Transform operation '{operation}' is not registered"
            )));
        }
        if indices.is_empty() {
            return Err(AppError::invalid_input(format!(
                "Transform operation '{operation}' needs at least one metric index"
            )));
        }
        Ok(TransformExpression::operation(
            operation,
            indices.iter().copied().map(TransformOperand::Metric).collect(),
        ))
    }
}
