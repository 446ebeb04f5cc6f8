// ABOUTME: Evaluates transform expression trees per timestamp over aligned metric series
// ABOUTME: Missing values and unknown operations evaluate to NaN instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::errors::{AppError, AppResult};
use vitals_core::models::TimedValue;

use super::expression::{TransformExpression, TransformOperand};
use super::operations::OperationRegistry;

/// Evaluator bound to an operation registry
pub struct TransformEvaluator<'a> {
    registry: &'a OperationRegistry,
}

impl<'a> TransformEvaluator<'a> {
    /// Create an evaluator resolving operations in `registry`
    #[must_use]
    pub const fn new(registry: &'a OperationRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate `expression` at every index of the aligned `metrics`
    ///
    /// # Errors
    ///
    /// Returns an input error if `metrics` is empty or the tree breaks the
    /// leaf contract, and an alignment error if the series lengths differ
    pub fn evaluate(
        &self,
        expression: &TransformExpression,
        metrics: &[Vec<TimedValue>],
    ) -> AppResult<Vec<f64>> {
        let Some(first) = metrics.first() else {
            return Err(AppError::invalid_input(
                "Transform evaluation requires at least one metric series",
            ));
        };
        let expected = first.len();
        if let Some((index, series)) = metrics
            .iter()
            .enumerate()
            .find(|(_, series)| series.len() != expected)
        {
            return Err(AppError::alignment_mismatch(expected, series.len(), index));
        }
        expression.validate()?;

        debug!(
            metrics = metrics.len(),
            points = expected,
            operation = expression.operation.as_deref().unwrap_or("metric"),
            "evaluating transform expression"
        );

        Ok((0..expected)
            .map(|row| self.evaluate_node(expression, metrics, row))
            .collect())
    }

    fn evaluate_node(
        &self,
        expression: &TransformExpression,
        metrics: &[Vec<TimedValue>],
        row: usize,
    ) -> f64 {
        let Some(operation_id) = expression.operation.as_deref() else {
            return expression
                .operands
                .first()
                .map_or(f64::NAN, |operand| self.evaluate_operand(operand, metrics, row));
        };

        let Some(operation) = self.registry.get(operation_id) else {
            return f64::NAN;
        };

        let operands: Vec<f64> = expression
            .operands
            .iter()
            .map(|operand| self.evaluate_operand(operand, metrics, row))
            .collect();
        operation.execute(&operands)
    }

    fn evaluate_operand(
        &self,
        operand: &TransformOperand,
        metrics: &[Vec<TimedValue>],
        row: usize,
    ) -> f64 {
        match operand {
            TransformOperand::Metric(index) => metrics
                .get(*index)
                .and_then(|series| series.get(row))
                .and_then(|point| point.value)
                .unwrap_or(f64::NAN),
            TransformOperand::Expression(inner) => self.evaluate_node(inner, metrics, row),
        }
    }
}
