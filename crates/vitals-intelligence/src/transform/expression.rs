// ABOUTME: Transform expression tree with metric-index leaves and named operation nodes
// ABOUTME: Enforces the leaf contract and exposes tree inspection helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use serde::{Deserialize, Serialize};
use vitals_core::errors::{AppError, AppResult};

/// Operand of an expression node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOperand {
    /// Index into the aligned metric list
    Metric(usize),
    /// Nested sub-expression
    Expression(Box<TransformExpression>),
}

/// Node of a transform expression tree
///
/// A node without an operation is a leaf and must hold exactly one
/// [`TransformOperand::Metric`] operand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformExpression {
    /// Registered operation id, `None` for a leaf
    pub operation: Option<String>,
    /// Operands, evaluated left to right
    pub operands: Vec<TransformOperand>,
}

impl TransformExpression {
    /// Leaf referencing metric `index`
    #[must_use]
    pub fn metric(index: usize) -> Self {
        Self {
            operation: None,
            operands: vec![TransformOperand::Metric(index)],
        }
    }

    /// Operation node
    #[must_use]
    pub fn operation(id: impl Into<String>, operands: Vec<TransformOperand>) -> Self {
        Self {
            operation: Some(id.into()),
            operands,
        }
    }

    /// Whether this node is a bare metric reference
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.operation.is_none()
    }

    /// Check the leaf contract on every node of the tree
    ///
    /// # Errors
    ///
    /// Returns an input error for a leaf without exactly one metric operand.
    /// Operation nodes with too few operands are valid and evaluate to NaN.
    pub fn validate(&self) -> AppResult<()> {
        if self.is_leaf() {
            return match self.operands.as_slice() {
                [TransformOperand::Metric(_)] => Ok(()),
                _ => Err(AppError::invalid_input(
                    "A leaf transform node must hold exactly one metric operand",
                )),
            };
        }

        for operand in &self.operands {
            if let TransformOperand::Expression(inner) = operand {
                inner.validate()?;
            }
        }
        Ok(())
    }

    /// Every metric index referenced by the tree, in left-to-right order
    #[must_use]
    pub fn metric_indices(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        self.collect_indices(&mut indices);
        indices
    }

    /// Copy of the tree with every metric index passed through `map`
    #[must_use]
    pub fn remap_metrics(&self, map: &impl Fn(usize) -> usize) -> Self {
        Self {
            operation: self.operation.clone(),
            operands: self
                .operands
                .iter()
                .map(|operand| match operand {
                    TransformOperand::Metric(index) => TransformOperand::Metric(map(*index)),
                    TransformOperand::Expression(inner) => {
                        TransformOperand::Expression(Box::new(inner.remap_metrics(map)))
                    }
                })
                .collect(),
        }
    }

    fn collect_indices(&self, out: &mut Vec<usize>) {
        for operand in &self.operands {
            match operand {
                TransformOperand::Metric(index) => out.push(*index),
                TransformOperand::Expression(inner) => inner.collect_indices(out),
            }
        }
    }
}

impl From<TransformExpression> for TransformOperand {
    fn from(expression: TransformExpression) -> Self {
        // A bare leaf collapses to its metric reference
        match expression.operands.as_slice() {
            [Self::Metric(index)] if expression.is_leaf() => Self::Metric(*index),
            _ => Self::Expression(Box::new(expression)),
        }
    }
}
