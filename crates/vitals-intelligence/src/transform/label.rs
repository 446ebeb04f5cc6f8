// ABOUTME: Human-readable labels for transform expressions
// ABOUTME: Infix symbols for arithmetic, function notation otherwise, "[Transform] " prefix at the root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use super::expression::{TransformExpression, TransformOperand};
use super::operations::ids;

/// Prefix applied when the root node is an operation
pub const TRANSFORM_LABEL_PREFIX: &str = "[Transform] ";

fn symbol(operation: &str) -> &str {
    match operation {
        ids::LOG => "log",
        ids::SQRT => "√",
        ids::ADD => "+",
        ids::SUBTRACT => "-",
        ids::MULTIPLY => "×",
        ids::DIVIDE => "/",
        other => other,
    }
}

fn is_infix(operation: &str) -> bool {
    matches!(
        operation,
        ids::ADD | ids::SUBTRACT | ids::MULTIPLY | ids::DIVIDE
    )
}

/// Label for `expression` using `metric_labels[i]` for metric `i`
///
/// Unknown metric indices render as `M{i}`.
#[must_use]
pub fn generate_label(expression: &TransformExpression, metric_labels: &[String]) -> String {
    let body = node_label(expression, metric_labels, false);
    if expression.is_leaf() {
        body
    } else {
        format!("{TRANSFORM_LABEL_PREFIX}{body}")
    }
}

// `parenthesize` is set for infix operands nested in another infix node
fn node_label(expression: &TransformExpression, labels: &[String], parenthesize: bool) -> String {
    let Some(operation) = expression.operation.as_deref() else {
        return expression
            .operands
            .first()
            .map(|operand| operand_label(operand, labels, false))
            .unwrap_or_default();
    };

    if is_infix(operation) && expression.operands.len() == 2 {
        let joined = format!(
            "{} {} {}",
            operand_label(&expression.operands[0], labels, true),
            symbol(operation),
            operand_label(&expression.operands[1], labels, true)
        );
        return if parenthesize {
            format!("({joined})")
        } else {
            joined
        };
    }

    let arguments: Vec<String> = expression
        .operands
        .iter()
        .map(|operand| operand_label(operand, labels, false))
        .collect();
    format!("{}({})", symbol(operation), arguments.join(", "))
}

fn operand_label(operand: &TransformOperand, labels: &[String], parenthesize: bool) -> String {
    match operand {
        TransformOperand::Metric(index) => labels
            .get(*index)
            .cloned()
            .unwrap_or_else(|| format!("M{index}")),
        TransformOperand::Expression(inner) => node_label(inner, labels, parenthesize),
    }
}
