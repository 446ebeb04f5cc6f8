// ABOUTME: Transform-expression strategy over referenced metrics inner-joined on exact timestamps
// ABOUTME: Difference and ratio are Subtract and Divide expressions over the primary pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::{debug, warn};
use vitals_core::models::{ChartComputationResult, TimedValue};

use super::input::{compound_unit, ratio_unit, shared_unit};
use super::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};
use crate::alignment::TimeAlignment;
use crate::smoothing::smooth;
use crate::transform::operations::ids;
use crate::transform::{
    generate_label, TransformEvaluator, TransformExpression, TransformExpressionBuilder,
};

/// Evaluates one expression at every timestamp shared by the inputs it references
pub struct TransformResultStrategy {
    strategy_type: StrategyType,
    expression: TransformExpression,
    request: StrategyRequest,
    deps: StrategyDeps,
    path: DataPath,
}

impl TransformResultStrategy {
    /// Arbitrary expression; indices refer to `request.inputs`
    #[must_use]
    pub const fn new(
        expression: TransformExpression,
        request: StrategyRequest,
        deps: StrategyDeps,
        path: DataPath,
    ) -> Self {
        Self {
            strategy_type: StrategyType::Transform,
            expression,
            request,
            deps,
            path,
        }
    }

    /// `primary - secondary`
    #[must_use]
    pub fn difference(request: StrategyRequest, deps: StrategyDeps, path: DataPath) -> Self {
        Self {
            strategy_type: StrategyType::Difference,
            expression: TransformExpressionBuilder::binary(ids::SUBTRACT, 0, 1),
            request,
            deps,
            path,
        }
    }

    /// `primary / secondary`, NaN where the secondary is zero
    #[must_use]
    pub fn ratio(request: StrategyRequest, deps: StrategyDeps, path: DataPath) -> Self {
        Self {
            strategy_type: StrategyType::Ratio,
            expression: TransformExpressionBuilder::binary(ids::DIVIDE, 0, 1),
            request,
            deps,
            path,
        }
    }

    /// Expression being evaluated
    #[must_use]
    pub const fn expression(&self) -> &TransformExpression {
        &self.expression
    }

    /// Legend label built from the input display names
    #[must_use]
    pub fn label(&self) -> String {
        let names: Vec<String> = self
            .request
            .inputs
            .iter()
            .map(|input| input.display_name.clone())
            .collect();
        generate_label(&self.expression, &names)
    }

    /// Inputs the expression reads, in input order
    ///
    /// An expression that references no existing input joins every input so
    /// the result still has a timeline.
    fn joined_inputs(&self) -> Vec<usize> {
        let count = self.request.inputs.len();
        let mut indices: Vec<usize> = self
            .expression
            .metric_indices()
            .into_iter()
            .filter(|index| *index < count)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            (0..count).collect()
        } else {
            indices
        }
    }

    fn unit(&self, joined: &[usize]) -> Option<String> {
        let units: Vec<Option<&str>> = self
            .request
            .inputs
            .iter()
            .map(|input| input.unit.as_deref())
            .collect();
        match self.strategy_type {
            StrategyType::Difference => {
                compound_unit(units.first().copied().flatten(), units.get(1).copied().flatten())
            }
            StrategyType::Ratio => {
                ratio_unit(units.first().copied().flatten(), units.get(1).copied().flatten())
            }
            _ => shared_unit(joined.iter().filter_map(|index| units.get(*index).copied())),
        }
    }
}

impl ComputationStrategy for TransformResultStrategy {
    fn strategy_type(&self) -> StrategyType {
        self.strategy_type
    }

    fn path(&self) -> DataPath {
        self.path
    }

    fn compute(&self) -> Option<ChartComputationResult> {
        let range = self.request.range()?;
        let joined = self.joined_inputs();
        let points: Vec<Vec<TimedValue>> = joined
            .iter()
            .filter_map(|index| self.request.inputs.get(*index))
            .map(|input| input.points(&range))
            .collect();
        if points.is_empty() || points.iter().any(Vec::is_empty) {
            return None;
        }

        let aligned = match TimeAlignment::align_metrics_by_timestamp(&points) {
            Ok(aligned) => aligned,
            Err(error) => {
                warn!(path = %self.path, error = %error, "transform alignment failed");
                return None;
            }
        };
        let timestamps: Vec<_> = aligned
            .first()
            .map(|series| series.iter().map(|point| point.timestamp).collect())
            .unwrap_or_default();
        if timestamps.is_empty() {
            debug!(path = %self.path, "no shared timestamps for transform");
            return None;
        }

        // Indices outside the joined list stay missing and evaluate to NaN
        let expression = self.expression.remap_metrics(&|index| {
            joined
                .iter()
                .position(|candidate| *candidate == index)
                .unwrap_or(usize::MAX)
        });
        let evaluator = TransformEvaluator::new(&self.deps.operations);
        let values = match evaluator.evaluate(&expression, &aligned) {
            Ok(values) => values,
            Err(error) => {
                warn!(
                    path = %self.path,
                    strategy = %self.strategy_type,
                    error = %error,
                    "transform evaluation failed"
                );
                return None;
            }
        };
        let smoothed = smooth(&values, self.deps.config.smoothing_window);

        Some(ChartComputationResult::single(
            timestamps,
            values,
            smoothed,
            range,
            self.unit(&joined),
        ))
    }
}
