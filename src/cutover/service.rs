// ABOUTME: Cut-over service choosing the legacy or CMS path per request and strategy
// ABOUTME: Builds strategies through the registry and runs both paths for parity checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use tracing::debug;
use vitals_core::errors::AppResult;
use vitals_core::models::ChartComputationResult;
use vitals_intelligence::{
    ChartDataContext, ComputationStrategy, DataPath, StrategyDeps, StrategyType,
};

use super::registry::StrategyRegistry;
use crate::config::{CmsConfig, VitalsConfig};
use crate::logging::ParityLogger;
use crate::parity::{
    BucketDistributionParityHarness, ParityHarness, ParityOptions, ParityReport, ParitySeries,
    StrategyParityContext,
};

/// Path decision with the reason it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutOverDecision {
    /// Chosen path
    pub path: DataPath,
    /// Why it was chosen
    pub reason: String,
}

/// Both results of a parity run plus its report
#[derive(Debug, Clone)]
pub struct ParityRun {
    /// Legacy-path result
    pub legacy: Option<ChartComputationResult>,
    /// CMS-path result
    pub cms: Option<ChartComputationResult>,
    /// Comparison outcome
    pub report: ParityReport,
}

/// Routes chart requests to the legacy or CMS strategy
#[derive(Debug, Clone)]
pub struct StrategyCutOverService {
    config: CmsConfig,
    parity: ParityOptions,
    registry: StrategyRegistry,
    deps: StrategyDeps,
}

impl StrategyCutOverService {
    /// Service with the default registry
    #[must_use]
    pub fn new(config: VitalsConfig) -> Self {
        Self::with_registry(config, StrategyRegistry::with_defaults())
    }

    /// Service with a caller-supplied registry
    #[must_use]
    pub fn with_registry(config: VitalsConfig, registry: StrategyRegistry) -> Self {
        Self {
            config: config.cms,
            parity: config.parity,
            registry,
            deps: StrategyDeps::new(config.computation),
        }
    }

    /// Cut-over switches in effect
    #[must_use]
    pub const fn config(&self) -> &CmsConfig {
        &self.config
    }

    /// Whether `kind` should read canonical series for this context
    #[must_use]
    pub fn should_use_cms(&self, context: &ChartDataContext, kind: StrategyType) -> bool {
        self.decide(context, kind).path == DataPath::Cms
    }

    /// Decide the path for `kind` and log the decision
    #[must_use]
    pub fn select_path(&self, context: &ChartDataContext, kind: StrategyType) -> DataPath {
        let decision = self.decide(context, kind);
        ParityLogger::log_cutover_decision(
            kind.as_str(),
            decision.path == DataPath::Cms,
            &decision.reason,
        );
        decision.path
    }

    /// Path decision for `kind` with its reason, without logging
    #[must_use]
    pub fn decide(&self, context: &ChartDataContext, kind: StrategyType) -> CutOverDecision {
        let legacy = |reason: String| CutOverDecision {
            path: DataPath::Legacy,
            reason,
        };

        if !self.config.use_cms_data {
            return legacy("global CMS switch is off".to_owned());
        }
        if !self.config.strategy_enabled(kind) {
            return legacy(format!("CMS switch for {kind} is off"));
        }
        let Some(range) = context.date_range() else {
            return legacy("request window is empty".to_owned());
        };

        let series = context.cms_series();
        let relevant = match kind {
            StrategyType::MultiMetric | StrategyType::Transform => series.len(),
            _ => kind.required_metrics().min(series.len()),
        };
        for (index, cms) in series.iter().take(relevant).enumerate() {
            let Some(cms) = cms else {
                return legacy(format!("metric {index} has no canonical series"));
            };
            let samples = cms.count_valid_in_range(range.from, range.to);
            if samples < self.config.min_cms_samples {
                return legacy(format!(
                    "metric {index} has {samples} canonical samples, {} required",
                    self.config.min_cms_samples
                ));
            }
        }

        CutOverDecision {
            path: DataPath::Cms,
            reason: format!("{relevant} canonical series meet the sample threshold"),
        }
    }

    /// Build the `kind` strategy on `path`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unregistered type, or an input
    /// error when the context cannot feed the strategy
    pub fn create_strategy(
        &self,
        context: &ChartDataContext,
        kind: StrategyType,
        path: DataPath,
    ) -> AppResult<Box<dyn ComputationStrategy>> {
        let constructor = self
            .registry
            .get(kind)
            .map_err(|error| error.with_request_id(context.request_id))?
            .for_path(path);
        let request = context.strategy_request(path)?;
        constructor(kind, request, self.deps.clone())
            .map_err(|error| error.with_request_id(context.request_id))
    }

    /// Compute `kind` on the path chosen for this context
    ///
    /// # Errors
    ///
    /// See [`Self::create_strategy`]
    pub fn compute(
        &self,
        context: &ChartDataContext,
        kind: StrategyType,
    ) -> AppResult<Option<ChartComputationResult>> {
        let path = self.select_path(context, kind);
        let strategy = self.create_strategy(context, kind, path)?;
        let result = strategy.compute();
        debug!(
            request_id = %context.request_id,
            strategy = %kind,
            path = %path,
            has_data = result.is_some(),
            "computed chart"
        );
        Ok(result)
    }

    /// Compute `kind` on both paths and compare the results
    ///
    /// Distribution strategies are compared bucket by bucket, everything else
    /// series by series.
    ///
    /// # Errors
    ///
    /// Returns an input error when a metric has no canonical series, or a
    /// parity-violation error in strict mode
    pub fn execute_with_parity(
        &self,
        context: &ChartDataContext,
        kind: StrategyType,
    ) -> AppResult<ParityRun> {
        let legacy_strategy = self.create_strategy(context, kind, DataPath::Legacy)?;
        let cms_strategy = self.create_strategy(context, kind, DataPath::Cms)?;
        let legacy = legacy_strategy.compute();
        let cms = cms_strategy.compute();

        let parity_context = StrategyParityContext {
            request_id: context.request_id,
            strategy: kind,
            metric_type: context.metadata.metric_type.clone(),
        };

        let (result, legacy_count, cms_count) = if kind.is_distribution() {
            let legacy_distribution = legacy.as_ref().and_then(|r| r.distribution.as_ref());
            let cms_distribution = cms.as_ref().and_then(|r| r.distribution.as_ref());
            let result = BucketDistributionParityHarness::new(self.parity).validate(
                &parity_context,
                legacy_distribution,
                cms_distribution,
            )?;
            (
                result,
                ParitySeries::from_distribution(legacy_distribution).len(),
                ParitySeries::from_distribution(cms_distribution).len(),
            )
        } else {
            let legacy_series = ParitySeries::from_chart_result(legacy.as_ref());
            let cms_series = ParitySeries::from_chart_result(cms.as_ref());
            let (legacy_count, cms_count) = (legacy_series.len(), cms_series.len());
            let result = ParityHarness::new(self.parity).validate(
                &parity_context,
                || legacy_series,
                || cms_series,
            )?;
            (result, legacy_count, cms_count)
        };

        Ok(ParityRun {
            legacy,
            cms,
            report: ParityReport::new(&parity_context, result, legacy_count, cms_count),
        })
    }
}
