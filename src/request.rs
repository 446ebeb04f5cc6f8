// ABOUTME: JSON chart request accepted by the CLI and turned into a chart data context
// ABOUTME: Metrics carrying only a canonical series get equivalent legacy records derived
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use uuid::Uuid;
use vitals_core::errors::{AppError, AppResult};
use vitals_intelligence::{
    ChartDataContext, ChartDataContextBuilder, ChartMetadata, MetricInputs, StrategyType,
};

use crate::config::VitalsConfig;

/// One chart computation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Strategy to run
    pub strategy: StrategyType,
    /// Window, metric family and strategy options
    pub metadata: ChartMetadata,
    /// Metrics in request order, primary first
    pub metrics: Vec<MetricInputs>,
    /// Configuration overriding the environment
    #[serde(default)]
    pub config: Option<VitalsConfig>,
    /// Caller-supplied correlation id
    #[serde(default)]
    pub request_id: Option<Uuid>,
}

impl ChartRequest {
    /// Parse a request from JSON text
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a request file
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read, or a serialization
    /// error for malformed JSON
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = json.len(), "read chart request");
        Self::from_json(&json)
    }

    /// Embedded configuration, or `fallback` when none is embedded
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the chosen configuration is invalid
    pub fn resolve_config(&self, fallback: VitalsConfig) -> AppResult<VitalsConfig> {
        let config = self.config.clone().unwrap_or(fallback);
        config.validate()?;
        Ok(config)
    }

    /// Build the chart data context on the legacy path
    ///
    /// # Errors
    ///
    /// Returns an input error when the request has no metrics
    pub fn into_context(self, config: &VitalsConfig) -> AppResult<ChartDataContext> {
        if self.metrics.is_empty() {
            return Err(AppError::invalid_input("Request has no metrics"));
        }

        let metrics = self.metrics.into_iter().map(with_derived_legacy);
        let mut builder = ChartDataContextBuilder::new(self.metadata).metrics(metrics);
        if let Some(request_id) = self.request_id {
            builder = builder.request_id(request_id);
        }
        builder.build(&config.computation)
    }
}

fn with_derived_legacy(mut metric: MetricInputs) -> MetricInputs {
    if metric.legacy.is_empty() {
        if let Some(cms) = &metric.cms {
            metric.legacy = cms.to_legacy_records();
            if metric.unit.is_none() {
                metric.unit.clone_from(&cms.unit);
            }
        }
    }
    metric
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::errors::ErrorCode;

    const REQUEST: &str = r#"{
        "strategy": "single_metric",
        "metadata": {
            "metric_type": "weight",
            "from": "2024-03-01T00:00:00",
            "to": "2024-03-02T00:00:00"
        },
        "metrics": [{
            "series_id": "body_mass",
            "cms": {
                "metric_id": "weight.body_mass",
                "unit": "kg",
                "samples": [
                    {"timestamp": "2024-03-01T07:30:00+01:00", "value": 81.5},
                    {"timestamp": "2024-03-02T07:30:00+01:00", "value": null}
                ]
            }
        }]
    }"#;

    #[test]
    fn test_legacy_records_derived_from_cms() {
        let request = ChartRequest::from_json(REQUEST).unwrap();
        let context = request.into_context(&VitalsConfig::default()).unwrap();

        let metric = &context.metrics[0];
        assert_eq!(metric.legacy.len(), 2);
        assert_eq!(metric.legacy[0].value, Some(81.5));
        assert_eq!(context.units, vec![Some("kg".to_owned())]);
    }

    #[test]
    fn test_malformed_json() {
        let error = ChartRequest::from_json("{").unwrap_err();
        assert_eq!(error.code, ErrorCode::SerializationError);
    }

    #[test]
    fn test_request_id_is_kept() {
        let mut request = ChartRequest::from_json(REQUEST).unwrap();
        let id = Uuid::new_v4();
        request.request_id = Some(id);
        let context = request.into_context(&VitalsConfig::default()).unwrap();
        assert_eq!(context.request_id, id);
    }
}
