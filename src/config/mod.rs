// ABOUTME: Configuration management for computation, cut-over and parity settings
// ABOUTME: Aggregates every section into VitalsConfig loaded from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

//! Configuration module
//!
//! - **Computation**: smoothing, forward-fill, ratio and histogram settings
//! - **Cut-over**: when strategies may read canonical metric series
//! - **Parity**: harness failure mode and tolerance
//!
//! Every section has defaults, so a request file may embed a partial
//! configuration.

/// Cut-over switches
pub mod cutover;
/// Parity harness options
pub mod parity;

pub use cutover::CmsConfig;
pub use parity::{ParityMode, ParityOptions};
pub use vitals_intelligence::config::ComputationConfig;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitals_core::errors::AppResult;

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Numeric computation settings
    pub computation: ComputationConfig,
    /// Cut-over switches
    pub cms: CmsConfig,
    /// Parity harness options
    pub parity: ParityOptions,
}

impl VitalsConfig {
    /// Load every section from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable fails to parse or validate
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            computation: ComputationConfig::from_env()?,
            cms: CmsConfig::from_env()?,
            parity: ParityOptions::from_env()?,
        };
        debug!(
            use_cms_data = config.cms.use_cms_data,
            min_cms_samples = config.cms.min_cms_samples,
            parity_mode = %config.parity.mode,
            "loaded configuration from environment"
        );
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        self.computation.validate()?;
        self.parity.validate()?;
        Ok(())
    }
}
