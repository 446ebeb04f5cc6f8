// ABOUTME: Cut-over configuration deciding when strategies may read canonical metric series
// ABOUTME: Global switch, per-strategy switches and the minimum CMS sample count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vitals_core::constants::env_vars;
use vitals_intelligence::config::{env_bool, env_parse, ConfigError};
use vitals_intelligence::StrategyType;

/// Switches controlling the legacy-to-CMS migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Global switch; when off every strategy reads legacy records
    pub use_cms_data: bool,
    /// Per-strategy switches; a missing entry counts as off
    pub strategies: HashMap<StrategyType, bool>,
    /// Non-null samples each relevant CMS series needs inside the window
    pub min_cms_samples: usize,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            use_cms_data: false,
            strategies: HashMap::new(),
            min_cms_samples: 1,
        }
    }
}

impl CmsConfig {
    /// Every switch on, used by tests and the parity runner
    #[must_use]
    pub fn all_enabled() -> Self {
        Self {
            use_cms_data: true,
            strategies: StrategyType::ALL.iter().map(|kind| (*kind, true)).collect(),
            min_cms_samples: 1,
        }
    }

    /// Load from `VITALS_USE_CMS_DATA`, `VITALS_CMS_<STRATEGY>` and `VITALS_CMS_MIN_SAMPLES`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut strategies = HashMap::new();
        for kind in StrategyType::ALL {
            let key = format!("{}{}", env_vars::CMS_STRATEGY_PREFIX, kind.env_suffix());
            strategies.insert(kind, env_bool(&key, false)?);
        }

        Ok(Self {
            use_cms_data: env_bool(env_vars::USE_CMS_DATA, false)?,
            strategies,
            min_cms_samples: env_parse(env_vars::CMS_MIN_SAMPLES, 1)?,
        })
    }

    /// Per-strategy switch
    #[must_use]
    pub fn strategy_enabled(&self, kind: StrategyType) -> bool {
        self.strategies.get(&kind).copied().unwrap_or(false)
    }

    /// Set a per-strategy switch
    #[must_use]
    pub fn with_strategy(mut self, kind: StrategyType, enabled: bool) -> Self {
        self.strategies.insert(kind, enabled);
        self
    }
}
