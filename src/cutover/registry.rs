// ABOUTME: Registry of legacy and CMS strategy constructors keyed by strategy type
// ABOUTME: Lookup of an unregistered type is a configuration error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitals Parity Contributors

use std::collections::HashMap;
use tracing::{info, warn};
use vitals_core::errors::{AppError, AppResult};
use vitals_intelligence::strategies::factory::{build_cms, build_legacy};
use vitals_intelligence::{ComputationStrategy, DataPath, StrategyDeps, StrategyRequest, StrategyType};

/// Builds one strategy for one request
pub type StrategyConstructor =
    fn(StrategyType, StrategyRequest, StrategyDeps) -> AppResult<Box<dyn ComputationStrategy>>;

/// Legacy and CMS constructors of one strategy type
#[derive(Debug, Clone, Copy)]
pub struct StrategyConstructors {
    /// Reads legacy records
    pub legacy: StrategyConstructor,
    /// Reads canonical metric series
    pub cms: StrategyConstructor,
}

impl StrategyConstructors {
    /// Constructor for `path`
    #[must_use]
    pub fn for_path(&self, path: DataPath) -> StrategyConstructor {
        match path {
            DataPath::Legacy => self.legacy,
            DataPath::Cms => self.cms,
        }
    }
}

/// Constructor pairs available to the cut-over service
#[derive(Debug, Clone, Default)]
pub struct StrategyRegistry {
    constructors: HashMap<StrategyType, StrategyConstructors>,
}

impl StrategyRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in pair for every strategy type
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in StrategyType::ALL {
            registry.register(
                kind,
                StrategyConstructors {
                    legacy: build_legacy,
                    cms: build_cms,
                },
            );
        }
        info!(
            "Strategy registry initialized with {} strategy type(s)",
            registry.len()
        );
        registry
    }

    /// Register a constructor pair; a later registration replaces an earlier one
    pub fn register(
        &mut self,
        kind: StrategyType,
        constructors: StrategyConstructors,
    ) -> Option<StrategyConstructors> {
        let previous = self.constructors.insert(kind, constructors);
        if previous.is_some() {
            warn!(strategy = %kind, "replacing registered strategy constructors");
        }
        previous
    }

    /// Constructor pair for `kind`
    ///
    /// # Errors
    ///
    /// Returns an unsupported-strategy error when nothing is registered
    pub fn get(&self, kind: StrategyType) -> AppResult<StrategyConstructors> {
        self.constructors
            .get(&kind)
            .copied()
            .ok_or_else(|| AppError::unsupported_strategy(kind))
    }

    /// Whether `kind` has constructors
    #[must_use]
    pub fn contains(&self, kind: StrategyType) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Registered strategy types
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
