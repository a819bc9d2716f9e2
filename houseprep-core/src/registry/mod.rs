//! Preprocessing registry — the single source of truth for column treatment.
//!
//! A [`HousingConfig`] is built once (from the shipped constants or a TOML
//! file) and handed to consumers by reference. It is never mutated after
//! construction; every accessor is a read-only lookup.

pub mod classify;
pub mod house_prices;
pub mod impute;
pub mod ordinal;
pub mod validate;

pub use classify::{ColumnClass, ColumnLists};
pub use impute::{ImputePlan, ImputeStrategy, STRUCTURAL_NONE_FILL};
pub use ordinal::{LookupError, OrdinalMaps, OrdinalScale};
pub use validate::ConfigDefect;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::snapshot::ExportSnapshot;

/// Version tag stamped on every exported snapshot.
pub const CONFIG_VERSION: &str = "0.1.0";

/// Feature-engineering toggles supplied by an external registry file.
///
/// Every field is optional: the built-in registry does not define defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureToggles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_zero_inflated_flags: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ratios: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ages: Option<bool>,
}

/// Errors loading a registry document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read registry file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize registry TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Imputation plan, classification lists, ordinal maps and planned features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingConfig {
    engineered_features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    features: Option<FeatureToggles>,
    impute_plan: ImputePlan,
    columns: ColumnLists,
    ordinal_maps: OrdinalMaps,
}

impl HousingConfig {
    pub fn new(
        impute_plan: ImputePlan,
        columns: ColumnLists,
        ordinal_maps: OrdinalMaps,
        engineered_features: Vec<String>,
        features: Option<FeatureToggles>,
    ) -> Self {
        Self {
            engineered_features,
            features,
            impute_plan,
            columns,
            ordinal_maps,
        }
    }

    /// Load a registry from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded registry file");
        Ok(config)
    }

    /// Parse a registry from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the registry to TOML (the format `from_toml` reads).
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn impute_plan(&self) -> &ImputePlan {
        &self.impute_plan
    }

    pub fn columns(&self) -> &ColumnLists {
        &self.columns
    }

    pub fn ordinal_maps(&self) -> &OrdinalMaps {
        &self.ordinal_maps
    }

    pub fn engineered_features(&self) -> &[String] {
        &self.engineered_features
    }

    pub fn features(&self) -> Option<&FeatureToggles> {
        self.features.as_ref()
    }

    /// Classification of a single column; `Unclassified` when no list names it.
    pub fn classify(&self, column: &str) -> ColumnClass {
        self.columns.classify(column)
    }

    /// Serializable rendering of the whole registry, stamped with `now`.
    pub fn export_snapshot(&self, now: DateTime<Utc>) -> ExportSnapshot {
        ExportSnapshot::from_config(self, now)
    }

    /// Check registry invariants. Empty when clean.
    pub fn validate(&self) -> Vec<ConfigDefect> {
        validate::validate(self)
    }
}

impl Default for HousingConfig {
    fn default() -> Self {
        Self::house_prices()
    }
}
