//! Serializable export of the registry for persistence and logging.
//!
//! A snapshot is derived state: the live [`HousingConfig`] stays authoritative.
//! Parsing a snapshot back yields the same plan lists and ordinal maps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::registry::{HousingConfig, ImputePlan, OrdinalMaps, CONFIG_VERSION};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Features block: external toggles (null when unset) plus planned feature names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureBlock {
    pub keep: Option<Vec<String>>,
    pub add_zero_inflated_flags: Option<bool>,
    pub add_ratios: Option<bool>,
    pub add_ages: Option<bool>,
    pub engineered_features: Vec<String>,
}

/// Serializable rendering of the entire registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub impute_plan: ImputePlan,
    pub drop_cols: Vec<String>,
    pub ordinal_objects: Vec<String>,
    pub ordinal_maps: OrdinalMaps,
    pub features: FeatureBlock,
}

impl ExportSnapshot {
    pub fn from_config(config: &HousingConfig, now: DateTime<Utc>) -> Self {
        let toggles = config.features().cloned().unwrap_or_default();
        Self {
            version: CONFIG_VERSION.to_string(),
            generated_at: now,
            impute_plan: config.impute_plan().clone(),
            drop_cols: config.columns().drop.clone(),
            ordinal_objects: config.columns().ordinal_objects.clone(),
            ordinal_maps: config.ordinal_maps().clone(),
            features: FeatureBlock {
                keep: toggles.keep,
                add_zero_inflated_flags: toggles.add_zero_inflated_flags,
                add_ratios: toggles.add_ratios,
                add_ages: toggles.add_ages,
                engineered_features: config.engineered_features().to_vec(),
            },
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Write the snapshot as pretty JSON, atomically (tmp file then rename).
    pub fn write_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self.to_json_pretty()?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            SnapshotError::Io(e)
        })?;
        Ok(())
    }

    /// BLAKE3 digest of the snapshot contents, excluding the timestamp.
    ///
    /// Two snapshots of the same registry share a hash whenever they were taken.
    pub fn content_hash(&self) -> Result<String, SnapshotError> {
        let mut unstamped = self.clone();
        unstamped.generated_at = DateTime::<Utc>::default();
        let json = serde_json::to_string(&unstamped)?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}
