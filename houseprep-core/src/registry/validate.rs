//! Consistency checks over a [`HousingConfig`].
//!
//! Findings are returned as [`ConfigDefect`] values, never raised. An empty
//! list means the registry is internally consistent.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::classify::ColumnClass;
use super::impute::{ImputeStrategy, STRUCTURAL_NONE_FILL};
use super::HousingConfig;

/// One violated registry invariant, naming the offending column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigDefect {
    /// Column sits in more than one imputation strategy bucket.
    ImputeBucketOverlap { column: String, buckets: Vec<String> },

    /// Year column assigned to a bucket other than `median_fill`.
    YearBucketConflict { column: String, bucket: String },

    /// Column listed more than once in the same imputation bucket or class list.
    DuplicateInBucket { column: String, bucket: String },

    /// Dropped column is still referenced by an imputation bucket or ordinal set.
    DroppedColumnScheduled { column: String, referenced_by: String },

    /// Ordinal column without a mapping.
    MissingOrdinalMap { column: String },

    /// Mapping for a column that is not an ordinal object.
    OrphanOrdinalMap { column: String },

    /// Structural-none ordinal column whose map lacks the `"None"` key.
    MissingAbsenceSentinel { column: String },

    /// `"None"` shares its integer with a real category.
    SentinelNotOutOfBand { column: String, sentinel: i64 },

    /// Column in more than one classification list.
    ClassificationOverlap { column: String, lists: Vec<String> },

    /// Dataset value with no key in the column's ordinal map.
    UnmappedOrdinalValue { column: String, value: String },

    /// Ordinal column missing from a dataset table.
    OrdinalColumnAbsent { column: String },

    /// Dataset column whose values cannot be read as category labels.
    UnreadableOrdinalColumn { column: String, reason: String },
}

impl ConfigDefect {
    pub fn column(&self) -> &str {
        match self {
            ConfigDefect::ImputeBucketOverlap { column, .. }
            | ConfigDefect::YearBucketConflict { column, .. }
            | ConfigDefect::DuplicateInBucket { column, .. }
            | ConfigDefect::DroppedColumnScheduled { column, .. }
            | ConfigDefect::MissingOrdinalMap { column }
            | ConfigDefect::OrphanOrdinalMap { column }
            | ConfigDefect::MissingAbsenceSentinel { column }
            | ConfigDefect::SentinelNotOutOfBand { column, .. }
            | ConfigDefect::ClassificationOverlap { column, .. }
            | ConfigDefect::UnmappedOrdinalValue { column, .. }
            | ConfigDefect::OrdinalColumnAbsent { column }
            | ConfigDefect::UnreadableOrdinalColumn { column, .. } => column,
        }
    }
}

impl fmt::Display for ConfigDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigDefect::ImputeBucketOverlap { column, buckets } => write!(
                f,
                "{column}: assigned to several imputation buckets ({})",
                buckets.join(", ")
            ),
            ConfigDefect::YearBucketConflict { column, bucket } => write!(
                f,
                "{column}: year column may only share median_fill, found in {bucket}"
            ),
            ConfigDefect::DuplicateInBucket { column, bucket } => {
                write!(f, "{column}: listed more than once in {bucket}")
            }
            ConfigDefect::DroppedColumnScheduled {
                column,
                referenced_by,
            } => write!(f, "{column}: dropped but still referenced by {referenced_by}"),
            ConfigDefect::MissingOrdinalMap { column } => {
                write!(f, "{column}: ordinal object has no ordinal map")
            }
            ConfigDefect::OrphanOrdinalMap { column } => {
                write!(f, "{column}: ordinal map for a column not in ordinal_objects")
            }
            ConfigDefect::MissingAbsenceSentinel { column } => write!(
                f,
                "{column}: structural-none column lacks a '{STRUCTURAL_NONE_FILL}' key in its ordinal map"
            ),
            ConfigDefect::SentinelNotOutOfBand { column, sentinel } => write!(
                f,
                "{column}: '{STRUCTURAL_NONE_FILL}' sentinel {sentinel} collides with a real category"
            ),
            ConfigDefect::ClassificationOverlap { column, lists } => write!(
                f,
                "{column}: appears in several classification lists ({})",
                lists.join(", ")
            ),
            ConfigDefect::UnmappedOrdinalValue { column, value } => {
                write!(f, "{column}: dataset value '{value}' has no ordinal mapping")
            }
            ConfigDefect::OrdinalColumnAbsent { column } => {
                write!(f, "{column}: ordinal column not present in the dataset")
            }
            ConfigDefect::UnreadableOrdinalColumn { column, reason } => {
                write!(f, "{column}: values cannot be read as labels ({reason})")
            }
        }
    }
}

/// Run every registry check, in a stable order.
pub fn validate(config: &HousingConfig) -> Vec<ConfigDefect> {
    let mut defects = Vec::new();
    check_duplicates(config, &mut defects);
    check_impute_overlap(config, &mut defects);
    check_year_buckets(config, &mut defects);
    check_drop_list(config, &mut defects);
    check_ordinal_coverage(config, &mut defects);
    check_absence_sentinels(config, &mut defects);
    check_classification_overlap(config, &mut defects);
    defects
}

fn check_duplicates(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    let plan = config.impute_plan();
    let mut lists: Vec<(&str, &[String])> = ImputeStrategy::ALL
        .into_iter()
        .map(|s| (s.bucket_name(), plan.bucket(s)))
        .collect();
    lists.push(("year_cols", plan.year_cols.as_slice()));
    for class in ColumnClass::LISTED {
        lists.push((class.list_name(), config.columns().list(class)));
    }

    for (name, columns) in lists {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        for col in columns {
            if !seen.insert(col.as_str()) && reported.insert(col.as_str()) {
                defects.push(ConfigDefect::DuplicateInBucket {
                    column: col.clone(),
                    bucket: name.to_string(),
                });
            }
        }
    }
}

/// Strategy buckets each column belongs to, deduplicated, keyed by column.
fn bucket_memberships(config: &HousingConfig) -> BTreeMap<&str, Vec<ImputeStrategy>> {
    let mut membership: BTreeMap<&str, Vec<ImputeStrategy>> = BTreeMap::new();
    for strategy in ImputeStrategy::ALL {
        for col in config.impute_plan().bucket(strategy) {
            let entry = membership.entry(col.as_str()).or_default();
            if !entry.contains(&strategy) {
                entry.push(strategy);
            }
        }
    }
    membership
}

fn check_impute_overlap(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    for (col, strategies) in bucket_memberships(config) {
        if strategies.len() > 1 {
            defects.push(ConfigDefect::ImputeBucketOverlap {
                column: col.to_string(),
                buckets: strategies
                    .iter()
                    .map(|s| s.bucket_name().to_string())
                    .collect(),
            });
        }
    }
}

fn check_year_buckets(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    let membership = bucket_memberships(config);
    let mut seen = BTreeSet::new();
    for col in &config.impute_plan().year_cols {
        if !seen.insert(col.as_str()) {
            continue;
        }
        let Some(strategies) = membership.get(col.as_str()) else {
            continue;
        };
        for strategy in strategies {
            if *strategy != ImputeStrategy::Median {
                defects.push(ConfigDefect::YearBucketConflict {
                    column: col.clone(),
                    bucket: strategy.bucket_name().to_string(),
                });
            }
        }
    }
}

fn check_drop_list(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    let plan = config.impute_plan();
    let columns = config.columns();
    let mut seen = BTreeSet::new();

    for col in &columns.drop {
        if !seen.insert(col.as_str()) {
            continue;
        }
        let mut referenced_by: Vec<&str> = ImputeStrategy::ALL
            .into_iter()
            .filter(|s| plan.bucket(*s).contains(col))
            .map(ImputeStrategy::bucket_name)
            .collect();
        if plan.is_year(col) {
            referenced_by.push("year_cols");
        }
        if columns.ordinal_objects.contains(col) {
            referenced_by.push("ordinal_objects");
        }
        if config.ordinal_maps().contains_column(col) {
            referenced_by.push("ordinal_maps");
        }
        for by in referenced_by {
            defects.push(ConfigDefect::DroppedColumnScheduled {
                column: col.clone(),
                referenced_by: by.to_string(),
            });
        }
    }
}

fn check_ordinal_coverage(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    let ordinal: BTreeSet<&str> = config
        .columns()
        .ordinal_objects
        .iter()
        .map(String::as_str)
        .collect();

    for col in &ordinal {
        if !config.ordinal_maps().contains_column(col) {
            defects.push(ConfigDefect::MissingOrdinalMap {
                column: col.to_string(),
            });
        }
    }
    for col in config.ordinal_maps().columns() {
        if !ordinal.contains(col) {
            defects.push(ConfigDefect::OrphanOrdinalMap {
                column: col.to_string(),
            });
        }
    }
}

fn check_absence_sentinels(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    let mut seen = BTreeSet::new();
    for col in &config.impute_plan().structural_none {
        if !seen.insert(col.as_str()) || !config.columns().ordinal_objects.contains(col) {
            continue;
        }
        // A missing map is already reported by the coverage check.
        let Some(scale) = config.ordinal_maps().get(col) else {
            continue;
        };
        match scale.absence_sentinel() {
            None => defects.push(ConfigDefect::MissingAbsenceSentinel {
                column: col.clone(),
            }),
            Some(sentinel) if !scale.sentinel_is_out_of_band() => {
                defects.push(ConfigDefect::SentinelNotOutOfBand {
                    column: col.clone(),
                    sentinel,
                })
            }
            Some(_) => {}
        }
    }
}

fn check_classification_overlap(config: &HousingConfig, defects: &mut Vec<ConfigDefect>) {
    let columns = config.columns();
    let all: BTreeSet<&str> = ColumnClass::LISTED
        .into_iter()
        .flat_map(|class| columns.list(class).iter().map(String::as_str))
        .collect();

    for col in all {
        let memberships = columns.memberships(col);
        if memberships.len() > 1 {
            defects.push(ConfigDefect::ClassificationOverlap {
                column: col.to_string(),
                lists: memberships
                    .iter()
                    .map(|c| c.list_name().to_string())
                    .collect(),
            });
        }
    }
}
