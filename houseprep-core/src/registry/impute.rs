//! Imputation plan: which missing-value strategy each column receives.

use serde::{Deserialize, Serialize};

/// Category written into structurally absent cells ("no garage", "no fence").
pub const STRUCTURAL_NONE_FILL: &str = "None";

/// How a column's missing values are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Fill with [`STRUCTURAL_NONE_FILL`]; absence is itself informative.
    StructuralNone,
    /// Fill with the most frequent observed category.
    MostFrequent,
    /// Fill with zero (zero-inflated numerics).
    Zero,
    /// Fill with the column median (continuous numerics).
    Median,
}

impl ImputeStrategy {
    pub const ALL: [ImputeStrategy; 4] = [
        ImputeStrategy::StructuralNone,
        ImputeStrategy::MostFrequent,
        ImputeStrategy::Zero,
        ImputeStrategy::Median,
    ];

    /// Field name of the matching bucket in [`ImputePlan`].
    pub fn bucket_name(self) -> &'static str {
        match self {
            ImputeStrategy::StructuralNone => "structural_none",
            ImputeStrategy::MostFrequent => "mode_fill",
            ImputeStrategy::Zero => "zero_fill",
            ImputeStrategy::Median => "median_fill",
        }
    }
}

impl std::fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.bucket_name())
    }
}

/// Column-to-strategy assignment for every column that needs imputation.
///
/// A column belongs to at most one of the four strategy buckets. `year_cols`
/// is a tag rather than a strategy and may overlap `median_fill` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImputePlan {
    pub structural_none: Vec<String>,
    pub mode_fill: Vec<String>,
    pub zero_fill: Vec<String>,
    pub median_fill: Vec<String>,
    pub year_cols: Vec<String>,
}

impl ImputePlan {
    /// Columns assigned to the given strategy, in declaration order.
    pub fn bucket(&self, strategy: ImputeStrategy) -> &[String] {
        match strategy {
            ImputeStrategy::StructuralNone => &self.structural_none,
            ImputeStrategy::MostFrequent => &self.mode_fill,
            ImputeStrategy::Zero => &self.zero_fill,
            ImputeStrategy::Median => &self.median_fill,
        }
    }

    /// Strategy for a column, or `None` if the plan does not impute it.
    ///
    /// With a clean plan the answer is unique; if buckets overlap the first
    /// bucket in [`ImputeStrategy::ALL`] order wins.
    pub fn strategy_for(&self, column: &str) -> Option<ImputeStrategy> {
        ImputeStrategy::ALL
            .into_iter()
            .find(|s| self.bucket(*s).iter().any(|c| c == column))
    }

    pub fn is_year(&self, column: &str) -> bool {
        self.year_cols.iter().any(|c| c == column)
    }

    /// Every column mentioned anywhere in the plan, year tags included.
    pub fn all_columns(&self) -> impl Iterator<Item = &str> {
        ImputeStrategy::ALL
            .into_iter()
            .flat_map(move |s| self.bucket(s).iter())
            .chain(self.year_cols.iter())
            .map(String::as_str)
    }
}
