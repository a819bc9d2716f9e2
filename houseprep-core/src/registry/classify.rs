//! Column classification lists from exploratory analysis.

use serde::{Deserialize, Serialize};

/// Preprocessing treatment class of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    Nominal,
    OrdinalObject,
    RightSkewed,
    SkewedAndBinary,
    CollapseToBinary,
    Dropped,
    Year,
    /// In none of the lists. Expected for e.g. the label column.
    Unclassified,
}

impl ColumnClass {
    /// Classes backed by a list, in lookup precedence order.
    pub const LISTED: [ColumnClass; 7] = [
        ColumnClass::Nominal,
        ColumnClass::OrdinalObject,
        ColumnClass::RightSkewed,
        ColumnClass::SkewedAndBinary,
        ColumnClass::CollapseToBinary,
        ColumnClass::Dropped,
        ColumnClass::Year,
    ];

    pub fn list_name(self) -> &'static str {
        match self {
            ColumnClass::Nominal => "nominal",
            ColumnClass::OrdinalObject => "ordinal_objects",
            ColumnClass::RightSkewed => "right_skewed",
            ColumnClass::SkewedAndBinary => "skewed_and_binary",
            ColumnClass::CollapseToBinary => "collapse_to_binary",
            ColumnClass::Dropped => "drop",
            ColumnClass::Year => "year",
            ColumnClass::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for ColumnClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.list_name())
    }
}

/// Partition of the column universe by preprocessing treatment.
///
/// The lists are meant to be disjoint; `validate` reports any overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLists {
    pub nominal: Vec<String>,
    pub ordinal_objects: Vec<String>,
    pub right_skewed: Vec<String>,
    pub skewed_and_binary: Vec<String>,
    pub collapse_to_binary: Vec<String>,
    pub drop: Vec<String>,
    pub year: Vec<String>,
}

impl ColumnLists {
    /// The list backing a class. `Unclassified` has no list.
    pub fn list(&self, class: ColumnClass) -> &[String] {
        match class {
            ColumnClass::Nominal => &self.nominal,
            ColumnClass::OrdinalObject => &self.ordinal_objects,
            ColumnClass::RightSkewed => &self.right_skewed,
            ColumnClass::SkewedAndBinary => &self.skewed_and_binary,
            ColumnClass::CollapseToBinary => &self.collapse_to_binary,
            ColumnClass::Dropped => &self.drop,
            ColumnClass::Year => &self.year,
            ColumnClass::Unclassified => &[],
        }
    }

    /// First list containing `column`, in [`ColumnClass::LISTED`] order.
    pub fn classify(&self, column: &str) -> ColumnClass {
        ColumnClass::LISTED
            .into_iter()
            .find(|class| self.list(*class).iter().any(|c| c == column))
            .unwrap_or(ColumnClass::Unclassified)
    }

    /// Every class whose list contains `column`.
    pub fn memberships(&self, column: &str) -> Vec<ColumnClass> {
        ColumnClass::LISTED
            .into_iter()
            .filter(|class| self.list(*class).iter().any(|c| c == column))
            .collect()
    }

    pub fn is_dropped(&self, column: &str) -> bool {
        self.drop.iter().any(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> ColumnLists {
        ColumnLists {
            nominal: vec!["MSZoning".into()],
            ordinal_objects: vec!["ExterQual".into()],
            right_skewed: vec!["LotArea".into()],
            skewed_and_binary: vec!["2ndFlrSF".into()],
            collapse_to_binary: vec!["PoolArea".into()],
            drop: vec!["Id".into(), "LotArea".into()],
            year: vec!["YrSold".into()],
        }
    }

    #[test]
    fn classify_each_list() {
        let l = lists();
        assert_eq!(l.classify("MSZoning"), ColumnClass::Nominal);
        assert_eq!(l.classify("ExterQual"), ColumnClass::OrdinalObject);
        assert_eq!(l.classify("2ndFlrSF"), ColumnClass::SkewedAndBinary);
        assert_eq!(l.classify("PoolArea"), ColumnClass::CollapseToBinary);
        assert_eq!(l.classify("Id"), ColumnClass::Dropped);
        assert_eq!(l.classify("YrSold"), ColumnClass::Year);
        assert_eq!(l.classify("SalePrice"), ColumnClass::Unclassified);
    }

    #[test]
    fn earlier_list_wins_on_overlap() {
        let l = lists();
        assert_eq!(l.classify("LotArea"), ColumnClass::RightSkewed);
        assert_eq!(
            l.memberships("LotArea"),
            vec![ColumnClass::RightSkewed, ColumnClass::Dropped]
        );
    }

    #[test]
    fn classification_is_case_sensitive() {
        assert_eq!(lists().classify("lotarea"), ColumnClass::Unclassified);
    }
}
