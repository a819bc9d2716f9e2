//! Ordinal coverage audit: checks raw tables against the registry's maps.
//!
//! Every distinct value a dataset produces for an ordinal column must be a
//! key of that column's scale, otherwise encoding would fail downstream.

use polars::prelude::*;
use std::collections::BTreeSet;

use crate::registry::{ConfigDefect, HousingConfig, STRUCTURAL_NONE_FILL};

/// Audit one table. Returns an empty list when every ordinal value is mapped.
pub fn audit_ordinal_coverage(config: &HousingConfig, df: &DataFrame) -> Vec<ConfigDefect> {
    let mut defects = Vec::new();
    let mut seen = BTreeSet::new();

    for col in &config.columns().ordinal_objects {
        if !seen.insert(col.as_str()) {
            continue;
        }
        // A missing map is a registry defect; `validate` reports it.
        let Some(scale) = config.ordinal_maps().get(col) else {
            continue;
        };
        let Ok(column) = df.column(col) else {
            defects.push(ConfigDefect::OrdinalColumnAbsent {
                column: col.clone(),
            });
            continue;
        };

        let values = match distinct_values(column) {
            Ok(values) => values,
            Err(e) => {
                defects.push(ConfigDefect::UnreadableOrdinalColumn {
                    column: col.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        for value in values {
            if !scale.contains(&value) {
                defects.push(ConfigDefect::UnmappedOrdinalValue {
                    column: col.clone(),
                    value,
                });
            }
        }

        let structural = config.impute_plan().structural_none.contains(col);
        if structural && column.null_count() > 0 && !scale.contains(STRUCTURAL_NONE_FILL) {
            defects.push(ConfigDefect::MissingAbsenceSentinel {
                column: col.clone(),
            });
        }
    }

    if !defects.is_empty() {
        tracing::warn!(count = defects.len(), "ordinal coverage defects found");
    }
    defects
}

/// Distinct non-null values rendered as strings, sorted.
///
/// Non-string columns are cast first so numeric-looking categories compare
/// against their map keys textually. Nested types have no string form and
/// fail the cast.
fn distinct_values(column: &Column) -> PolarsResult<BTreeSet<String>> {
    let as_str = column.as_materialized_series().cast(&DataType::String)?;
    Ok(as_str.str()?.into_iter().flatten().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OrdinalScale;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).unwrap()
    }

    fn full_ordinal_frame() -> Vec<Column> {
        let cfg = HousingConfig::house_prices();
        cfg.columns()
            .ordinal_objects
            .iter()
            .map(|col| {
                let first = cfg.ordinal_maps().get(col).unwrap().categories().next().unwrap();
                Column::new(col.as_str().into(), &[first, first])
            })
            .collect()
    }

    #[test]
    fn mapped_values_are_clean() {
        let cfg = HousingConfig::house_prices();
        let df = frame(full_ordinal_frame());
        assert!(audit_ordinal_coverage(&cfg, &df).is_empty());
    }

    #[test]
    fn flags_unmapped_value() {
        let cfg = HousingConfig::house_prices();
        let mut cols = full_ordinal_frame();
        cols.retain(|c| c.name().as_str() != "KitchenQual");
        cols.push(Column::new("KitchenQual".into(), &["Gd", "Excellent"]));

        let defects = audit_ordinal_coverage(&cfg, &frame(cols));
        assert_eq!(
            defects,
            vec![ConfigDefect::UnmappedOrdinalValue {
                column: "KitchenQual".into(),
                value: "Excellent".into(),
            }]
        );
    }

    fn with_fence_nulls() -> DataFrame {
        let mut cols = full_ordinal_frame();
        cols.retain(|c| c.name().as_str() != "Fence");
        cols.push(Column::new("Fence".into(), &[Some("MnPrv"), None]));
        frame(cols)
    }

    #[test]
    fn nulls_in_structural_column_with_sentinel_are_clean() {
        let cfg = HousingConfig::house_prices();
        assert!(audit_ordinal_coverage(&cfg, &with_fence_nulls()).is_empty());
    }

    #[test]
    fn nulls_in_structural_column_without_sentinel_are_flagged() {
        let base = HousingConfig::house_prices();
        let mut maps = base.ordinal_maps().clone();
        maps.insert(
            "Fence",
            OrdinalScale::from_pairs(&[("MnPrv", 1), ("GdPrv", 1), ("MnWw", 1), ("GdWo", 1)]),
        );
        let cfg = HousingConfig::new(
            base.impute_plan().clone(),
            base.columns().clone(),
            maps,
            base.engineered_features().to_vec(),
            base.features().cloned(),
        );

        assert_eq!(
            audit_ordinal_coverage(&cfg, &with_fence_nulls()),
            vec![ConfigDefect::MissingAbsenceSentinel {
                column: "Fence".into()
            }]
        );
    }

    #[test]
    fn nested_column_is_reported_unreadable() {
        let cfg = HousingConfig::house_prices();
        let mut cols = full_ordinal_frame();
        cols.retain(|c| c.name().as_str() != "LotShape");
        let cell = Series::new("".into(), &["Reg"]);
        cols.push(Column::new("LotShape".into(), &[cell.clone(), cell]));

        let defects = audit_ordinal_coverage(&cfg, &frame(cols));
        assert_eq!(defects.len(), 1);
        assert!(matches!(
            &defects[0],
            ConfigDefect::UnreadableOrdinalColumn { column, .. } if column == "LotShape"
        ));
    }

    #[test]
    fn reports_absent_ordinal_column() {
        let cfg = HousingConfig::house_prices();
        let mut cols = full_ordinal_frame();
        cols.retain(|c| c.name().as_str() != "PavedDrive");

        let defects = audit_ordinal_coverage(&cfg, &frame(cols));
        assert_eq!(
            defects,
            vec![ConfigDefect::OrdinalColumnAbsent {
                column: "PavedDrive".into()
            }]
        );
    }
}
