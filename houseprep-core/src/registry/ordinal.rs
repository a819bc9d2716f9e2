//! Ordinal mapping table: quality-like categories encoded as ordered integers.
//!
//! Each column maps to an [`OrdinalScale`]. Scales for columns that can be
//! structurally absent carry a `"None"` key whose value sits outside the
//! real scale (0 below a 1-based quality scale, -1 below a 0-based one).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::impute::STRUCTURAL_NONE_FILL;

/// Category string → integer rank for one column.
///
/// `BTreeMap` keeps serialization order deterministic for hashing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrdinalScale(BTreeMap<String, i64>);

impl OrdinalScale {
    pub fn from_pairs(pairs: &[(&str, i64)]) -> Self {
        Self(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    pub fn get(&self, value: &str) -> Option<i64> {
        self.0.get(value).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains_key(value)
    }

    /// Value assigned to the structural-absence category, if the scale has one.
    pub fn absence_sentinel(&self) -> Option<i64> {
        self.get(STRUCTURAL_NONE_FILL)
    }

    /// True when the `"None"` sentinel exists and no real category shares its value.
    pub fn sentinel_is_out_of_band(&self) -> bool {
        match self.absence_sentinel() {
            None => false,
            Some(sentinel) => self
                .0
                .iter()
                .filter(|(k, _)| k.as_str() != STRUCTURAL_NONE_FILL)
                .all(|(_, v)| *v != sentinel),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Failure to encode a raw category value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no ordinal map for column '{column}'")]
    UnknownColumn { column: String },

    #[error("value '{value}' is not in the ordinal map for column '{column}'")]
    UnmappedValue { column: String, value: String },
}

/// Column name → [`OrdinalScale`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrdinalMaps(BTreeMap<String, OrdinalScale>);

impl OrdinalMaps {
    /// Assign one scale to several columns.
    pub fn insert_shared(&mut self, columns: &[&str], scale: &OrdinalScale) {
        for col in columns {
            self.0.insert(col.to_string(), scale.clone());
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, scale: OrdinalScale) {
        self.0.insert(column.into(), scale);
    }

    pub fn get(&self, column: &str) -> Option<&OrdinalScale> {
        self.0.get(column)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrdinalScale)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode a raw category value. Unknown columns and unmapped values are errors;
    /// there is no silent fallback.
    pub fn encode(&self, column: &str, value: &str) -> Result<i64, LookupError> {
        let scale = self.get(column).ok_or_else(|| LookupError::UnknownColumn {
            column: column.to_string(),
        })?;
        scale.get(value).ok_or_else(|| LookupError::UnmappedValue {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

// ── Shipped scales ──────────────────────────────────────────────────

/// Ex > Gd > TA > Fa > Po, with `None` = 0 for absent basement/garage/fireplace.
pub fn quality_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[
        ("Ex", 5),
        ("Gd", 4),
        ("TA", 3),
        ("Fa", 2),
        ("Po", 1),
        ("None", 0),
    ])
}

/// Home functionality; 0 is typical, higher is more deduction.
pub fn functional_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[
        ("Typ", 0),
        ("Mod", 1),
        ("Min1", 2),
        ("Min2", 3),
        ("Maj1", 4),
        ("Maj2", 5),
        ("Sev", 6),
        ("None", -1),
    ])
}

pub fn land_contour_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("Low", 0), ("HLS", 1), ("Bnk", 2), ("Lvl", 3)])
}

pub fn lot_shape_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("IR3", 0), ("IR2", 1), ("IR1", 2), ("Reg", 3)])
}

pub fn basement_exposure_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("No", 0), ("Mn", 1), ("Av", 2), ("Gd", 3), ("None", -1)])
}

pub fn land_slope_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("Gtl", 0), ("Mod", 1), ("Sev", 2)])
}

pub fn garage_finish_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("Unf", 0), ("RFn", 1), ("Fin", 2), ("None", -1)])
}

pub fn paved_drive_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("N", 0), ("P", 1), ("Y", 2)])
}

pub fn central_air_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[("N", 0), ("Y", 1)])
}

/// Presence collapse: any fence type is 1, no fence is 0.
pub fn fence_scale() -> OrdinalScale {
    OrdinalScale::from_pairs(&[
        ("MnPrv", 1),
        ("GdPrv", 1),
        ("GdWo", 1),
        ("MnWw", 1),
        ("None", 0),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> OrdinalMaps {
        let mut m = OrdinalMaps::default();
        m.insert_shared(&["ExterQual", "GarageQual"], &quality_scale());
        m.insert("LotShape", lot_shape_scale());
        m
    }

    #[test]
    fn encode_known_value() {
        let m = maps();
        assert_eq!(m.encode("ExterQual", "Ex"), Ok(5));
        assert_eq!(m.encode("GarageQual", "None"), Ok(0));
        assert_eq!(m.encode("LotShape", "Reg"), Ok(3));
    }

    #[test]
    fn encode_unmapped_value_fails() {
        let err = maps().encode("LotShape", "None").unwrap_err();
        assert_eq!(
            err,
            LookupError::UnmappedValue {
                column: "LotShape".into(),
                value: "None".into()
            }
        );
    }

    #[test]
    fn encode_unknown_column_fails() {
        let err = maps().encode("Neighborhood", "NAmes").unwrap_err();
        assert!(matches!(err, LookupError::UnknownColumn { .. }));
    }

    #[test]
    fn quality_scale_is_strictly_ordered() {
        let q = quality_scale();
        let order = ["None", "Po", "Fa", "TA", "Gd", "Ex"];
        for pair in order.windows(2) {
            assert!(q.get(pair[0]).unwrap() < q.get(pair[1]).unwrap());
        }
    }

    #[test]
    fn sentinels_are_out_of_band() {
        for scale in [
            quality_scale(),
            functional_scale(),
            basement_exposure_scale(),
            garage_finish_scale(),
            fence_scale(),
        ] {
            assert!(scale.sentinel_is_out_of_band(), "{scale:?}");
        }
    }

    #[test]
    fn sentinel_sharing_a_value_is_in_band() {
        let s = OrdinalScale::from_pairs(&[("Y", 1), ("N", 0), ("None", 0)]);
        assert!(!s.sentinel_is_out_of_band());
        assert!(!lot_shape_scale().sentinel_is_out_of_band());
    }

    #[test]
    fn maps_serialize_as_plain_nested_objects() {
        let json = serde_json::to_value(maps()).unwrap();
        assert_eq!(json["ExterQual"]["TA"], 3);
        assert_eq!(json["LotShape"]["IR3"], 0);
    }
}
