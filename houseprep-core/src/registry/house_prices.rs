//! The shipped registry for the house-prices competition dataset.
//!
//! Lists are hand-maintained decisions from exploratory analysis. Edit here
//! (or supply a TOML registry) and keep `validate()` empty.

use super::classify::ColumnLists;
use super::impute::ImputePlan;
use super::ordinal::{self, OrdinalMaps};
use super::HousingConfig;

// ── Imputation buckets ──────────────────────────────────────────────

#[rustfmt::skip]
pub const STRUCTURAL_NONE_COLS: &[&str] = &[
    "MasVnrType", "GarageType", "BsmtFinType1", "BsmtFinType2",
    "BsmtQual", "BsmtCond", "BsmtExposure", "FireplaceQu",
    "GarageQual", "GarageCond", "GarageFinish", "Fence",
];

#[rustfmt::skip]
pub const MODE_FILL_COLS: &[&str] = &[
    // nominal
    "MSSubClass", "MSZoning", "Neighborhood", "Exterior1st",
    "RoofStyle", "RoofMatl", "Heating", "Foundation", "LotConfig",
    "Electrical", "MoSold", "BldgType", "SaleType",
    "Condition1", "Condition2", "SaleCondition", "HouseStyle",
    // ordinal
    "ExterQual", "ExterCond", "HeatingQC", "KitchenQual", "CentralAir",
    "Functional", "LandContour", "LotShape", "LandSlope", "PavedDrive",
];

#[rustfmt::skip]
pub const ZERO_FILL_COLS: &[&str] = &[
    "2ndFlrSF", "OpenPorchSF", "WoodDeckSF", "MasVnrArea", "LowQualFinSF",
    "MiscVal", "3SsnPorch", "PoolArea", "BsmtFullBath", "HalfBath",
    "BsmtHalfBath", "BsmtFinSF2", "EnclosedPorch", "ScreenPorch",
];

#[rustfmt::skip]
pub const MEDIAN_FILL_COLS: &[&str] = &[
    "LotArea", "GrLivArea", "BsmtUnfSF", "1stFlrSF", "TotalBsmtSF", "LotFrontage",
];

// ── Classification lists ────────────────────────────────────────────

#[rustfmt::skip]
pub const NOMINAL_COLS: &[&str] = &[
    "MSSubClass", "MoSold", "BldgType", "MasVnrType", "GarageType", "SaleType", "Condition1",
    "Condition2", "SaleCondition", "Neighborhood", "Exterior1st", "HouseStyle", "RoofMatl",
    "BsmtFinType2", "RoofStyle", "BsmtFinType1", "Heating", "Foundation", "LotConfig", "MSZoning",
    "Electrical",
];

#[rustfmt::skip]
pub const COLLAPSE_TO_BINARY_COLS: &[&str] = &[
    "LowQualFinSF", "MiscVal", "3SsnPorch", "PoolArea", "BsmtFullBath", "HalfBath",
    "BsmtHalfBath", "BsmtFinSF2", "EnclosedPorch", "ScreenPorch",
];

#[rustfmt::skip]
pub const RIGHT_SKEWED_COLS: &[&str] = &[
    "LotArea", "GrLivArea", "BsmtUnfSF", "1stFlrSF", "TotalBsmtSF", "LotFrontage",
];

#[rustfmt::skip]
pub const SKEWED_AND_BINARY_COLS: &[&str] = &["2ndFlrSF", "OpenPorchSF", "WoodDeckSF", "MasVnrArea"];

#[rustfmt::skip]
pub const DROP_COLS: &[&str] = &[
    "PoolQC", "MiscFeature", "Utilities", "Id", "GarageArea",
    "TotRmsAbvGrd", "Alley", "Exterior2nd", "Street",
];

/// Object-typed columns that carry a real order.
#[rustfmt::skip]
pub const ORDINAL_OBJECTS: &[&str] = &[
    "ExterQual", "ExterCond", "BsmtQual", "BsmtCond", "HeatingQC", "KitchenQual", "FireplaceQu",
    "GarageQual", "GarageCond", "Functional", "LandContour", "LotShape", "BsmtExposure",
    "LandSlope", "GarageFinish", "PavedDrive", "Fence", "CentralAir",
];

pub const YEAR_COLS: &[&str] = &["YearBuilt", "YearRemodAdd", "GarageYrBlt", "YrSold"];

/// Columns sharing the Ex/Gd/TA/Fa/Po quality scale.
#[rustfmt::skip]
pub const QUALITY_SCALE_COLS: &[&str] = &[
    "ExterQual", "ExterCond", "BsmtQual", "BsmtCond", "HeatingQC", "KitchenQual",
    "FireplaceQu", "GarageQual", "GarageCond",
];

pub const ENGINEERED_FEATURES: &[&str] = &[
    "TotalLivingArea",
    "TotalPorchSF",
    "OverallGrade",
    "TotalBathrooms",
    "HouseAge",
];

fn owned(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

pub fn impute_plan() -> ImputePlan {
    ImputePlan {
        structural_none: owned(STRUCTURAL_NONE_COLS),
        mode_fill: owned(MODE_FILL_COLS),
        zero_fill: owned(ZERO_FILL_COLS),
        median_fill: owned(MEDIAN_FILL_COLS),
        year_cols: owned(YEAR_COLS),
    }
}

pub fn column_lists() -> ColumnLists {
    ColumnLists {
        nominal: owned(NOMINAL_COLS),
        ordinal_objects: owned(ORDINAL_OBJECTS),
        right_skewed: owned(RIGHT_SKEWED_COLS),
        skewed_and_binary: owned(SKEWED_AND_BINARY_COLS),
        collapse_to_binary: owned(COLLAPSE_TO_BINARY_COLS),
        drop: owned(DROP_COLS),
        year: owned(YEAR_COLS),
    }
}

pub fn ordinal_maps() -> OrdinalMaps {
    let mut maps = OrdinalMaps::default();
    maps.insert_shared(QUALITY_SCALE_COLS, &ordinal::quality_scale());
    maps.insert("Functional", ordinal::functional_scale());
    maps.insert("LandContour", ordinal::land_contour_scale());
    maps.insert("LotShape", ordinal::lot_shape_scale());
    maps.insert("BsmtExposure", ordinal::basement_exposure_scale());
    maps.insert("LandSlope", ordinal::land_slope_scale());
    maps.insert("GarageFinish", ordinal::garage_finish_scale());
    maps.insert("PavedDrive", ordinal::paved_drive_scale());
    maps.insert("CentralAir", ordinal::central_air_scale());
    maps.insert("Fence", ordinal::fence_scale());
    maps
}

impl HousingConfig {
    /// The built-in registry for the house-prices dataset.
    ///
    /// Feature toggles are left unset; they come from an external registry file.
    pub fn house_prices() -> Self {
        Self::new(
            impute_plan(),
            column_lists(),
            ordinal_maps(),
            owned(ENGINEERED_FEATURES),
            None,
        )
    }
}
