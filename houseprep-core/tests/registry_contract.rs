//! Contract tests for the shipped registry as external consumers see it.

use chrono::{TimeZone, Utc};
use houseprep_core::registry::house_prices::{DROP_COLS, ORDINAL_OBJECTS};
use houseprep_core::registry::{ImputeStrategy, STRUCTURAL_NONE_FILL};
use houseprep_core::{ColumnClass, ExportSnapshot, HousingConfig};

#[test]
fn shipped_registry_validates_clean() {
    let cfg = HousingConfig::house_prices();
    let defects = cfg.validate();
    assert!(defects.is_empty(), "defects: {defects:#?}");
}

#[test]
fn every_ordinal_object_is_mapped() {
    let cfg = HousingConfig::house_prices();
    for col in ORDINAL_OBJECTS {
        assert!(cfg.ordinal_maps().get(col).is_some(), "no map for {col}");
    }
}

#[test]
fn structural_none_ordinals_map_absence_out_of_band() {
    let cfg = HousingConfig::house_prices();
    let ordinal = &cfg.columns().ordinal_objects;

    let mut checked = 0;
    for col in &cfg.impute_plan().structural_none {
        if !ordinal.contains(col) {
            continue;
        }
        let scale = cfg.ordinal_maps().get(col).unwrap();
        let sentinel = scale.get(STRUCTURAL_NONE_FILL).unwrap();
        for (category, value) in scale.iter() {
            if category != STRUCTURAL_NONE_FILL {
                assert_ne!(value, sentinel, "{col}: {category} collides with None");
            }
        }
        checked += 1;
    }
    assert_eq!(checked, 8);
}

#[test]
fn dropped_columns_are_never_scheduled() {
    let cfg = HousingConfig::house_prices();
    for col in DROP_COLS {
        assert_eq!(cfg.impute_plan().strategy_for(col), None, "{col}");
        assert!(!cfg.columns().ordinal_objects.iter().any(|c| c == col));
        assert_eq!(cfg.classify(col), ColumnClass::Dropped);
    }
}

#[test]
fn known_columns_classify_as_listed() {
    let cfg = HousingConfig::house_prices();
    assert_eq!(cfg.classify("LotArea"), ColumnClass::RightSkewed);
    assert_eq!(cfg.classify("TotallyUnknownCol"), ColumnClass::Unclassified);
    assert_eq!(cfg.classify("MasVnrArea"), ColumnClass::SkewedAndBinary);
    assert_eq!(cfg.classify("3SsnPorch"), ColumnClass::CollapseToBinary);
    assert_eq!(cfg.classify("Neighborhood"), ColumnClass::Nominal);
}

#[test]
fn known_columns_impute_as_listed() {
    let plan = HousingConfig::house_prices().impute_plan().clone();
    assert_eq!(plan.strategy_for("GarageType"), Some(ImputeStrategy::StructuralNone));
    assert_eq!(plan.strategy_for("KitchenQual"), Some(ImputeStrategy::MostFrequent));
    assert_eq!(plan.strategy_for("ScreenPorch"), Some(ImputeStrategy::Zero));
    assert_eq!(plan.strategy_for("LotFrontage"), Some(ImputeStrategy::Median));
    assert!(plan.is_year("GarageYrBlt"));
}

#[test]
fn ordinal_encoding_through_registry() {
    let cfg = HousingConfig::house_prices();
    let maps = cfg.ordinal_maps();
    assert_eq!(maps.encode("BsmtExposure", "None"), Ok(-1));
    assert_eq!(maps.encode("Functional", "Sev"), Ok(6));
    assert_eq!(maps.encode("Fence", "GdWo"), Ok(1));
    assert_eq!(maps.encode("CentralAir", "Y"), Ok(1));
    assert!(maps.encode("LotShape", "None").is_err());
}

#[test]
fn snapshot_json_roundtrip_matches_live_registry() {
    let cfg = HousingConfig::house_prices();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let json = cfg.export_snapshot(now).to_json_pretty().unwrap();
    let parsed = ExportSnapshot::from_json(&json).unwrap();

    assert_eq!(parsed.version, "0.1.0");
    assert_eq!(parsed.generated_at, now);
    assert_eq!(&parsed.impute_plan, cfg.impute_plan());
    assert_eq!(&parsed.ordinal_maps, cfg.ordinal_maps());
    assert_eq!(parsed.drop_cols, cfg.columns().drop);
    assert_eq!(parsed.ordinal_objects, cfg.columns().ordinal_objects);
    assert_eq!(parsed.features.engineered_features, cfg.engineered_features());
}

#[test]
fn registry_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.toml");
    let cfg = HousingConfig::house_prices();
    std::fs::write(&path, cfg.to_toml().unwrap()).unwrap();

    let loaded = HousingConfig::from_file(&path).unwrap();
    assert_eq!(loaded, cfg);
    assert!(loaded.validate().is_empty());
}
