//! houseprep core — preprocessing registry and dataset fetcher for the
//! house-prices regression dataset.
//!
//! - `registry`: imputation plan, column classification lists, ordinal maps,
//!   engineered feature names, and the invariant checks over them
//! - `snapshot`: serializable export of the registry
//! - `data`: download-if-absent fetcher, CSV loading, ordinal coverage audit

pub mod data;
pub mod registry;
pub mod snapshot;

pub use registry::{ColumnClass, ConfigDefect, HousingConfig};
pub use snapshot::ExportSnapshot;
