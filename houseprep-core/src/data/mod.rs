//! Dataset fetching, CSV loading and ordinal coverage audit.

pub mod audit;
pub mod credentials;
pub mod fetch;
pub mod kaggle;
pub mod provider;
pub mod table;

pub use audit::audit_ordinal_coverage;
pub use credentials::{CredentialSource, KaggleCredentials};
pub use fetch::{
    default_data_dir, fetch_housing_files, load_from_report, load_housing_data, FetchReport,
    ResolvedFile, COMPETITION, TEST_FILE, TRAIN_FILE,
};
pub use kaggle::KaggleClient;
pub use provider::{ArchiveClient, DataError, FileSource};
pub use table::read_table;
