//! Dataset fetcher: download-if-absent, then load.
//!
//! File presence is the only cache signal. There is no checksum or staleness
//! check, no retry, and no partial success: the first unresolved file fails
//! the call.

use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

use super::provider::{ArchiveClient, DataError, FileSource};
use super::table::read_table;

pub const COMPETITION: &str = "house-prices-advanced-regression-techniques";
pub const TRAIN_FILE: &str = "train.csv";
pub const TEST_FILE: &str = "test.csv";

/// Files resolved by the fetcher, in resolution order.
pub const DATASET_FILES: [&str; 2] = [TRAIN_FILE, TEST_FILE];

/// One resolved dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub file_name: &'static str,
    pub path: PathBuf,
    pub source: FileSource,
}

/// Outcome of [`fetch_housing_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub data_dir: PathBuf,
    pub files: Vec<ResolvedFile>,
}

impl FetchReport {
    pub fn downloads(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.source == FileSource::Downloaded)
            .count()
    }

    pub fn path_of(&self, file_name: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| f.path.as_path())
    }
}

/// `<cwd>/../datasets/raw`, the conventional location next to a notebooks dir.
pub fn default_data_dir() -> Result<PathBuf, DataError> {
    let cwd = std::env::current_dir().map_err(|e| DataError::io(Path::new("."), e))?;
    let base = cwd.parent().map(Path::to_path_buf).unwrap_or(cwd);
    Ok(base.join("datasets").join("raw"))
}

/// Ensure `train.csv` and `test.csv` exist in `data_dir`, downloading what is missing.
///
/// Creates `data_dir` recursively if needed. The client is authenticated
/// lazily, only when a download is actually required.
pub fn fetch_housing_files(
    data_dir: &Path,
    client: &mut dyn ArchiveClient,
) -> Result<FetchReport, DataError> {
    std::fs::create_dir_all(data_dir).map_err(|e| DataError::io(data_dir, e))?;

    let mut files = Vec::with_capacity(DATASET_FILES.len());
    let mut authenticated = false;

    for file_name in DATASET_FILES {
        let path = data_dir.join(file_name);

        if path.is_file() {
            tracing::debug!(file = file_name, path = %path.display(), "cache hit, skipping download");
            files.push(ResolvedFile {
                file_name,
                path,
                source: FileSource::Cache,
            });
            continue;
        }

        if !authenticated {
            client.authenticate()?;
            authenticated = true;
        }

        tracing::info!(file = file_name, competition = COMPETITION, "downloading");
        let written = client.download_competition_file(COMPETITION, file_name, data_dir)?;
        if !written.is_file() {
            return Err(DataError::download(
                file_name,
                format!("client reported {} but no file exists", written.display()),
            ));
        }

        files.push(ResolvedFile {
            file_name,
            path: written,
            source: FileSource::Downloaded,
        });
    }

    Ok(FetchReport {
        data_dir: data_dir.to_path_buf(),
        files,
    })
}

/// Ensure both files are present, then parse them as `(train, test)`.
pub fn load_housing_data(
    data_dir: &Path,
    client: &mut dyn ArchiveClient,
) -> Result<(DataFrame, DataFrame), DataError> {
    let report = fetch_housing_files(data_dir, client)?;
    load_from_report(&report)
}

/// Parse the files named by a fetch report as `(train, test)`.
pub fn load_from_report(report: &FetchReport) -> Result<(DataFrame, DataFrame), DataError> {
    let path = |name: &str| {
        report
            .path_of(name)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| report.data_dir.join(name))
    };

    let train = read_table(&path(TRAIN_FILE))?;
    let test = read_table(&path(TEST_FILE))?;
    tracing::info!(
        train_rows = train.height(),
        train_cols = train.width(),
        test_rows = test.height(),
        test_cols = test.width(),
        "loaded housing data"
    );
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir_ends_in_datasets_raw() {
        let dir = default_data_dir().unwrap();
        assert!(dir.ends_with("datasets/raw"));
    }

    #[test]
    fn report_counts_downloads() {
        let report = FetchReport {
            data_dir: PathBuf::from("d"),
            files: vec![
                ResolvedFile {
                    file_name: TRAIN_FILE,
                    path: PathBuf::from("d/train.csv"),
                    source: FileSource::Cache,
                },
                ResolvedFile {
                    file_name: TEST_FILE,
                    path: PathBuf::from("d/test.csv"),
                    source: FileSource::Downloaded,
                },
            ],
        };
        assert_eq!(report.downloads(), 1);
        assert_eq!(report.path_of(TEST_FILE), Some(Path::new("d/test.csv")));
        assert_eq!(report.path_of("sample_submission.csv"), None);
    }
}
