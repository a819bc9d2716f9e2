//! Kaggle competition-file client.
//!
//! Downloads single competition files over the public v1 REST API with HTTP
//! basic auth. No retries: every failure is surfaced to the caller.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::StatusCode;

use super::credentials::KaggleCredentials;
use super::provider::{ArchiveClient, DataError};

pub const DEFAULT_BASE_URL: &str = "https://www.kaggle.com/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Kaggle API client.
pub struct KaggleClient {
    client: reqwest::blocking::Client,
    base_url: String,
    credentials: Option<KaggleCredentials>,
}

impl KaggleClient {
    pub fn new() -> Result<Self, DataError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("houseprep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
        })
    }

    /// Point the client at another API root (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use explicit credentials instead of resolving them in `authenticate`.
    pub fn with_credentials(mut self, credentials: KaggleCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Build the download URL for a competition file.
    fn file_url(&self, competition: &str, file_name: &str) -> String {
        format!(
            "{}/competitions/data/download/{competition}/{file_name}",
            self.base_url
        )
    }

    /// Write the body to `{file}.part`, then rename into place.
    ///
    /// A crash mid-write leaves only the `.part` file, which the cache ignores.
    fn write_atomically(file_name: &str, dest: &Path, body: &[u8]) -> Result<(), DataError> {
        let tmp_path = dest.with_file_name(format!("{file_name}.part"));
        let mut file =
            std::fs::File::create(&tmp_path).map_err(|e| DataError::io(&tmp_path, e))?;
        file.write_all(body)
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                let _ = std::fs::remove_file(&tmp_path);
                DataError::io(&tmp_path, e)
            })?;
        std::fs::rename(&tmp_path, dest).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            DataError::io(dest, e)
        })
    }
}

impl ArchiveClient for KaggleClient {
    fn authenticate(&mut self) -> Result<(), DataError> {
        if self.credentials.is_some() {
            return Ok(());
        }
        let (creds, source) = KaggleCredentials::resolve()?;
        tracing::debug!(username = %creds.username, source = ?source, "resolved Kaggle credentials");
        self.credentials = Some(creds);
        Ok(())
    }

    fn download_competition_file(
        &self,
        competition: &str,
        file_name: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, DataError> {
        let creds = self.credentials.as_ref().ok_or_else(|| {
            DataError::Authentication("client not authenticated; call authenticate() first".into())
        })?;

        let url = self.file_url(competition, file_name);
        tracing::debug!(%url, "requesting competition file");

        let resp = self
            .client
            .get(&url)
            .basic_auth(&creds.username, Some(&creds.key))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    DataError::download(file_name, format!("request timed out: {e}"))
                } else {
                    DataError::download(file_name, format!("network error: {e}"))
                }
            })?;

        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Some(err) = status_error(
            resp.status(),
            competition,
            file_name,
            &creds.username,
            retry_after.as_deref(),
        ) {
            return Err(err);
        }

        let body = resp
            .bytes()
            .map_err(|e| DataError::download(file_name, format!("reading body: {e}")))?;
        if let Some(err) = body_error(file_name, &body) {
            return Err(err);
        }

        let dest = dest_dir.join(file_name);
        Self::write_atomically(file_name, &dest, &body)?;
        tracing::info!(file = file_name, bytes = body.len(), path = %dest.display(), "downloaded");
        Ok(dest)
    }
}

/// Map a non-success response status to the error the caller sees.
///
/// 401 is a credentials problem; everything else is a failed download.
fn status_error(
    status: StatusCode,
    competition: &str,
    file_name: &str,
    username: &str,
    retry_after: Option<&str>,
) -> Option<DataError> {
    let reason = match status {
        s if s.is_success() => return None,
        StatusCode::UNAUTHORIZED => {
            return Some(DataError::Authentication(format!(
                "Kaggle rejected credentials for user '{username}'"
            )))
        }
        StatusCode::FORBIDDEN => {
            format!("access denied to competition '{competition}' (rules not accepted?)")
        }
        StatusCode::NOT_FOUND => format!("not found in competition '{competition}'"),
        StatusCode::TOO_MANY_REQUESTS => match retry_after {
            Some(secs) => format!("rate limited (retry after {secs}s)"),
            None => "rate limited".to_string(),
        },
        other => format!("HTTP {other}"),
    };
    Some(DataError::download(file_name, reason))
}

/// Files are stored verbatim, so an archive body is rejected rather than unpacked.
fn body_error(file_name: &str, body: &[u8]) -> Option<DataError> {
    body.starts_with(ZIP_MAGIC).then(|| {
        DataError::download(
            file_name,
            "server returned a zip archive; expected the raw file",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> KaggleClient {
        KaggleClient::new().unwrap()
    }

    #[test]
    fn builds_download_url() {
        let c = client().with_base_url("https://example.test/api/v1/");
        assert_eq!(
            c.file_url("house-prices-advanced-regression-techniques", "train.csv"),
            "https://example.test/api/v1/competitions/data/download/house-prices-advanced-regression-techniques/train.csv"
        );
    }

    #[test]
    fn download_without_authentication_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = client()
            .download_competition_file("comp", "train.csv", dir.path())
            .unwrap_err();
        assert!(matches!(err, DataError::Authentication(_)));
        assert!(!dir.path().join("train.csv").exists());
    }

    #[test]
    fn explicit_credentials_skip_resolution() {
        let mut c = client().with_credentials(KaggleCredentials {
            username: "alice".into(),
            key: "k".into(),
        });
        assert!(c.authenticate().is_ok());
    }

    #[test]
    fn unreachable_host_is_download_error() {
        let dir = tempfile::tempdir().unwrap();
        let c = KaggleClient::with_timeout(Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .with_credentials(KaggleCredentials {
                username: "alice".into(),
                key: "k".into(),
            });
        let err = c
            .download_competition_file("comp", "train.csv", dir.path())
            .unwrap_err();
        assert!(matches!(err, DataError::Download { .. }));
        assert!(!dir.path().join("train.csv").exists());
        assert!(!dir.path().join("train.csv.part").exists());
    }

    fn download_reason(err: Option<DataError>) -> String {
        match err {
            Some(DataError::Download { file, reason }) => {
                assert_eq!(file, "train.csv");
                reason
            }
            other => panic!("expected download error, got {other:?}"),
        }
    }

    fn status(code: StatusCode, retry_after: Option<&str>) -> Option<DataError> {
        status_error(code, "comp", "train.csv", "alice", retry_after)
    }

    #[test]
    fn success_status_is_not_an_error() {
        assert!(status(StatusCode::OK, None).is_none());
    }

    #[test]
    fn unauthorized_is_authentication_error() {
        match status(StatusCode::UNAUTHORIZED, None) {
            Some(DataError::Authentication(msg)) => assert!(msg.contains("alice")),
            other => panic!("expected authentication error, got {other:?}"),
        }
    }

    #[test]
    fn forbidden_mentions_competition_rules() {
        let reason = download_reason(status(StatusCode::FORBIDDEN, None));
        assert!(reason.contains("'comp'"));
        assert!(reason.contains("rules"));
    }

    #[test]
    fn not_found_is_download_error() {
        let reason = download_reason(status(StatusCode::NOT_FOUND, None));
        assert!(reason.contains("not found"));
    }

    #[test]
    fn rate_limit_carries_retry_after() {
        let reason = download_reason(status(StatusCode::TOO_MANY_REQUESTS, Some("30")));
        assert!(reason.contains("retry after 30s"));

        let reason = download_reason(status(StatusCode::TOO_MANY_REQUESTS, None));
        assert_eq!(reason, "rate limited");
    }

    #[test]
    fn other_status_reports_code() {
        let reason = download_reason(status(StatusCode::SERVICE_UNAVAILABLE, None));
        assert!(reason.contains("503"));
    }

    #[test]
    fn zip_body_is_download_error() {
        let reason = download_reason(body_error("train.csv", b"PK\x03\x04rest-of-archive"));
        assert!(reason.contains("zip"));
        assert!(body_error("train.csv", b"Id,SalePrice\n1,208500\n").is_none());
    }

    #[test]
    fn atomic_write_leaves_no_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("test.csv");
        KaggleClient::write_atomically("test.csv", &dest, b"Id\n1\n").unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "Id\n1\n");
        assert!(!dir.path().join("test.csv.part").exists());
    }
}
