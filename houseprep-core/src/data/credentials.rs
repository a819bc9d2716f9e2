//! Kaggle API credential resolution.
//!
//! Lookup order:
//! 1. `KAGGLE_USERNAME` + `KAGGLE_KEY` environment variables
//! 2. `$KAGGLE_CONFIG_DIR/kaggle.json`
//! 3. `~/.kaggle/kaggle.json`

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::provider::DataError;

pub const USERNAME_ENV: &str = "KAGGLE_USERNAME";
pub const KEY_ENV: &str = "KAGGLE_KEY";
pub const CONFIG_DIR_ENV: &str = "KAGGLE_CONFIG_DIR";
pub const CREDENTIALS_FILE: &str = "kaggle.json";

/// API username and key.
#[derive(Clone, Deserialize)]
pub struct KaggleCredentials {
    pub username: String,
    pub key: String,
}

// Keep the key out of logs and panics.
impl fmt::Debug for KaggleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KaggleCredentials")
            .field("username", &self.username)
            .field("key", &"***")
            .finish()
    }
}

/// Where credentials were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    File(PathBuf),
}

impl KaggleCredentials {
    /// Resolve credentials from the environment, then the credentials file.
    pub fn resolve() -> Result<(Self, CredentialSource), DataError> {
        let username = std::env::var(USERNAME_ENV).ok();
        let key = std::env::var(KEY_ENV).ok();
        if let (Some(username), Some(key)) = (username, key) {
            return Ok((Self::checked(username, key)?, CredentialSource::Environment));
        }

        let path = Self::default_file().ok_or_else(|| {
            DataError::Authentication(format!(
                "no {USERNAME_ENV}/{KEY_ENV} set and no home directory to locate {CREDENTIALS_FILE}"
            ))
        })?;
        let creds = Self::from_file(&path)?;
        Ok((creds, CredentialSource::File(path)))
    }

    /// `$KAGGLE_CONFIG_DIR/kaggle.json`, else `~/.kaggle/kaggle.json`.
    pub fn default_file() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir).join(CREDENTIALS_FILE));
        }
        dirs::home_dir().map(|home| home.join(".kaggle").join(CREDENTIALS_FILE))
    }

    /// Read a `kaggle.json` file (`{"username": "...", "key": "..."}`).
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DataError::Authentication(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
            .map_err(|e| DataError::Authentication(format!("{}: {e}", path.display())))
    }

    fn from_json(content: &str) -> Result<Self, String> {
        let raw: KaggleCredentials =
            serde_json::from_str(content).map_err(|e| format!("malformed credentials: {e}"))?;
        Self::checked(raw.username, raw.key).map_err(|e| e.to_string())
    }

    fn checked(username: String, key: String) -> Result<Self, DataError> {
        if username.trim().is_empty() || key.trim().is_empty() {
            return Err(DataError::Authentication(
                "username and key must both be non-empty".into(),
            ));
        }
        Ok(Self { username, key })
    }
}
