//! src/profile/source.rs
//!
//! Where profile records come from.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::ProfileError;
use super::address::Address;
use super::data::ProfileRecord;

/// A backing store for profile records. Called off the UI thread.
pub trait ProfileSource: Send + Sync {
    fn fetch(&self, address: &Address) -> Result<ProfileRecord, ProfileError>;
}

/// Reads `<dir>/<address>.json`.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ProfileSource for DirectorySource {
    fn fetch(&self, address: &Address) -> Result<ProfileRecord, ProfileError> {
        let path = self.dir.join(format!("{}.json", address));
        debug!(path = %path.display(), "reading profile record");
        let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProfileError::NotFound(address.to_string()),
            _ => ProfileError::Io(e),
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Source used when no profile directory is configured.
pub struct NoSource;

impl ProfileSource for NoSource {
    fn fetch(&self, address: &Address) -> Result<ProfileRecord, ProfileError> {
        Err(ProfileError::NotFound(address.to_string()))
    }
}
