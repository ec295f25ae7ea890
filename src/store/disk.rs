use crate::core::error::FetchError;
use anyhow::{Context, Result};
use directories::BaseDirs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::debug;

/// A time-to-live cache of opaque payloads, one file per entry.
///
/// Entries live at `<base_dir>/<namespace>/<name>`. No expiry is stored with an
/// entry; its age is the time since the file was last written and liveness is
/// decided at read time against the caller's `max_age`.
#[derive(Debug, Clone)]
pub struct DiskCache {
    base_dir: PathBuf,
    namespace: String,
}

impl DiskCache {
    pub fn new(base_dir: impl Into<PathBuf>, namespace: &str) -> Self {
        Self {
            base_dir: base_dir.into(),
            namespace: namespace.to_string(),
        }
    }

    /// Cache rooted in the platform's user cache directory.
    pub fn in_user_cache_dir(namespace: &str) -> Result<Self> {
        let dirs = BaseDirs::new().context("Could not determine the user cache directory")?;
        Ok(Self::new(dirs.cache_dir(), namespace))
    }

    pub fn dir(&self) -> PathBuf {
        self.base_dir.join(&self.namespace)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir().join(name)
    }

    /// Returns the stored payload, or `None` when the entry is missing or older
    /// than `max_age`. Expired entries are left in place for the next `save`.
    pub async fn load(&self, name: &str, max_age: Duration) -> Result<Option<Vec<u8>>, FetchError> {
        let path = self.path(name);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(entry = name, "Cache MISS");
                return Ok(None);
            }
            Err(e) => return Err(FetchError::cache(path, e)),
        };

        let modified = metadata
            .modified()
            .map_err(|e| FetchError::cache(&path, e))?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age > max_age {
            debug!(entry = name, ?age, ?max_age, "Cache entry expired");
            return Ok(None);
        }

        let data = fs::read(&path)
            .await
            .map_err(|e| FetchError::cache(&path, e))?;
        debug!(entry = name, ?age, bytes = data.len(), "Cache HIT");
        Ok(Some(data))
    }

    /// Replaces the entry with `data`, creating the namespace directory if needed.
    pub async fn save(&self, name: &str, data: &[u8]) -> Result<(), FetchError> {
        let dir = self.dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| FetchError::cache(&dir, e))?;

        let path = self.path(name);
        let staging = staging_path(&path);
        fs::write(&staging, data)
            .await
            .map_err(|e| FetchError::cache(&staging, e))?;
        fs::rename(&staging, &path)
            .await
            .map_err(|e| FetchError::cache(&path, e))?;
        debug!(entry = name, bytes = data.len(), "Cache PUT");
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}
