use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Filesystem backend: one file per key under a fixed directory.
///
/// Keys are used as file names verbatim; the session layer only produces
/// `prefix_auth_*` keys, which are filesystem-safe.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open a store under the platform cache directory, e.g.
    /// `~/.cache/{app_name}` on Linux.
    pub fn in_cache_dir(app_name: &str) -> Result<Self, StoreError> {
        let cache_dir = dirs::cache_dir().ok_or(StoreError::NoCacheDir)?;
        Self::new(cache_dir.join(app_name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.key_path(key), value)?;
        debug!(key = %key, "wrote session key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => {
                debug!(key = %key, "removed session key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
