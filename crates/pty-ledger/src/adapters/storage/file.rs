use crate::errors::StoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed key-value store.
///
/// The whole store is one JSON object (key -> record text) rewritten on every
/// `put` through a temp file and rename, so a crash never leaves a torn file.
/// Values must be UTF-8; every ledger record is JSON text.
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: BTreeMap<String, String>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing content if the file exists.
    ///
    /// # Errors
    ///
    /// `Io` if the file exists but cannot be read, `Corruption` if it is not
    /// a JSON object of strings.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Corruption {
                    message: format!("{}: {e}", path.display()),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing ledger file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("{}: {e}", path.display()),
                })
            }
        };

        debug!(keys = data.len(), path = %path.display(), "Loaded ledger file");
        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_to_file(&self) -> Result<(), StoreError> {
        use std::io::Write;

        let io_err = |e: std::io::Error| StoreError::Io {
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&self.data).map_err(|e| StoreError::Io {
            message: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.get(key).map(|v| v.as_bytes().to_vec()))
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let text = std::str::from_utf8(value).map_err(|e| StoreError::Rejected {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let previous = self.data.insert(key.to_string(), text.to_string());

        if let Err(e) = self.save_to_file() {
            // keep memory in step with disk
            match previous {
                Some(old) => self.data.insert(key.to_string(), old),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.data.contains_key(key))
    }
}
