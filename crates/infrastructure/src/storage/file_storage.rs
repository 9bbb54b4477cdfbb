//! File-backed storage.
//!
//! Each API origin gets its own document, `<storage dir>/<origin slug>.json`,
//! so credentials for one server are never sent to another. Writes go to a
//! sibling temp file which is then renamed over the document.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use replydesk_application::{KeyValueStorage, StorageError};
use url::Url;

use super::document::StorageDocument;

/// Default storage directory: `<platform data dir>/replydesk`.
#[must_use]
pub fn default_storage_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("replydesk"))
}

/// File name stem for an origin, e.g. `http_localhost_8000`.
///
/// Only scheme, host, and port are used. Origins without a host map to
/// `local`.
#[must_use]
pub fn origin_slug(origin: &Url) -> String {
    let Some(host) = origin.host_str() else {
        return "local".to_string();
    };

    let mut slug = format!("{}_{host}", origin.scheme());
    if let Some(port) = origin.port() {
        slug.push('_');
        slug.push_str(&port.to_string());
    }

    slug.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Storage persisted as one JSON document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a storage over the document at `path`.
    ///
    /// Nothing is read or created until the first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates the storage for `origin` inside `dir`.
    #[must_use]
    pub fn for_origin(dir: &Path, origin: &Url) -> Self {
        Self::new(dir.join(format!("{}.json", origin_slug(origin))))
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing file is an empty document; an
    /// unreadable one is logged and overwritten with an empty document
    /// before it is returned.
    fn read_document(&self) -> Result<StorageDocument, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StorageDocument::default()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        match StorageDocument::from_bytes(&bytes) {
            Ok(document) => Ok(document),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage document is unreadable; replacing it with an empty one"
                );
                let document = StorageDocument::default();
                self.write_document(&document)?;
                Ok(document)
            }
        }
    }

    fn write_document(&self, document: &StorageDocument) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, document.to_bytes()?)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }

    /// Applies `change` to the stored entries and writes them back if it
    /// reports a modification.
    fn update(
        &self,
        change: impl FnOnce(&mut StorageDocument) -> bool,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut document = self.read_document()?;
        if change(&mut document) {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_document()?.items.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_items(&[(key, value)])
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.remove_items(&[key])
    }

    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        self.update(|document| {
            for (key, value) in items {
                document.items.insert((*key).to_string(), (*value).to_string());
            }
            true
        })
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.update(|document| {
            let mut changed = false;
            for key in keys {
                changed |= document.items.remove(*key).is_some();
            }
            changed
        })
    }
}
