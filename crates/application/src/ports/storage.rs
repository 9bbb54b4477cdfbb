//! Durable key/value storage port.
//!
//! Models origin-scoped browser storage: string keys, string values,
//! synchronous access, surviving process restarts.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backing store cannot be used (e.g. poisoned lock, missing directory).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for durable string storage scoped to one API origin.
pub trait KeyValueStorage: Send + Sync {
    /// Reads a value. Returns `None` when the key is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Writes several values as one operation.
    ///
    /// The default writes them one at a time; adapters that can commit a
    /// batch in a single write should override this.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in items {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// Removes several values as one operation.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove_item(key)?;
        }
        Ok(())
    }
}
