//! On-disk format of a storage file.

use std::collections::BTreeMap;

use replydesk_application::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Current document schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Entries stored for one origin.
///
/// ```json
/// {
///   "schema_version": 1,
///   "items": {
///     "token": "eyJhbGciOi...",
///     "user": "{\"id\":\"u-1\",...}"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDocument {
    /// Format version.
    pub schema_version: u32,
    /// Stored entries, sorted by key.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

impl Default for StorageDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            items: BTreeMap::new(),
        }
    }
}

impl StorageDocument {
    /// Encodes as 2-space indented JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"  ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    /// Decodes a document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the bytes are not a document.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StorageError> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }
}
