//! Key/value storage adapters.
//!
//! - [`FileStorage`] keeps one JSON document per API origin on disk
//! - [`MemoryStorage`] keeps entries in a map, for tests and throwaway runs

mod document;
mod file_storage;
mod memory_storage;

pub use document::StorageDocument;
pub use file_storage::{FileStorage, default_storage_dir, origin_slug};
pub use memory_storage::MemoryStorage;
