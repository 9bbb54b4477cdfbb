//! ReplyDesk Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod navigation;
pub mod storage;

pub use adapters::ReqwestTransport;
pub use navigation::HistoryNavigator;
pub use storage::{FileStorage, MemoryStorage, StorageDocument, default_storage_dir, origin_slug};
