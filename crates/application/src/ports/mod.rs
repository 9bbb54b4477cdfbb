//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the client core and the outside
//! world. Each port is a trait implemented by adapters in the infrastructure
//! layer, or by fakes in tests.

mod http_transport;
mod navigator;
mod storage;

pub use http_transport::{HttpTransport, TransportError};
pub use navigator::Navigator;
pub use storage::{KeyValueStorage, StorageError};
