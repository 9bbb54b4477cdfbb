//! Application use cases (business logic orchestration).

mod authenticate;

pub use authenticate::*;
