//! rembees-core
//!
//! Finance state container and the reports derived from it.
//! Depends on rembees-domain. No CLI, no terminal I/O; persistence goes through
//! the [`storage::KeyValueStore`] seam.

pub mod error;
pub mod export;
pub mod finance_store;
pub mod format;
pub mod seed;
pub mod snapshot;
pub mod storage;
pub mod summary_service;
pub mod transaction_service;

pub use error::CoreError;
pub use export::*;
pub use finance_store::*;
pub use format::*;
pub use storage::{KeyValueStore, MemoryStore};
pub use summary_service::*;
pub use transaction_service::*;
