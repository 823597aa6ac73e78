//! Storage crate: key-value persistence for tracker state.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`kv`] – KvStore trait and JSON helpers
//! - [`file_kv`] – FileKvStore (one file per key)
//! - [`sqlite_kv`] – SqliteKvStore (single `kv` table)
//! - [`memory_kv`] – InMemoryKvStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod file_kv;
mod kv;
mod memory_kv;
mod sqlite_kv;
mod sqlite_pool;

pub use error::StorageError;
pub use file_kv::FileKvStore;
pub use kv::{get_json, put_json, KvStore};
pub use memory_kv::InMemoryKvStore;
pub use sqlite_kv::SqliteKvStore;
pub use sqlite_pool::SqlitePoolManager;
