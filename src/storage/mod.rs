//! Durable storage for the application.
//!
//! Storage is a set of named text slots, the moral equivalent of a browser's
//! local storage. The history store keeps its whole sequence in one slot.

mod sqlite;

pub use sqlite::SqliteStorage;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Key-value slot storage.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot was never written.
    async fn read_slot(&self, name: &str) -> StorageResult<Option<String>>;

    /// Replace a slot's value.
    async fn write_slot(&self, name: &str, value: &str) -> StorageResult<()>;
}
