//! Local persistence layer.
//!
//! `KeyValueStore` is the injected durability collaborator: named slots holding
//! JSON values, each written wholesale. The clipboard record and user preferences
//! live in it; the client configuration lives in its own JSON file.

use std::sync::Arc;

use serde_json::Value;

pub mod clipboard;
pub mod json_file;
pub mod memory;
pub mod preferences;
pub mod settings;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub trait KeyValueStore: Send + Sync {
    /// Read a slot. A missing slot is `Ok(None)`.
    fn get(&self, key: &str) -> crate::error::Result<Option<Value>>;

    /// Replace a slot's value wholesale.
    fn set(&self, key: &str, value: Value) -> crate::error::Result<()>;

    /// Clear a slot. Clearing a missing slot is not an error.
    fn remove(&self, key: &str) -> crate::error::Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> crate::error::Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> crate::error::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> crate::error::Result<()> {
        (**self).remove(key)
    }
}
