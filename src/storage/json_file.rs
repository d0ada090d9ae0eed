//! File-backed `KeyValueStore`.
//!
//! All slots live in one JSON object on disk. Every write replaces the whole
//! file through a temporary sibling and a rename, so a reader never sees a
//! torn record. A missing or corrupt file opens as an empty store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};

use super::KeyValueStore;
use crate::error::AppError;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    slots: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let slots = load_slots(&path);
        Self {
            path,
            slots: Mutex::new(slots),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slots(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn save(&self, slots: &Map<String, Value>) -> crate::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::Storage(format!("create {}: {}", parent.display(), e)))?;
            }
        }
        let content = serde_json::to_vec_pretty(slots)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .map_err(|e| AppError::Storage(format!("write {}: {}", tmp.display(), e)))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| AppError::Storage(format!("replace {}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

fn load_slots(path: &Path) -> Map<String, Value> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(_) => return Map::new(),
    };
    match serde_json::from_slice::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        _ => {
            log::warn!(
                "Ignoring unreadable store file {}; starting empty",
                path.display()
            );
            Map::new()
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> crate::error::Result<Option<Value>> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> crate::error::Result<()> {
        let mut slots = self.slots();
        slots.insert(key.to_string(), value);
        self.save(&slots)
    }

    fn remove(&self, key: &str) -> crate::error::Result<()> {
        let mut slots = self.slots();
        if slots.remove(key).is_some() {
            self.save(&slots)?;
        }
        Ok(())
    }
}
