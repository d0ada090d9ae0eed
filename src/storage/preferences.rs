use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::models::settings::Preferences;

pub const DARK_MODE_KEY: &str = "darkMode";

/// Read one preference. Missing or malformed values are `None`.
pub fn load_preference<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)
        .ok()
        .flatten()
        .and_then(|v| serde_json::from_value(v).ok())
}

pub fn persist_preference<T, S>(store: &S, key: &str, value: &T) -> crate::error::Result<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    store.set(key, serde_json::to_value(value)?)
}

pub fn load_preferences<S: KeyValueStore + ?Sized>(store: &S) -> Preferences {
    Preferences {
        dark_mode: load_preference(store, DARK_MODE_KEY).unwrap_or_default(),
    }
}
