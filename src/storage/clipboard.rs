use super::KeyValueStore;
use crate::models::clipboard::ClipboardRecord;

const CLIPBOARD_KEY: &str = "clipboard";

/// Load the persisted clipboard. Absent, unreadable or malformed records
/// reset to the empty clipboard.
pub fn load_clipboard<S: KeyValueStore + ?Sized>(store: &S) -> ClipboardRecord {
    let value = match store.get(CLIPBOARD_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return ClipboardRecord::empty(),
        Err(e) => {
            log::warn!("Clipboard store unreadable, starting empty: {}", e);
            return ClipboardRecord::empty();
        }
    };
    match serde_json::from_value::<ClipboardRecord>(value) {
        Ok(record) => record.normalized(),
        Err(e) => {
            log::warn!("Discarding malformed clipboard record: {}", e);
            ClipboardRecord::empty()
        }
    }
}

/// Replace the persisted clipboard wholesale. The empty clipboard clears the slot.
pub fn persist_clipboard<S: KeyValueStore + ?Sized>(
    store: &S,
    record: &ClipboardRecord,
) -> crate::error::Result<()> {
    if record.is_empty() {
        store.remove(CLIPBOARD_KEY)
    } else {
        store.set(CLIPBOARD_KEY, serde_json::to_value(record)?)
    }
}
