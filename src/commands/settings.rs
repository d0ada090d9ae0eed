//! View controls and user preferences.

use crate::api::FileService;
use crate::models::listing::{SortKey, TypeFilter};
use crate::storage::preferences::{persist_preference, DARK_MODE_KEY};
use crate::storage::KeyValueStore;

use super::{Outcome, Session};

impl<F: FileService + 'static, K: KeyValueStore> Session<F, K> {
    pub(super) fn set_query(&mut self, query: String) -> Outcome {
        self.query.query = query;
        Outcome::View(self.view())
    }

    pub(super) fn set_type_filter(&mut self, filter: TypeFilter) -> Outcome {
        log::debug!("Type filter set to {}", filter);
        self.query.type_filter = filter;
        Outcome::View(self.view())
    }

    pub(super) fn set_sort_key(&mut self, key: SortKey) -> Outcome {
        log::debug!("Sort order set to {}", key);
        self.query.sort_key = key;
        Outcome::View(self.view())
    }

    /// Flip dark mode and persist it. A failed write keeps the new value for
    /// this session.
    pub(super) fn toggle_dark_mode(&mut self) -> Outcome {
        self.preferences.dark_mode = !self.preferences.dark_mode;
        let dark_mode = self.preferences.dark_mode;
        if let Err(e) = persist_preference(&*self.store, DARK_MODE_KEY, &dark_mode) {
            log::warn!("Failed to persist dark mode preference: {}", e);
        }
        if self.preferences.dark_mode {
            Outcome::toast("Dark mode on")
        } else {
            Outcome::toast("Light mode on")
        }
    }
}
