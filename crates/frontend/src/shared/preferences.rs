//! Per-view list preferences kept in localStorage

use contracts::shared::list_view::{Listable, ListState, SortCriteria};
use serde::{Deserialize, Serialize};
use web_sys::window;

const STORAGE_PREFIX: &str = "list-prefs:";

/// What a list view restores when it opens again
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPreferences {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub sort: Option<SortCriteria>,
    pub page_size: usize,
}

impl ListPreferences {
    pub fn capture<T: Listable + Clone>(state: &ListState<T>) -> Self {
        Self {
            search_term: state.filter().search_term.clone(),
            sort: state.sort().cloned(),
            page_size: state.pagination().page_size,
        }
    }

    pub fn apply<T: Listable + Clone>(&self, state: &mut ListState<T>) {
        state.set_page_size(self.page_size);
        state.set_search_term(self.search_term.clone());
        if self.sort.is_some() {
            state.set_sort(self.sort.clone());
        }
    }
}

fn storage_key(view: &str) -> String {
    format!("{STORAGE_PREFIX}{view}")
}

pub fn load(view: &str) -> Option<ListPreferences> {
    let raw = window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(&storage_key(view)).ok().flatten())?;
    match serde_json::from_str(&raw) {
        Ok(prefs) => Some(prefs),
        Err(e) => {
            log::warn!("Ignoring stored preferences for {}: {}", view, e);
            None
        }
    }
}

pub fn save(view: &str, prefs: &ListPreferences) {
    let Ok(json) = serde_json::to_string(prefs) else {
        return;
    };
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(&storage_key(view), &json);
    }
}
