//! Reactive wrapper around `ListState` shared by the list pages

use contracts::shared::list_view::{ListState, ListView, RecordSchema, Row, ToRecord};
use leptos::prelude::*;

use super::preferences::{self, ListPreferences};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// List state signal of one page, restored from and persisted to localStorage
/// under `view_key` (views over the same schema keep separate preferences)
pub fn create_list_state<T>(
    view_key: &'static str,
    schema: &'static RecordSchema,
) -> RwSignal<ListState<Row<T>>>
where
    T: ToRecord + Clone + Send + Sync + 'static,
{
    let mut state = ListState::new(schema, DEFAULT_PAGE_SIZE);
    if let Some(prefs) = preferences::load(view_key) {
        prefs.apply(&mut state);
    }
    let state = RwSignal::new(state);

    Effect::new(move |_| {
        let prefs = state.with(ListPreferences::capture);
        preferences::save(view_key, &prefs);
    });

    state
}

/// Derived view, recomputed whenever records or criteria change
pub fn create_view<T>(state: RwSignal<ListState<Row<T>>>) -> Memo<ListView<Row<T>>>
where
    T: ToRecord + Clone + PartialEq + Send + Sync + 'static,
{
    Memo::new(move |_| state.with(|s| s.view()))
}
