//! Shared list-view UI pieces: debounced search, sort indicators, cell text

use contracts::enums::{OrderStatus, PaymentMethod, PaymentStatus, ServiceType};
use contracts::shared::list_view::{FieldKind, FieldValue, SortCriteria, ALL};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::date_utils::format_datetime;
use super::fetch_guard::FetchGuard;

/// Debounce delay of the search box
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Search box that reports its value once typing pauses.
///
/// Each keystroke takes a ticket; only the last one still current after the
/// delay reaches `on_change`.
#[component]
pub fn SearchInput(
    /// Committed search term (used for the initial text and highlighting)
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = FetchGuard::new();

    // External resets (e.g. "Clear filters") must reach the text box
    Effect::new(move |_| {
        let committed = value.get();
        if input_value.get_untracked() != committed {
            set_input_value.set(committed);
        }
    });

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let ticket = pending.begin();
        let pending = pending.clone();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if pending.is_current(ticket) {
                on_change.run(new_value);
            }
        });
    };
    let handle_input_change_for_clear = handle_input_change.clone();

    let is_filter_active = move || !value.get().is_empty();

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class="search-input__field"
                class:search-input__field--active=is_filter_active
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                {
                    let clear = handle_input_change_for_clear.clone();
                    view! {
                        <button
                            class="search-input__clear"
                            title="Clear"
                            on:click=move |_| clear(String::new())
                        >
                            {crate::shared::icons::icon("x")}
                        </button>
                    }
                }
            </Show>
        </div>
    }
}

/// `(value, label)` options of a filter select, led by "All"
pub fn options_with_all(
    options: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> Vec<(String, String)> {
    std::iter::once((ALL, "All"))
        .chain(options)
        .map(|(value, label)| (value.to_string(), label.to_string()))
        .collect()
}

/// Prompt answers: blank or whitespace-only counts as nothing entered
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|r| r.trim().to_string()).filter(|r| !r.is_empty())
}

/// Header suffix for the current sort
pub fn get_sort_indicator(sort: Option<&SortCriteria>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => {
            if s.direction.is_ascending() {
                " ▲"
            } else {
                " ▼"
            }
        }
        _ => " ⇅",
    }
}

pub fn get_sort_class(sort: Option<&SortCriteria>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => "sort-indicator sort-indicator--active",
        _ => "sort-indicator",
    }
}

/// Human label for a status-like code (order status, payment status, method, service)
pub fn status_label(code: &str) -> String {
    OrderStatus::from_code(code)
        .map(|s| s.display_name())
        .or_else(|| PaymentStatus::from_code(code).map(|s| s.display_name()))
        .or_else(|| PaymentMethod::from_code(code).map(|m| m.display_name()))
        .or_else(|| ServiceType::from_code(code).map(|s| s.display_name()))
        .map(str::to_string)
        .unwrap_or_else(|| code.replace('_', " "))
}

/// Cell text for a field value; absent fields render as a dash
pub fn cell_text(kind: FieldKind, value: Option<&FieldValue>) -> String {
    let Some(value) = value else {
        return "—".to_string();
    };
    match (kind, value) {
        (FieldKind::Number, FieldValue::Number(n)) if n.fract() == 0.0 => format!("{:.0}", n),
        (FieldKind::Number, FieldValue::Number(n)) => format!("{:.2}", n),
        (FieldKind::Timestamp, v) => format_datetime(&v.as_text()),
        (FieldKind::Status, v) => status_label(&v.as_text()),
        (_, v) => v.as_text(),
    }
}
