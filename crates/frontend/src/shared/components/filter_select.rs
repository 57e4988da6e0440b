use contracts::shared::list_view::{FilterCriteria, RecordSchema, ALL};
use leptos::prelude::*;

/// Labelled exact-match filter select
#[component]
pub fn FilterSelect(
    #[prop(into)] label: String,
    /// `(value, label)` pairs; the first one is usually "all"
    options: Vec<(String, String)>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-panel__field">
            <span class="filter-panel__label">{label}</span>
            <select
                class="filter-panel__select"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(option_value, option_label)| {
                        let current = option_value.clone();
                        view! {
                            <option value=option_value selected=move || value.get() == current>
                                {option_label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}

/// One `FilterSelect` per filterable field of the schema, in schema order
#[component]
pub fn FieldFilters(
    schema: &'static RecordSchema,
    /// Options of one field, "All" first
    options: fn(&str) -> Vec<(String, String)>,
    #[prop(into)] filter: Signal<FilterCriteria>,
    /// Called with `(field, value)`
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    schema
        .filterable_fields()
        .map(|def| {
            let field = def.id;
            let value = Signal::derive(move || {
                filter.with(|f| {
                    f.field_filters
                        .get(field)
                        .cloned()
                        .unwrap_or_else(|| ALL.to_string())
                })
            });
            view! {
                <FilterSelect
                    label=def.label
                    options=options(field)
                    value=value
                    on_change=Callback::new(move |v: String| on_change.run((field.to_string(), v)))
                />
            }
        })
        .collect_view()
}
