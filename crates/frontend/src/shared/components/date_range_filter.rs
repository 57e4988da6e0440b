use leptos::prelude::*;

/// From/to day inputs. The range only filters once both ends are set.
#[component]
pub fn DateRangeFilter(
    #[prop(into)] from: Signal<String>,
    #[prop(into)] to: Signal<String>,
    /// Called with `(from, to)`; an empty input is `None`
    on_change: Callback<(Option<String>, Option<String>)>,
) -> impl IntoView {
    let non_empty = |v: String| (!v.trim().is_empty()).then_some(v);

    view! {
        <div class="filter-panel__field">
            <span class="filter-panel__label">"From"</span>
            <input
                type="date"
                class="filter-panel__date"
                prop:value=move || from.get()
                on:change=move |ev| {
                    on_change.run((non_empty(event_target_value(&ev)), non_empty(to.get_untracked())))
                }
            />
            <span class="filter-panel__label">"To"</span>
            <input
                type="date"
                class="filter-panel__date"
                prop:value=move || to.get()
                on:change=move |ev| {
                    on_change.run((non_empty(from.get_untracked()), non_empty(event_target_value(&ev))))
                }
            />
        </div>
    }
}
