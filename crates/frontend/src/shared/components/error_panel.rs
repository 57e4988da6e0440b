use leptos::prelude::*;
use thaw::*;

/// Inline fetch error with a Retry button
#[component]
pub fn ErrorPanel(#[prop(into)] message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="warning-box warning-box--error">
            <span class="warning-box__icon">"⚠"</span>
            <span class="warning-box__text">{message}</span>
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_retry.run(())
            >
                "Retry"
            </Button>
        </div>
    }
}
