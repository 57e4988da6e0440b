use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::dashboards::OrderSummaryDashboard;
use crate::domain::orders::ui::list::OrdersList;
use crate::domain::payments::ui::list::PaymentsList;
use crate::shared::icons::icon;
use crate::system::auth::context::{use_auth, AuthProvider};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Orders,
    Payments,
    Reports,
}

impl ActiveView {
    pub fn all() -> [ActiveView; 3] {
        [ActiveView::Orders, ActiveView::Payments, ActiveView::Reports]
    }

    pub fn code(&self) -> &'static str {
        match self {
            ActiveView::Orders => "orders",
            ActiveView::Payments => "payments",
            ActiveView::Reports => "reports",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActiveView::Orders => "Orders",
            ActiveView::Payments => "Payments",
            ActiveView::Reports => "Reports",
        }
    }
}

/// `?view=` part of the page URL
#[derive(Debug, Default, Serialize, Deserialize)]
struct ViewQuery {
    #[serde(default)]
    view: Option<ActiveView>,
}

/// Unknown or missing `view` falls back to orders
fn parse_view(search: &str) -> ActiveView {
    serde_qs::from_str::<ViewQuery>(search.trim_start_matches('?'))
        .ok()
        .and_then(|q| q.view)
        .unwrap_or_default()
}

fn view_search(view: ActiveView) -> String {
    let query = serde_qs::to_string(&ViewQuery { view: Some(view) }).unwrap_or_default();
    format!("?{}", query)
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <Shell />
        </AuthProvider>
    }
}

#[component]
fn Shell() -> impl IntoView {
    let auth = use_auth();
    let active = RwSignal::new(parse_view(&current_search()));

    // Keep the URL in step so a reload lands on the same list
    Effect::new(move |_| {
        let new_url = view_search(active.get());
        if current_search() != new_url {
            if let Some(w) = window() {
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        }
    });

    view! {
        <div class="app">
            <nav class="top-header">
                <div class="top-header__tabs">
                    {ActiveView::all()
                        .into_iter()
                        .map(|v| {
                            view! {
                                <button
                                    class=move || {
                                        if active.get() == v {
                                            "top-header__tab top-header__tab--active"
                                        } else {
                                            "top-header__tab"
                                        }
                                    }
                                    on:click=move |_| active.set(v)
                                >
                                    {icon(v.code())}
                                    {v.title()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="top-header__user">
                    {move || {
                        auth.user()
                            .map(|u| {
                                let role = if u.is_admin { "admin" } else { "viewer" };
                                format!("{} ({})", u.label(), role)
                            })
                            .unwrap_or_default()
                    }}
                </div>
            </nav>
            <main class="app__content">
                {move || match active.get() {
                    ActiveView::Orders => view! { <OrdersList /> }.into_any(),
                    ActiveView::Payments => view! { <PaymentsList /> }.into_any(),
                    ActiveView::Reports => view! { <OrderSummaryDashboard /> }.into_any(),
                }}
            </main>
        </div>
    }
}
