pub mod state;

use contracts::domain::payments::{Payment, PAYMENT_SCHEMA};
use contracts::shared::list_view::Row;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{filter_options, COLUMNS};
use crate::domain::payments::api;
use crate::shared::components::date_range_filter::DateRangeFilter;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_select::FieldFilters;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::record_table::RecordTable;
use crate::shared::export::export_to_csv;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::icons::icon;
use crate::shared::list_page::{create_list_state, create_view};
use crate::shared::list_utils::{non_blank, SearchInput};
use crate::system::auth::context::use_auth;

/// Asks for confirmation, then for an optional reason.
/// `None` means the operator backed out.
fn ask_refund_reason(payment: &Payment) -> Option<Option<String>> {
    let window = web_sys::window()?;
    let confirmed = window
        .confirm_with_message(&format!(
            "Refund {} ({:.2}) for order {}?",
            payment.transaction_id, payment.amount, payment.order_number
        ))
        .unwrap_or(false);
    if !confirmed {
        return None;
    }
    let reason = window
        .prompt_with_message("Refund reason (optional)")
        .ok()
        .flatten();
    Some(non_blank(reason))
}

#[component]
#[allow(non_snake_case)]
pub fn PaymentsList() -> impl IntoView {
    let auth = use_auth();
    let state = create_list_state::<Payment>("payments", &PAYMENT_SCHEMA);
    let list_view = create_view(state);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let guard = FetchGuard::new();

    let fetch = Callback::new(move |_: ()| {
        let ticket = guard.begin();
        let guard = guard.clone();
        set_loading.set(true);
        spawn_local(async move {
            let result = api::fetch_payments().await;
            if !guard.is_current(ticket) {
                log!("Dropping stale payments response #{}", ticket);
                return;
            }
            match result {
                Ok(payments) => {
                    log!("Loaded {} payments", payments.len());
                    state.update(|s| s.set_records(Row::from_items(payments)));
                    set_error.set(None);
                }
                Err(e) => {
                    log!("Failed to fetch payments: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let refund = Callback::new(move |payment: Payment| {
        if !auth.is_admin_untracked() || !payment.is_refundable() {
            return;
        }
        let Some(reason) = ask_refund_reason(&payment) else {
            return;
        };
        spawn_local(async move {
            match api::refund_payment(&payment.id, reason).await {
                Ok(refunded) => {
                    log!("Refunded {}", refunded.transaction_id);
                    fetch.run(());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let row_actions = move |row: Row<Payment>| {
        let payment = row.into_item();
        if auth.is_admin() && payment.is_refundable() {
            view! {
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| refund.run(payment.clone())
                >
                    "Refund"
                </Button>
            }
            .into_any()
        } else {
            view! { <span></span> }.into_any()
        }
    };

    let date_bound = move |end: bool| {
        Signal::derive(move || {
            state.with(|s| {
                s.filter()
                    .date_range
                    .as_ref()
                    .and_then(|r| if end { r.end.clone() } else { r.start.clone() })
                    .unwrap_or_default()
            })
        })
    };

    let export = move |_| {
        let rows = state.with_untracked(|s| s.export_rows());
        let filename = format!("payments_{}.csv", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
        if let Err(e) = export_to_csv(&PAYMENT_SCHEMA, COLUMNS, &rows, &filename) {
            set_error.set(Some(e));
        }
    };

    fetch.run(());

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{icon("payments")}"Payments"</h1>
                </div>
                <div class="header__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch.run(())
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        "Export CSV"
                    </Button>
                </div>
            </div>

            <div class="filter-panel">
                <SearchInput
                    value=Signal::derive(move || state.with(|s| s.filter().search_term.clone()))
                    on_change=Callback::new(move |term: String| state.update(|s| s.set_search_term(term)))
                    placeholder="Transaction, order #, customer"
                />
                <FieldFilters
                    schema=&PAYMENT_SCHEMA
                    options=filter_options
                    filter=Signal::derive(move || state.with(|s| s.filter().clone()))
                    on_change=Callback::new(move |(field, value): (String, String)| {
                        state.update(|s| s.set_field_filter(field, value))
                    })
                />
                <DateRangeFilter
                    from=date_bound(false)
                    to=date_bound(true)
                    on_change=Callback::new(move |(from, to): (Option<String>, Option<String>)| {
                        state.update(|s| s.set_date_range(from, to))
                    })
                />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| state.update(|s| s.clear_filters())
                >
                    "Clear filters"
                </Button>
            </div>

            {move || error.get().map(|e| view! { <ErrorPanel message=e on_retry=fetch /> })}

            <RecordTable
                schema=&PAYMENT_SCHEMA
                columns=COLUMNS
                rows=Signal::derive(move || list_view.with(|v| v.visible_records.clone()))
                sort=Signal::derive(move || state.with(|s| s.sort().cloned()))
                on_sort=Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)))
                actions=row_actions
            />

            <PaginationControls
                current_page=Signal::derive(move || list_view.with(|v| v.current_page))
                total_pages=Signal::derive(move || list_view.with(|v| v.total_pages))
                total_count=Signal::derive(move || list_view.with(|v| v.total_filtered_count))
                page_size=Signal::derive(move || state.with(|s| s.pagination().page_size))
                on_page_change=Callback::new(move |page| state.update(|s| s.set_page(page)))
                on_page_size_change=Callback::new(move |size| state.update(|s| s.set_page_size(size)))
            />
        </div>
    }
}
