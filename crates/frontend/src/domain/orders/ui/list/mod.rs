pub mod state;

use contracts::domain::orders::{Order, ORDER_SCHEMA};
use contracts::enums::OrderStatus;
use contracts::shared::list_view::Row;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{asks_for_delivery_person, delivery_assignment, filter_options, next_statuses, COLUMNS};
use crate::domain::orders::api;
use crate::shared::components::date_range_filter::DateRangeFilter;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_select::FieldFilters;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::record_table::RecordTable;
use crate::shared::export::export_to_csv;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::icons::icon;
use crate::shared::list_page::{create_list_state, create_view};
use crate::shared::list_utils::SearchInput;
use crate::system::auth::context::use_auth;

/// Who takes the order when it goes out for delivery.
/// `None` means the operator backed out of the status change.
fn ask_delivery_person(order: &Order, status: OrderStatus) -> Option<Option<String>> {
    if !asks_for_delivery_person(status) {
        return Some(None);
    }
    let window = web_sys::window()?;
    let current = order.assigned_delivery_boy.clone().unwrap_or_default();
    let entered = window
        .prompt_with_message_and_default(
            &format!("Delivery person for {}", order.order_number),
            &current,
        )
        .ok()?;
    entered.as_ref()?;
    Some(delivery_assignment(status, entered))
}

#[component]
#[allow(non_snake_case)]
pub fn OrdersList() -> impl IntoView {
    let auth = use_auth();
    let state = create_list_state::<Order>("orders", &ORDER_SCHEMA);
    let list_view = create_view(state);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let guard = FetchGuard::new();

    let fetch = Callback::new(move |_: ()| {
        let ticket = guard.begin();
        let guard = guard.clone();
        set_loading.set(true);
        spawn_local(async move {
            let result = api::fetch_orders().await;
            if !guard.is_current(ticket) {
                log!("Dropping stale orders response #{}", ticket);
                return;
            }
            match result {
                Ok(orders) => {
                    log!("Loaded {} orders", orders.len());
                    state.update(|s| s.set_records(Row::from_items(orders)));
                    set_error.set(None);
                }
                Err(e) => {
                    log!("Failed to fetch orders: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    // Server-side change, then a full re-fetch
    let change_status = Callback::new(move |(order, status): (Order, OrderStatus)| {
        if !auth.is_admin_untracked() {
            return;
        }
        let Some(assignee) = ask_delivery_person(&order, status) else {
            return;
        };
        spawn_local(async move {
            match api::update_order_status(&order.id, status, assignee).await {
                Ok(order) => {
                    log!("Order {} is now {}", order.order_number, order.status.code());
                    fetch.run(());
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    });

    let row_actions = move |row: Row<Order>| {
        let order = row.into_item();
        if !auth.is_admin() {
            return view! { <span></span> }.into_any();
        }
        let next = next_statuses(&order);
        if next.is_empty() {
            return view! { <span class="table__cell--muted">"Closed"</span> }.into_any();
        }
        view! {
            <select
                class="row-action"
                on:change=move |ev| {
                    if let Some(status) = OrderStatus::from_code(&event_target_value(&ev)) {
                        change_status.run((order.clone(), status));
                    }
                }
            >
                <option value="" selected=true>"Change status…"</option>
                {next
                    .into_iter()
                    .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                    .collect_view()}
            </select>
        }
        .into_any()
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
        let filename = format!("orders_{}.csv", chrono::Utc::now().format("%Y%m%d_%H%M%S"));
        if let Err(e) = export_to_csv(&ORDER_SCHEMA, COLUMNS, &rows, &filename) {
            set_error.set(Some(e));
        }
    };

    fetch.run(());

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{icon("orders")}"Orders"</h1>
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
                    placeholder="Order #, customer, email, phone"
                />
                <FieldFilters
                    schema=&ORDER_SCHEMA
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
                schema=&ORDER_SCHEMA
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
