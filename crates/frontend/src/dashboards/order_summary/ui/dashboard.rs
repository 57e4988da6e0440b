use contracts::domain::orders::{Order, ORDER_SCHEMA};
use contracts::shared::list_view::Row;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::order_summary::summary::{summarize, Breakdown, OrderSummary};
use crate::domain::orders::api::fetch_orders;
use crate::domain::orders::ui::list::state::{filter_options, COLUMNS};
use crate::shared::components::date_range_filter::DateRangeFilter;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_select::FieldFilters;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::record_table::RecordTable;
use crate::shared::fetch_guard::FetchGuard;
use crate::shared::icons::icon;
use crate::shared::list_page::{create_list_state, create_view};
use crate::shared::list_utils::SearchInput;

#[component]
fn SummaryCard(#[prop(into)] title: String, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="summary-card">
            <span class="summary-card__title">{title}</span>
            <span class="summary-card__value">{move || value.get()}</span>
        </div>
    }
}

#[component]
fn BreakdownTable(#[prop(into)] title: String, rows: Signal<Vec<Breakdown>>) -> impl IntoView {
    view! {
        <div class="breakdown">
            <h3 class="breakdown__title">{title}</h3>
            <table class="table">
                <thead>
                    <tr>
                        <th class="table__header-cell"></th>
                        <th class="table__header-cell">"Orders"</th>
                        <th class="table__header-cell">"Amount"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|b| {
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{b.label}</td>
                                        <td class="table__cell">{b.count}</td>
                                        <td class="table__cell">{format!("{:.2}", b.amount)}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// Order totals over whatever the filter row selects, with the matching orders below
#[component]
pub fn OrderSummaryDashboard() -> impl IntoView {
    let state = create_list_state::<Order>("reports", &ORDER_SCHEMA);
    let list_view = create_view(state);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let guard = FetchGuard::new();

    let summary = Memo::new(move |_| {
        state.with(|s| {
            let orders: Vec<Order> = s.export_rows().into_iter().map(Row::into_item).collect();
            summarize(&orders)
        })
    });
    let card = move |f: fn(&OrderSummary) -> String| Signal::derive(move || summary.with(f));

    let fetch = Callback::new(move |_: ()| {
        let ticket = guard.begin();
        let guard = guard.clone();
        set_loading.set(true);
        spawn_local(async move {
            let result = fetch_orders().await;
            if !guard.is_current(ticket) {
                return;
            }
            match result {
                Ok(orders) => {
                    log!("Summarizing {} orders", orders.len());
                    state.update(|s| s.set_records(Row::from_items(orders)));
                    set_error.set(None);
                }
                Err(e) => {
                    log!("Failed to fetch orders for reports: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

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

    fetch.run(());

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{icon("reports")}"Reports"</h1>
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

            <div class="summary-cards">
                <SummaryCard title="Orders" value=card(|s| s.order_count.to_string()) />
                <SummaryCard title="Items" value=card(|s| s.item_count.to_string()) />
                <SummaryCard title="Total amount" value=card(|s| format!("{:.2}", s.total_amount)) />
                <SummaryCard
                    title="Average order"
                    value=card(|s| format!("{:.2}", s.average_amount()))
                />
            </div>

            <div class="summary-breakdowns">
                <BreakdownTable
                    title="By status"
                    rows=Signal::derive(move || summary.with(|s| s.by_status.clone()))
                />
                <BreakdownTable
                    title="By service"
                    rows=Signal::derive(move || summary.with(|s| s.by_service.clone()))
                />
            </div>

            <RecordTable
                schema=&ORDER_SCHEMA
                columns=COLUMNS
                rows=Signal::derive(move || list_view.with(|v| v.visible_records.clone()))
                sort=Signal::derive(move || state.with(|s| s.sort().cloned()))
                on_sort=Callback::new(move |field: String| state.update(|s| s.toggle_sort(&field)))
                actions={|_: Row<Order>| view! { <span></span> }}
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
