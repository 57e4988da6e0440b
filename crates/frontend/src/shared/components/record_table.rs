use contracts::shared::list_view::{FieldKind, Listable, RecordSchema, SortCriteria};
use leptos::prelude::*;

use crate::shared::list_utils::{cell_text, get_sort_class, get_sort_indicator};

/// Table over already derived rows (one page of a `ListView`).
///
/// Columns come from the record schema; sortable headers report clicks
/// through `on_sort`. `actions` renders the trailing per-row cell.
#[component]
pub fn RecordTable<T, A, AV>(
    schema: &'static RecordSchema,
    columns: &'static [&'static str],
    #[prop(into)] rows: Signal<Vec<T>>,
    #[prop(into)] sort: Signal<Option<SortCriteria>>,
    on_sort: Callback<String>,
    actions: A,
) -> impl IntoView
where
    T: Listable + Clone + Send + Sync + 'static,
    A: Fn(T) -> AV + Clone + Send + Sync + 'static,
    AV: IntoView + 'static,
{
    let colspan = (columns.len() + 1).to_string();
    let header = columns
        .iter()
        .map(|&column| {
            let sortable = schema.field(column).is_some_and(|f| f.sortable);
            let label = schema.label_of(column);
            if sortable {
                view! {
                    <th
                        class="table__header-cell table__header-cell--sortable"
                        on:click=move |_| on_sort.run(column.to_string())
                        title="Sort"
                    >
                        {label}
                        <span class=move || sort.with(|s| get_sort_class(s.as_ref(), column))>
                            {move || sort.with(|s| get_sort_indicator(s.as_ref(), column))}
                        </span>
                    </th>
                }
                .into_any()
            } else {
                view! { <th class="table__header-cell">{label}</th> }.into_any()
            }
        })
        .collect_view();

    view! {
        <div class="table">
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {header}
                        <th class="table__header-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = rows.get();
                        if rows.is_empty() {
                            let colspan = colspan.clone();
                            return view! {
                                <tr>
                                    <td class="table__cell table__cell--empty" colspan=colspan>
                                        "No records match the current filters"
                                    </td>
                                </tr>
                            }
                            .into_any();
                        }
                        let actions = actions.clone();
                        rows.into_iter()
                            .map(|row| {
                                let record = row.record();
                                let cells = columns
                                    .iter()
                                    .map(|&column| {
                                        let kind = schema.field(column).map(|f| f.kind);
                                        let text = kind
                                            .map(|k| cell_text(k, record.field(column)))
                                            .unwrap_or_default();
                                        let class = match record.field(column).map(|v| v.kind()) {
                                            Some(FieldKind::Status) => format!(
                                                "table__cell badge badge--{}",
                                                record.display(column).unwrap_or_default()
                                            ),
                                            Some(FieldKind::Number) => {
                                                "table__cell table__cell--number".to_string()
                                            }
                                            _ => "table__cell".to_string(),
                                        };
                                        view! { <td class=class>{text}</td> }
                                    })
                                    .collect_view();
                                let key = record.id().to_string();
                                view! {
                                    <tr class="table__row" data-id=key>
                                        {cells}
                                        <td class="table__cell table__cell--actions">{actions(row.clone())}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}
