use contracts::shared::list_query::{ListQuery, ListResponse};
use contracts::shared::list_view::{derive_view, export_rows, Row, ToRecord};

use crate::shared::config::ListConfig;

/// Answer a list request from a full snapshot.
///
/// Without criteria the snapshot goes back as is. Otherwise the shared list
/// engine filters and sorts it, and pages it when the query carries a `page_size`.
pub fn respond<T: ToRecord + Clone>(
    items: Vec<T>,
    query: &ListQuery,
    limits: &ListConfig,
) -> ListResponse<T> {
    if !query.has_criteria() {
        return ListResponse::full(items);
    }

    let schema = T::schema();
    let rows = Row::from_items(items);
    let filter = query.filter_criteria();
    let sort = query.sort_criteria();

    match query.pagination(limits.max_page_size) {
        Some(pagination) => {
            let view = derive_view(schema, &rows, &filter, sort.as_ref(), &pagination);
            ListResponse {
                items: view.visible_records.into_iter().map(Row::into_item).collect(),
                total_count: view.total_filtered_count,
                total_pages: view.total_pages,
                page: view.current_page,
            }
        }
        None => ListResponse::full(
            export_rows(schema, &rows, &filter, sort.as_ref())
                .into_iter()
                .map(Row::into_item)
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::Seed;

    fn orders() -> Vec<contracts::domain::orders::Order> {
        Seed::embedded().unwrap().orders
    }

    #[test]
    fn test_page_alone_returns_whole_filtered_list() {
        let orders = orders();
        let query = ListQuery {
            page: Some(2),
            ..Default::default()
        };
        let response = respond(orders.clone(), &query, &ListConfig::default());
        assert_eq!(response.items.len(), orders.len());
        assert_eq!(response.total_pages, 1);
        assert_eq!(response.page, 1);
    }

    #[test]
    fn test_page_size_pages_the_list() {
        let orders = orders();
        assert!(orders.len() > 4);
        let query = ListQuery {
            page: Some(2),
            page_size: Some(2),
            ..Default::default()
        };
        let response = respond(orders.clone(), &query, &ListConfig::default());
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.page, 2);
        assert_eq!(response.total_count, orders.len());
    }

    #[test]
    fn test_page_size_capped_by_config() {
        let query = ListQuery {
            page_size: Some(50),
            ..Default::default()
        };
        let limits = ListConfig { max_page_size: 3 };
        let response = respond(orders(), &query, &limits);
        assert_eq!(response.items.len(), 3);
    }
}
