use serde::{Deserialize, Serialize};

use super::list_view::{
    DateRange, FilterCriteria, PaginationState, SortCriteria, SortDirection,
};

/// Field filters carried by the query string, in the order they are applied
const FIELD_FILTERS: [&str; 4] = ["status", "payment_status", "service_type", "method"];

/// Query-string form of list criteria (`GET /api/orders?status=paid&sort_by=...`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_desc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl ListQuery {
    /// True when the request asks for anything beyond the raw snapshot
    pub fn has_criteria(&self) -> bool {
        *self != Self::default()
    }

    pub fn filter_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(search) = &self.search {
            criteria.search_term = search.clone();
        }
        for (name, value) in FIELD_FILTERS.iter().zip([
            &self.status,
            &self.payment_status,
            &self.service_type,
            &self.method,
        ]) {
            if let Some(value) = value {
                criteria.field_filters.insert(name.to_string(), value.clone());
            }
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            criteria.date_range = Some(DateRange {
                start: self.date_from.clone(),
                end: self.date_to.clone(),
            });
        }
        criteria
    }

    pub fn sort_criteria(&self) -> Option<SortCriteria> {
        let field = self.sort_by.as_deref().map(str::trim).filter(|f| !f.is_empty())?;
        let direction = if self.sort_desc.unwrap_or(false) {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Some(SortCriteria::new(field, direction))
    }

    /// `None` unless `page_size` is given (whole list, `page` alone is ignored).
    /// Page size is capped at `max_size`; the page defaults to the first.
    pub fn pagination(&self, max_size: usize) -> Option<PaginationState> {
        let size = self.page_size?.clamp(1, max_size.max(1));
        Some(PaginationState::new(size).with_page(self.page.unwrap_or(1)))
    }
}

/// Response envelope of the list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    /// Matching items before pagination
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl<T> ListResponse<T> {
    /// Unpaginated snapshot: everything on a single page
    pub fn full(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self {
            items,
            total_count,
            total_pages: 1,
            page: 1,
        }
    }
}
