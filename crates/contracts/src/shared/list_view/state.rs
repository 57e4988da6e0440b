use super::criteria::{DateRange, FilterCriteria, PaginationState, SortCriteria, SortDirection};
use super::engine::{derive_view, export_rows, ListView};
use super::record::{Listable, RecordSchema};

/// Criteria and latest record snapshot of one list view.
///
/// Replacing the records or touching any filter sends the user back to page
/// one; re-sorting keeps the current page. Nothing derived is stored here:
/// [`ListState::view`] runs the engine on the current inputs every time.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    schema: &'static RecordSchema,
    records: Vec<T>,
    filter: FilterCriteria,
    sort: Option<SortCriteria>,
    pagination: PaginationState,
}

impl<T: Listable + Clone> ListState<T> {
    pub fn new(schema: &'static RecordSchema, page_size: usize) -> Self {
        let sort = schema.default_sort.map(|(field, descending)| {
            let direction = if descending {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            SortCriteria::new(field, direction)
        });
        Self {
            schema,
            records: Vec::new(),
            filter: FilterCriteria::default(),
            sort,
            pagination: PaginationState::new(page_size),
        }
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortCriteria> {
        self.sort.as_ref()
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// Swap in a fresh snapshot from the data source
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.reset_page();
    }

    pub fn set_filter(&mut self, filter: FilterCriteria) {
        if filter != self.filter {
            self.filter = filter;
            self.reset_page();
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let mut filter = self.filter.clone();
        filter.search_term = term.into();
        self.set_filter(filter);
    }

    pub fn set_field_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let mut filter = self.filter.clone();
        filter.field_filters.insert(field.into(), value.into());
        self.set_filter(filter);
    }

    pub fn set_date_range(&mut self, start: Option<String>, end: Option<String>) {
        let mut filter = self.filter.clone();
        filter.date_range = match (start, end) {
            (None, None) => None,
            (start, end) => Some(DateRange { start, end }),
        };
        self.set_filter(filter);
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// Re-sorting keeps the user's page
    pub fn set_sort(&mut self, sort: Option<SortCriteria>) {
        self.sort = sort;
    }

    /// Header click: same column flips direction, a new column starts ascending
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.field == field => {
                Some(SortCriteria::new(field, current.direction.toggled()))
            }
            _ => Some(SortCriteria::ascending(field)),
        };
    }

    /// Stored as requested; clamped when the view is derived
    pub fn set_page(&mut self, page: usize) {
        self.pagination.current_page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination = PaginationState::new(page_size);
    }

    pub fn view(&self) -> ListView<T> {
        derive_view(
            self.schema,
            &self.records,
            &self.filter,
            self.sort.as_ref(),
            &self.pagination,
        )
    }

    pub fn export_rows(&self) -> Vec<T> {
        export_rows(self.schema, &self.records, &self.filter, self.sort.as_ref())
    }

    fn reset_page(&mut self) {
        self.pagination.current_page = 1;
    }
}
