use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::parse_timestamp;

/// Field filter value meaning "no constraint on this field"
pub const ALL: &str = "all";

/// Search / field-filter / date-range constraints of one view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub field_filters: BTreeMap<String, String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    /// Lower-cased search needle, taken as typed; `None` only for an empty term
    pub fn search_needle(&self) -> Option<String> {
        (!self.search_term.is_empty()).then(|| self.search_term.to_lowercase())
    }

    /// Field filters that actually constrain (not `"all"`, not blank)
    pub fn active_field_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_filters
            .iter()
            .filter(|(_, v)| !v.is_empty() && v.as_str() != ALL)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when no clause would restrict anything
    pub fn is_empty(&self) -> bool {
        self.search_needle().is_none()
            && self.active_field_filters().next().is_none()
            && self.date_range.as_ref().and_then(DateRange::bounds).is_none()
    }
}

/// Inclusive day range, `YYYY-MM-DD` on both ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Instant bounds `[start 00:00:00.000, end 23:59:59.999]`.
    ///
    /// `None` unless both ends are set and parse; a half-filled range does not
    /// constrain anything.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_day(self.start.as_deref()?)?;
        let end = parse_day(self.end.as_deref()?)?;
        let from = start.and_hms_milli_opt(0, 0, 0, 0)?.and_utc();
        let to = end.and_hms_milli_opt(23, 59, 59, 999)?.and_utc();
        Some((from, to))
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw).map(|t| t.date_naive()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriteria {
    pub field: String,
    pub direction: SortDirection,
}

impl SortCriteria {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Page window of a view. `current_page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_size: usize,
    pub current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    /// Zero page size is treated as one
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// `max(1, ceil(count / page_size))`
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.effective_page_size()).max(1)
    }

    /// `current_page` clamped into `[1, total_pages(count)]`
    pub fn clamped_page(&self, count: usize) -> usize {
        self.current_page.clamp(1, self.total_pages(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_field_filters_skip_all_and_blank() {
        let criteria = FilterCriteria::new()
            .with_field("status", "paid")
            .with_field("method", ALL)
            .with_field("service_type", "");
        let active: Vec<_> = criteria.active_field_filters().collect();
        assert_eq!(active, vec![("status", "paid")]);
        assert!(!criteria.is_empty());
        assert!(FilterCriteria::new().with_search("").is_empty());
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        assert_eq!(FilterCriteria::new().with_search("   ").search_needle().as_deref(), Some("   "));
        assert_eq!(
            FilterCriteria::new().with_search("Sarah ").search_needle().as_deref(),
            Some("sarah ")
        );
        assert!(!FilterCriteria::new().with_search(" ").is_empty());
    }

    #[test]
    fn test_date_range_bounds_are_inclusive_days() {
        let (from, to) = DateRange::new("2024-01-02", "2024-01-04").bounds().unwrap();
        assert_eq!(from.to_rfc3339(), "2024-01-02T00:00:00+00:00");
        assert_eq!(to.format("%Y-%m-%d %H:%M:%S%.3f").to_string(), "2024-01-04 23:59:59.999");
    }

    #[test]
    fn test_half_open_or_invalid_range_has_no_bounds() {
        let half = DateRange {
            start: Some("2024-01-02".into()),
            end: None,
        };
        assert!(half.bounds().is_none());
        assert!(DateRange::new("2024-13-45", "2024-01-04").bounds().is_none());
        assert!(DateRange::new("", "2024-01-04").bounds().is_none());
    }

    #[test]
    fn test_pagination_clamping() {
        let state = PaginationState::new(10).with_page(5);
        assert_eq!(state.total_pages(0), 1);
        assert_eq!(state.total_pages(10), 1);
        assert_eq!(state.total_pages(11), 2);
        assert_eq!(state.clamped_page(11), 2);
        assert_eq!(PaginationState::new(10).with_page(0).clamped_page(30), 1);
        assert_eq!(PaginationState::new(0).effective_page_size(), 1);
    }

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
        assert!(SortDirection::Descending.toggled().is_ascending());
    }
}
