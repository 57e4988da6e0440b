//! Filter → sort → paginate pipeline behind every list view.
//!
//! All functions are pure and total: malformed records never match a filter
//! and sort last, unknown field names in the criteria are ignored, and empty
//! input yields empty output.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use super::criteria::{FilterCriteria, PaginationState, SortCriteria, SortDirection};
use super::record::{FieldDef, FieldKind, FieldValue, Listable, Record, RecordSchema};

/// What a table renderer needs for one refresh
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub visible_records: Vec<T>,
    pub total_filtered_count: usize,
    pub total_pages: usize,
    /// Page actually shown, after clamping
    pub current_page: usize,
}

/// One page window over an already filtered and sorted list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
}

/// Keep the records matching every active clause, in input order
pub fn apply_filters<T: Listable + Clone>(
    schema: &RecordSchema,
    records: &[T],
    criteria: &FilterCriteria,
) -> Vec<T> {
    filter_refs(schema, records, criteria)
        .into_iter()
        .cloned()
        .collect()
}

/// Stable sort by one field
pub fn apply_sort<T: Listable + Clone>(
    schema: &RecordSchema,
    records: &[T],
    criteria: &SortCriteria,
) -> Vec<T> {
    let refs: Vec<&T> = records.iter().collect();
    sort_refs(schema, refs, criteria).into_iter().cloned().collect()
}

/// Slice out the requested page, clamping the page number first
pub fn paginate<T: Clone>(records: &[T], state: &PaginationState) -> Page<T> {
    let total_pages = state.total_pages(records.len());
    let current_page = state.clamped_page(records.len());
    let size = state.effective_page_size();
    let start = (current_page - 1) * size;
    let end = (start + size).min(records.len());
    let items = records.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
    Page {
        items,
        current_page,
        total_pages,
    }
}

/// `paginate(sort(filter(records)))`, cloning only the visible page
pub fn derive_view<T: Listable + Clone>(
    schema: &RecordSchema,
    records: &[T],
    filter: &FilterCriteria,
    sort: Option<&SortCriteria>,
    pagination: &PaginationState,
) -> ListView<T> {
    let ordered = filter_and_sort(schema, records, filter, sort);
    let page = paginate(&ordered, pagination);
    ListView {
        visible_records: page.items.into_iter().cloned().collect(),
        total_filtered_count: ordered.len(),
        total_pages: page.total_pages,
        current_page: page.current_page,
    }
}

/// Filtered and sorted rows without pagination, for exports.
///
/// Goes through the same pipeline as [`derive_view`] so an export always
/// contains exactly what the table shows across all its pages.
pub fn export_rows<T: Listable + Clone>(
    schema: &RecordSchema,
    records: &[T],
    filter: &FilterCriteria,
    sort: Option<&SortCriteria>,
) -> Vec<T> {
    filter_and_sort(schema, records, filter, sort)
        .into_iter()
        .cloned()
        .collect()
}

fn filter_and_sort<'a, T: Listable>(
    schema: &RecordSchema,
    records: &'a [T],
    filter: &FilterCriteria,
    sort: Option<&SortCriteria>,
) -> Vec<&'a T> {
    let filtered = filter_refs(schema, records, filter);
    match sort {
        Some(criteria) => sort_refs(schema, filtered, criteria),
        None => filtered,
    }
}

fn filter_refs<'a, T: Listable>(
    schema: &RecordSchema,
    records: &'a [T],
    criteria: &FilterCriteria,
) -> Vec<&'a T> {
    let matcher = Matcher::compile(schema, criteria);
    records
        .iter()
        .filter(|item| matcher.matches(item.record()))
        .collect()
}

/// Filter clauses resolved against a schema once per call
struct Matcher<'c> {
    needle: Option<String>,
    fields: Vec<(&'c str, &'c str)>,
    date: Option<(&'static str, DateTime<Utc>, DateTime<Utc>)>,
}

impl<'c> Matcher<'c> {
    fn compile(schema: &RecordSchema, criteria: &'c FilterCriteria) -> Self {
        // Clauses naming a field the schema does not know are dropped (fail-open)
        let fields = criteria
            .active_field_filters()
            .filter(|(field, _)| schema.has_field(field))
            .collect();

        let date = match (schema.timestamp_field, criteria.date_range.as_ref()) {
            (Some(field), Some(range)) => range.bounds().map(|(from, to)| (field, from, to)),
            _ => None,
        };

        Self {
            needle: criteria.search_needle(),
            fields,
            date,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        if let Some(needle) = &self.needle {
            if !record.searchable_text().contains(needle.as_str()) {
                return false;
            }
        }

        let fields_ok = self.fields.iter().all(|(field, expected)| {
            record
                .field(field)
                .map(|value| value.matches_exact(expected))
                .unwrap_or(false)
        });
        if !fields_ok {
            return false;
        }

        match &self.date {
            Some((field, from, to)) => record
                .field(field)
                .and_then(FieldValue::as_instant)
                .map(|at| *from <= at && at <= *to)
                .unwrap_or(false),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Instant(DateTime<Utc>),
    Text(String),
    Missing,
}

impl SortKey {
    fn of(def: &FieldDef, value: Option<&FieldValue>) -> Self {
        let Some(value) = value else {
            return Self::Missing;
        };
        let key = match def.kind {
            FieldKind::Number => value.as_number().map(Self::Number),
            FieldKind::Timestamp => value.as_instant().map(Self::Instant),
            FieldKind::Text | FieldKind::Status => Some(Self::Text(value.as_text().to_lowercase())),
        };
        key.unwrap_or(Self::Missing)
    }
}

/// Missing keys go last in both directions; only present-vs-present
/// comparisons are negated for descending order.
fn compare_keys(a: &SortKey, b: &SortKey, direction: SortDirection) -> Ordering {
    let ord = match (a, b) {
        (SortKey::Missing, SortKey::Missing) => return Ordering::Equal,
        (SortKey::Missing, _) => return Ordering::Greater,
        (_, SortKey::Missing) => return Ordering::Less,
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (SortKey::Instant(x), SortKey::Instant(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        // keys of one sort share the schema kind, mixed pairs cannot happen
        _ => Ordering::Equal,
    };
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

fn sort_refs<'a, T: Listable>(
    schema: &RecordSchema,
    records: Vec<&'a T>,
    criteria: &SortCriteria,
) -> Vec<&'a T> {
    let Some(def) = schema.field(&criteria.field) else {
        return records;
    };

    let mut keyed: Vec<(SortKey, &'a T)> = records
        .into_iter()
        .map(|item| (SortKey::of(def, item.record().field(def.id)), item))
        .collect();

    // `sort_by` is stable: equal keys keep their input order in both directions
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, criteria.direction));
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::criteria::DateRange;
    use crate::shared::list_view::record::tests::TEST_SCHEMA;
    use proptest::prelude::*;

    fn record(id: &str, status: &str, amount: f64, date: &str) -> Record {
        Record::new(&TEST_SCHEMA, id)
            .with_field("number", FieldValue::text(format!("ORD-{id}")))
            .with_field("status", FieldValue::status(status))
            .with_field("amount", FieldValue::Number(amount))
            .with_field("date", FieldValue::timestamp(date))
    }

    fn sample() -> Vec<Record> {
        vec![
            record("1", "paid", 100.0, "2024-01-01"),
            record("2", "pending", 50.0, "2024-01-05"),
            record("3", "paid", 200.0, "2024-01-03"),
        ]
    }

    fn ids<T: Listable>(items: &[T]) -> Vec<String> {
        items.iter().map(|i| i.record().id().to_string()).collect()
    }

    #[test]
    fn test_filter_status_sort_amount_descending() {
        let records = sample();
        let filter = FilterCriteria::new().with_field("status", "paid");
        let sort = SortCriteria::descending("amount");
        let view = derive_view(
            &TEST_SCHEMA,
            &records,
            &filter,
            Some(&sort),
            &PaginationState::new(10),
        );
        assert_eq!(ids(&view.visible_records), vec!["3", "1"]);
        assert_eq!(view.total_filtered_count, 2);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_second_page_of_one() {
        let records = sample();
        let filter = FilterCriteria::new().with_field("status", "paid");
        let sort = SortCriteria::descending("amount");
        let view = derive_view(
            &TEST_SCHEMA,
            &records,
            &filter,
            Some(&sort),
            &PaginationState::new(1).with_page(2),
        );
        assert_eq!(ids(&view.visible_records), vec!["1"]);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.current_page, 2);
    }

    #[test]
    fn test_date_range_keeps_inner_day_only() {
        let filter = FilterCriteria::new().with_date_range("2024-01-02", "2024-01-04");
        let kept = apply_filters(&TEST_SCHEMA, &sample(), &filter);
        assert_eq!(ids(&kept), vec!["3"]);
    }

    #[test]
    fn test_date_range_end_is_inclusive_through_end_of_day() {
        let records = vec![
            record("late", "paid", 1.0, "2024-01-04T23:59:59.999Z"),
            record("next", "paid", 1.0, "2024-01-05T00:00:00Z"),
            record("early", "paid", 1.0, "2024-01-02T00:00:00Z"),
        ];
        let filter = FilterCriteria::new().with_date_range("2024-01-02", "2024-01-04");
        assert_eq!(ids(&apply_filters(&TEST_SCHEMA, &records, &filter)), vec!["late", "early"]);
    }

    #[test]
    fn test_page_past_end_falls_back_to_last_page() {
        let records: Vec<Record> = (0..4)
            .map(|i| record(&i.to_string(), "paid", i as f64, "2024-01-01"))
            .collect();
        let view = derive_view(
            &TEST_SCHEMA,
            &records,
            &FilterCriteria::new(),
            None,
            &PaginationState::new(2).with_page(5),
        );
        assert_eq!(view.current_page, 2);
        assert_eq!(ids(&view.visible_records), vec!["2", "3"]);
    }

    #[test]
    fn test_search_matches_haystack_case_insensitive() {
        let sarah = Record::new(&TEST_SCHEMA, "s")
            .with_field("number", FieldValue::text("ORD-2024-001"))
            .with_field("customer", FieldValue::text("Sarah Johnson sarah.j@email.com"));
        let other = Record::new(&TEST_SCHEMA, "o")
            .with_field("customer", FieldValue::text("Mike Ross"));
        let records = vec![sarah, other];
        let kept = apply_filters(&TEST_SCHEMA, &records, &FilterCriteria::new().with_search("Sarah"));
        assert_eq!(ids(&kept), vec!["s"]);
    }

    #[test]
    fn test_search_whitespace_is_part_of_the_term() {
        let records = vec![Record::new(&TEST_SCHEMA, "s").with_field("customer", FieldValue::text("sarah"))];
        let trailing = FilterCriteria::new().with_search("sarah ");
        assert!(apply_filters(&TEST_SCHEMA, &records, &trailing).is_empty());
        let blank = FilterCriteria::new().with_search("   ");
        assert!(apply_filters(&TEST_SCHEMA, &records, &blank).is_empty());
    }

    #[test]
    fn test_missing_field_excludes_record() {
        let bare = Record::new(&TEST_SCHEMA, "bare");
        let records = vec![bare, record("1", "paid", 1.0, "2024-01-01")];
        let by_status = FilterCriteria::new().with_field("status", "paid");
        assert_eq!(ids(&apply_filters(&TEST_SCHEMA, &records, &by_status)), vec!["1"]);
        let by_date = FilterCriteria::new().with_date_range("2023-01-01", "2025-01-01");
        assert_eq!(ids(&apply_filters(&TEST_SCHEMA, &records, &by_date)), vec!["1"]);
    }

    #[test]
    fn test_unknown_filter_field_is_ignored() {
        let filter = FilterCriteria::new().with_field("no_such_field", "x");
        assert_eq!(apply_filters(&TEST_SCHEMA, &sample(), &filter).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<Record> = Vec::new();
        let filter = FilterCriteria::new().with_search("x");
        assert!(apply_filters(&TEST_SCHEMA, &none, &filter).is_empty());
        let view = derive_view(&TEST_SCHEMA, &none, &filter, None, &PaginationState::new(5).with_page(3));
        assert!(view.visible_records.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
    }

    #[test]
    fn test_unparsable_values_sort_last_both_directions() {
        let records = vec![
            record("bad", "paid", f64::NAN, "garbage"),
            record("a", "paid", 1.0, "2024-01-02"),
            Record::new(&TEST_SCHEMA, "none"),
            record("b", "paid", 2.0, "2024-01-01"),
        ];
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let by_amount = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::new("amount", direction));
            assert_eq!(&ids(&by_amount)[2..], ["bad", "none"]);
            let by_date = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::new("date", direction));
            assert_eq!(&ids(&by_date)[2..], ["bad", "none"]);
        }
        let asc = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::ascending("date"));
        assert_eq!(&ids(&asc)[..2], ["b", "a"]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let records = vec![
            record("x", "paid", 10.0, "2024-01-01"),
            record("y", "paid", 20.0, "2024-01-01"),
            record("z", "paid", 10.0, "2024-01-01"),
        ];
        let desc = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::descending("amount"));
        assert_eq!(ids(&desc), vec!["y", "x", "z"]);
        let asc = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::ascending("amount"));
        assert_eq!(ids(&asc), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let make = |id: &str, name: &str| {
            Record::new(&TEST_SCHEMA, id).with_field("customer", FieldValue::text(name))
        };
        let records = vec![make("1", "bob"), make("2", "Alice"), make("3", "carol")];
        let sorted = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::ascending("customer"));
        assert_eq!(ids(&sorted), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_input_order() {
        let sorted = apply_sort(&TEST_SCHEMA, &sample(), &SortCriteria::ascending("nope"));
        assert_eq!(ids(&sorted), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_export_rows_are_filtered_and_sorted_not_paged() {
        let records = sample();
        let rows = export_rows(
            &TEST_SCHEMA,
            &records,
            &FilterCriteria::new().with_field("status", "paid"),
            Some(&SortCriteria::ascending("amount")),
        );
        assert_eq!(ids(&rows), vec!["1", "3"]);
    }

    #[test]
    fn test_half_filled_date_range_does_not_filter() {
        let filter = FilterCriteria {
            date_range: Some(DateRange {
                start: Some("2024-01-04".into()),
                end: None,
            }),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&TEST_SCHEMA, &sample(), &filter).len(), 3);
    }

    const STATUSES: [&str; 3] = ["paid", "pending", "failed"];

    fn arb_records() -> impl Strategy<Value = Vec<Record>> {
        prop::collection::vec((0usize..3, -5i32..5, 1u32..28, "[a-cA-C]{0,4}"), 0..30).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (status, amount, day, name))| {
                        Record::new(&TEST_SCHEMA, i.to_string())
                            .with_field("customer", FieldValue::text(name))
                            .with_field("status", FieldValue::status(STATUSES[status]))
                            .with_field("amount", FieldValue::Number(amount as f64))
                            .with_field("date", FieldValue::timestamp(format!("2024-02-{day:02}")))
                    })
                    .collect()
            },
        )
    }

    fn arb_filter() -> impl Strategy<Value = FilterCriteria> {
        (
            "[a-cA-C]{0,2}",
            prop::option::of(0usize..3),
            prop::option::of((1u32..28, 1u32..28)),
        )
            .prop_map(|(search, status, range)| {
                let mut criteria = FilterCriteria::new().with_search(search);
                if let Some(s) = status {
                    criteria = criteria.with_field("status", STATUSES[s]);
                }
                if let Some((a, b)) = range {
                    criteria = criteria
                        .with_date_range(format!("2024-02-{a:02}"), format!("2024-02-{b:02}"));
                }
                criteria
            })
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(records in arb_records(), filter in arb_filter()) {
            let once = apply_filters(&TEST_SCHEMA, &records, &filter);
            let twice = apply_filters(&TEST_SCHEMA, &once, &filter);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_extra_clause_only_narrows(records in arb_records(), filter in arb_filter(), amount in -5i32..5) {
            let wide = apply_filters(&TEST_SCHEMA, &records, &filter);
            let narrow = apply_filters(&TEST_SCHEMA, &records, &filter.clone().with_field("amount", amount.to_string()));
            let wide_ids = ids(&wide);
            prop_assert!(ids(&narrow).iter().all(|id| wide_ids.contains(id)));
        }

        #[test]
        fn prop_search_ignores_case(records in arb_records(), term in "[a-c]{1,3}") {
            let lower = apply_filters(&TEST_SCHEMA, &records, &FilterCriteria::new().with_search(term.clone()));
            let upper = apply_filters(&TEST_SCHEMA, &records, &FilterCriteria::new().with_search(term.to_uppercase()));
            prop_assert_eq!(lower, upper);
        }

        #[test]
        fn prop_sort_is_stable_permutation(records in arb_records(), descending in any::<bool>()) {
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            let sorted = apply_sort(&TEST_SCHEMA, &records, &SortCriteria::new("amount", direction));
            prop_assert_eq!(sorted.len(), records.len());

            let mut before = ids(&records);
            let mut after = ids(&sorted);
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);

            // ids are input positions, so equal amounts must keep ascending ids
            for pair in sorted.windows(2) {
                let a = pair[0].field("amount").and_then(FieldValue::as_number);
                let b = pair[1].field("amount").and_then(FieldValue::as_number);
                if a == b {
                    let ia: usize = pair[0].id().parse().unwrap();
                    let ib: usize = pair[1].id().parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }

        #[test]
        fn prop_pages_cover_everything_once(records in arb_records(), size in 1usize..7) {
            let total = PaginationState::new(size).total_pages(records.len());
            let mut joined = Vec::new();
            for page in 1..=total {
                let p = paginate(&records, &PaginationState::new(size).with_page(page));
                prop_assert_eq!(p.current_page, page);
                joined.extend(p.items);
            }
            prop_assert_eq!(joined, records);
        }

        #[test]
        fn prop_clamped_page_is_never_empty(records in arb_records(), size in 1usize..7, page in 0usize..20) {
            let p = paginate(&records, &PaginationState::new(size).with_page(page));
            prop_assert!(p.current_page >= 1 && p.current_page <= p.total_pages);
            prop_assert_eq!(p.items.is_empty(), records.is_empty());
        }
    }
}
