//! Record model shared by every list view (orders, payments).
//!
//! A [`Record`] is a flat bag of typed display fields plus a lower-cased
//! search haystack. The haystack is owned by the record and rebuilt on every
//! field write, so it can never drift from the fields it was built from.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic type of a display field. Decides how values compare and match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Timestamp,
    Status,
}

/// Value of a single display field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Raw ISO-8601 text, parsed on demand
    Timestamp(String),
    Status(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn timestamp(value: impl Into<String>) -> Self {
        Self::Timestamp(value.into())
    }

    pub fn status(value: impl Into<String>) -> Self {
        Self::Status(value.into())
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Number(_) => FieldKind::Number,
            Self::Timestamp(_) => FieldKind::Timestamp,
            Self::Status(_) => FieldKind::Status,
        }
    }

    /// Plain text form, used for display and for the search haystack
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) | Self::Timestamp(s) | Self::Status(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }

    /// Numeric form. `NaN` and non-numeric text yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) | Self::Status(s) | Self::Timestamp(s) => s.trim().parse::<f64>().ok()?,
        };
        (!n.is_nan()).then_some(n)
    }

    /// Instant form. Unparsable text yields `None`.
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(s) | Self::Text(s) => parse_timestamp(s),
            Self::Number(_) | Self::Status(_) => None,
        }
    }

    /// Exact match against a filter value coming from the UI.
    ///
    /// Numbers match on numeric equality (`"100"` matches `100.0`), everything
    /// else on byte-exact string equality.
    pub fn matches_exact(&self, expected: &str) -> bool {
        match self {
            Self::Number(n) => expected
                .trim()
                .parse::<f64>()
                .map(|e| !n.is_nan() && e == *n)
                .unwrap_or(false),
            Self::Text(s) | Self::Timestamp(s) | Self::Status(s) => s == expected,
        }
    }
}

/// Parse an ISO-8601 timestamp or a plain `YYYY-MM-DD` date into a UTC instant.
///
/// Values without an offset are taken as UTC. A bare date means midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Static description of one display field
#[derive(Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Included in the free-text search haystack
    pub searchable: bool,
    /// Offered as an exact-match filter in the view
    pub filterable: bool,
    /// Column header is clickable for sorting
    pub sortable: bool,
}

/// Static description of one record kind (orders, payments, ...)
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
    /// Field the date-range filter is evaluated against
    pub timestamp_field: Option<&'static str>,
    /// Field holding the record's workflow status
    pub status_field: Option<&'static str>,
    /// Sort applied when a view opens: (field, descending)
    pub default_sort: Option<(&'static str, bool)>,
}

impl RecordSchema {
    pub fn field(&self, id: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| f.searchable)
    }

    pub fn filterable_fields(&self) -> impl Iterator<Item = &'static FieldDef> {
        self.fields.iter().filter(|f| f.filterable)
    }

    pub fn label_of(&self, id: &str) -> &'static str {
        self.field(id).map(|f| f.label).unwrap_or("")
    }
}

/// A single listed entity (order or payment) in engine form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: String,
    #[serde(skip)]
    schema: &'static RecordSchema,
    display_fields: BTreeMap<String, FieldValue>,
    searchable_text: String,
}

impl Record {
    pub fn new(schema: &'static RecordSchema, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schema,
            display_fields: BTreeMap::new(),
            searchable_text: String::new(),
        }
    }

    /// Builder form of [`Record::set_field`]
    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.set_field(name, value);
        self
    }

    /// Builder helper for optional source fields: `None` leaves the field absent
    pub fn with_opt_field(self, name: &str, value: Option<FieldValue>) -> Self {
        match value {
            Some(v) => self.with_field(name, v),
            None => self,
        }
    }

    pub fn set_field(&mut self, name: &str, value: FieldValue) {
        self.display_fields.insert(name.to_string(), value);
        self.rebuild_searchable_text();
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        let removed = self.display_fields.remove(name);
        if removed.is_some() {
            self.rebuild_searchable_text();
        }
        removed
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.display_fields.get(name)
    }

    /// Value of the schema's status field, if the record has one
    pub fn status(&self) -> Option<&str> {
        match self.field(self.schema.status_field?)? {
            FieldValue::Status(s) | FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Lower-cased haystack for free-text search
    pub fn searchable_text(&self) -> &str {
        &self.searchable_text
    }

    /// Display text of a field, `None` when the field is absent
    pub fn display(&self, name: &str) -> Option<String> {
        self.field(name).map(FieldValue::as_text)
    }

    fn rebuild_searchable_text(&mut self) {
        let parts: Vec<String> = self
            .schema
            .searchable_fields()
            .filter_map(|def| self.display_fields.get(def.id))
            .map(|v| v.as_text().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self.searchable_text = parts.join(" ");
    }
}

/// Domain types that can be shown in a list view
pub trait ToRecord {
    fn schema() -> &'static RecordSchema;
    fn to_record(&self) -> Record;
}

/// Anything the engine can filter, sort and page
pub trait Listable {
    fn record(&self) -> &Record;
}

impl Listable for Record {
    fn record(&self) -> &Record {
        self
    }
}

/// Typed item paired with its engine record, so views can filter on the
/// record and still act on the typed item (status changes, refunds).
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    pub item: T,
    record: Record,
}

impl<T: ToRecord> Row<T> {
    pub fn new(item: T) -> Self {
        let record = item.to_record();
        Self { item, record }
    }

    pub fn from_items(items: Vec<T>) -> Vec<Self> {
        items.into_iter().map(Self::new).collect()
    }
}

impl<T> Row<T> {
    pub fn into_item(self) -> T {
        self.item
    }
}

impl<T> Listable for Row<T> {
    fn record(&self) -> &Record {
        &self.record
    }
}
