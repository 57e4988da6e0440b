//! List view engine: the filter / sort / paginate pipeline shared by the
//! order, payment and analytics tables.
//!
//! ```text
//! visible = paginate(sort(filter(records, FilterCriteria), SortCriteria), PaginationState)
//! ```

pub mod criteria;
pub mod engine;
pub mod record;
pub mod state;

pub use criteria::{DateRange, FilterCriteria, PaginationState, SortCriteria, SortDirection, ALL};
pub use engine::{apply_filters, apply_sort, derive_view, export_rows, paginate, ListView, Page};
pub use record::{
    parse_timestamp, FieldDef, FieldKind, FieldValue, Listable, Record, RecordSchema, Row, ToRecord,
};
pub use state::ListState;
