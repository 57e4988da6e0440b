//! CSV export of a list view's filtered and sorted rows

use contracts::shared::list_view::{Listable, RecordSchema};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::list_utils::cell_text;

/// Build `;`-separated CSV (with UTF-8 BOM for Excel) over the given columns
pub fn records_to_csv<T: Listable>(
    schema: &RecordSchema,
    columns: &[&str],
    rows: &[T],
) -> String {
    let mut csv = String::from("\u{FEFF}");
    let headers: Vec<String> = columns
        .iter()
        .map(|c| escape_csv_cell(schema.label_of(c)))
        .collect();
    csv.push_str(&headers.join(";"));
    csv.push('\n');

    for row in rows {
        let record = row.record();
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                let kind = schema.field(c).map(|f| f.kind);
                let text = match kind {
                    Some(kind) => cell_text(kind, record.field(c)),
                    None => String::new(),
                };
                escape_csv_cell(&text)
            })
            .collect();
        csv.push_str(&cells.join(";"));
        csv.push('\n');
    }
    csv
}

/// Export rows and trigger a browser download
pub fn export_to_csv<T: Listable>(
    schema: &RecordSchema,
    columns: &[&str],
    rows: &[T],
    filename: &str,
) -> Result<(), String> {
    if rows.is_empty() {
        return Err("Nothing to export".to_string());
    }
    let blob = create_csv_blob(&records_to_csv(schema, columns, rows))?;
    download_blob(&blob, filename)
}

/// Quote a cell that contains the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::orders::ORDER_SCHEMA;
    use contracts::shared::list_view::{FieldValue, Record};

    #[test]
    fn test_csv_uses_labels_and_escapes_cells() {
        let rows = vec![Record::new(&ORDER_SCHEMA, "1")
            .with_field("order_number", FieldValue::text("ORD-2024-001"))
            .with_field("customer_name", FieldValue::text("Smith; \"Jo\""))
            .with_field("status", FieldValue::status("picked_up"))];
        let csv = records_to_csv(&ORDER_SCHEMA, &["order_number", "customer_name", "status"], &rows);
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines[0], "Order #;Customer;Status");
        assert_eq!(lines[1], "ORD-2024-001;\"Smith; \"\"Jo\"\"\";Picked up");
    }
}
