use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ReportError;
use crate::humanize::humanize;
use crate::model::ReportTable;
use crate::sheets::{GridRange, SpreadsheetApi, SpreadsheetHandle};

pub const REPORT_TITLE: &str = "YouTube Analytics Report";

/// Human-readable header labels, one per column, in column order.
pub fn header_row(table: &ReportTable) -> Vec<String> {
  table.column_headers.iter().map(|h| humanize(&h.name)).collect()
}

/// Create the report document: header row first, then every data row verbatim below it.
///
/// A document whose writes fail is discarded before the error is returned.
pub fn write_report(sheets: &dyn SpreadsheetApi, table: &ReportTable) -> Result<SpreadsheetHandle, ReportError> {
  let handle = sheets.create_spreadsheet(REPORT_TITLE)?;

  if let Err(e) = fill_report(sheets, &handle, table) {
    if let Err(cleanup) = sheets.discard_spreadsheet(&handle) {
      warn!(id = %handle.id, error = %cleanup, "partially written report was left behind");
    }
    return Err(e);
  }

  debug!(id = %handle.id, rows = table.rows.len(), "report written");
  Ok(handle)
}

fn fill_report(sheets: &dyn SpreadsheetApi, handle: &SpreadsheetHandle, table: &ReportTable) -> Result<(), ReportError> {
  let headers = header_row(table);
  let header_values: Vec<Value> = headers.iter().cloned().map(Value::String).collect();
  sheets.append_row(handle, &header_values)?;

  // Row widths are not checked against the header width.
  let range = GridRange {
    row: 2,
    col: 1,
    rows: table.rows.len(),
    cols: headers.len(),
  };
  sheets.write_range(handle, range, &table.rows)
}
