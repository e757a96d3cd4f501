// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Spreadsheet sink seam (create document, append row, write rectangular range) plus A1 notation helpers
// role: api/sheets
// inputs: Optional local output directory; bearer token for Google Sheets
// outputs: SpreadsheetHandle (id, url, first sheet title) for the created document
// side_effects: Creates a remote spreadsheet (HTTP backend) or a JSON file (local backend); discards it again on request
// invariants:
// - GridRange coordinates are 1-based, matching spreadsheet row/column numbering
// - a1_column(1) == "A", a1_column(27) == "AA"
// errors: Every sink failure is WriteFailed; missing credentials is ServiceUnavailable
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

mod http;
mod local;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ReportError;
use crate::google::TokenSource;

pub use http::SheetsHttpApi;
pub use local::LocalSheetsApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetHandle {
  pub id: String,
  pub url: String,
  /// Title of the sheet the report is written to.
  pub sheet_title: String,
}

/// A rectangle of cells: top-left corner plus size, all 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
  pub row: usize,
  pub col: usize,
  pub rows: usize,
  pub cols: usize,
}

impl GridRange {
  pub fn to_a1(&self, sheet: &str) -> String {
    a1_range(sheet, self.row, self.col, self.rows, self.cols)
  }
}

pub trait SpreadsheetApi {
  fn create_spreadsheet(&self, title: &str) -> Result<SpreadsheetHandle, ReportError>;
  /// Append one row after the last row that has content.
  fn append_row(&self, sheet: &SpreadsheetHandle, row: &[Value]) -> Result<(), ReportError>;
  fn write_range(&self, sheet: &SpreadsheetHandle, range: GridRange, rows: &[Vec<Value>]) -> Result<(), ReportError>;
  /// Remove a document created by this sink, used when filling it failed.
  fn discard_spreadsheet(&self, sheet: &SpreadsheetHandle) -> Result<(), ReportError>;
}

/// Column letters for a 1-based column index (`1 -> A`, `28 -> AB`).
pub fn a1_column(mut col: usize) -> String {
  let mut letters = Vec::new();

  while col > 0 {
    let rem = (col - 1) % 26;
    letters.push((b'A' + rem as u8) as char);
    col = (col - 1) / 26;
  }

  letters.iter().rev().collect()
}

/// Quoted A1 range such as `'Sheet1'!A2:D31`. Empty ranges collapse to the anchor cell.
pub fn a1_range(sheet: &str, row: usize, col: usize, rows: usize, cols: usize) -> String {
  let quoted = sheet.replace('\'', "''");
  let anchor = format!("{}{}", a1_column(col), row);

  if rows == 0 || cols == 0 {
    return format!("'{}'!{}", quoted, anchor);
  }

  let last_row = row + rows - 1;
  let last_col = col + cols - 1;
  format!("'{}'!{}:{}{}", quoted, anchor, a1_column(last_col), last_row)
}

/// Place `values` into `grid` at `range`, growing the grid with nulls as needed.
pub(crate) fn place_rows(grid: &mut Vec<Vec<Value>>, range: GridRange, values: &[Vec<Value>]) {
  let top = range.row.saturating_sub(1);
  let left = range.col.saturating_sub(1);

  for (i, row) in values.iter().enumerate() {
    let r = top + i;

    if grid.len() <= r {
      grid.resize_with(r + 1, Vec::new);
    }

    let target = &mut grid[r];

    if target.len() < left + row.len() {
      target.resize(left + row.len(), Value::Null);
    }

    for (j, v) in row.iter().enumerate() {
      target[left + j] = v.clone();
    }
  }
}

/// Pick the sink: a local directory when given, otherwise Google Sheets with a token.
pub fn build_api(
  local_out: Option<&str>,
  tokens: &TokenSource,
  now: DateTime<Utc>,
) -> Result<Box<dyn SpreadsheetApi>, ReportError> {
  if let Some(dir) = local_out {
    return Ok(Box::new(LocalSheetsApi::new(dir, now)));
  }

  match tokens.token() {
    Some(t) => Ok(Box::new(SheetsHttpApi::new(t))),
    None => Err(ReportError::ServiceUnavailable(
      "no access token for Google Sheets (set YTAR_ACCESS_TOKEN or pass --local-out)".into(),
    )),
  }
}
