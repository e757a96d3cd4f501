use serde_json::{json, Value};
use tracing::debug;

use super::{a1_range, GridRange, SpreadsheetApi, SpreadsheetHandle};
use crate::error::ReportError;
use crate::ext::serde_json::JsonFetch;
use crate::google;

const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
// Sheets has no delete; spreadsheets are Drive files.
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Google Sheets v4 REST sink.
pub struct SheetsHttpApi {
  token: String,
}

impl SheetsHttpApi {
  pub fn new(token: String) -> Self {
    Self { token }
  }
}

/// `.../spreadsheets/{id}/values/{range}{suffix}` with the range percent-encoded as one path segment.
fn values_url(spreadsheet_id: &str, range: &str, suffix: &str) -> Result<String, ReportError> {
  let mut url = url::Url::parse(SHEETS_URL).map_err(|e| ReportError::WriteFailed(e.to_string()))?;
  let target = format!("{}{}", range, suffix);

  url
    .path_segments_mut()
    .map_err(|_| ReportError::WriteFailed("sheets endpoint cannot take path segments".into()))?
    .extend([spreadsheet_id, "values", target.as_str()]);

  Ok(url.to_string())
}

fn drive_file_url(spreadsheet_id: &str) -> Result<String, ReportError> {
  let mut url = url::Url::parse(DRIVE_FILES_URL).map_err(|e| ReportError::WriteFailed(e.to_string()))?;

  url
    .path_segments_mut()
    .map_err(|_| ReportError::WriteFailed("drive endpoint cannot take path segments".into()))?
    .push(spreadsheet_id);

  Ok(url.to_string())
}

/// Pull the handle out of a `spreadsheets.create` response.
fn handle_from_create(v: &Value) -> Result<SpreadsheetHandle, ReportError> {
  let id = v
    .fetch("spreadsheetId")
    .to::<String>()
    .ok_or_else(|| ReportError::WriteFailed("create response has no spreadsheetId".into()))?;
  let url = v
    .fetch("spreadsheetUrl")
    .to::<String>()
    .unwrap_or_else(|| format!("https://docs.google.com/spreadsheets/d/{}/edit", id));
  let sheet_title = v
    .fetch("sheets.0.properties.title")
    .to::<String>()
    .unwrap_or_else(|| "Sheet1".to_string());

  Ok(SpreadsheetHandle { id, url, sheet_title })
}

impl SpreadsheetApi for SheetsHttpApi {
  fn create_spreadsheet(&self, title: &str) -> Result<SpreadsheetHandle, ReportError> {
    let body = json!({ "properties": { "title": title } });
    let resp = google::post_json(SHEETS_URL, &[], &self.token, &body)
      .map_err(|e| ReportError::WriteFailed(format!("creating spreadsheet: {e}")))?;

    handle_from_create(&resp)
  }

  fn append_row(&self, sheet: &SpreadsheetHandle, row: &[Value]) -> Result<(), ReportError> {
    let range = a1_range(&sheet.sheet_title, 1, 1, 1, row.len());
    let url = values_url(&sheet.id, &range, ":append")?;
    let body = json!({ "majorDimension": "ROWS", "values": [row] });
    let params = [("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")];

    debug!(range = %range, "appending row");
    google::post_json(&url, &params, &self.token, &body)
      .map_err(|e| ReportError::WriteFailed(format!("appending row: {e}")))?;

    Ok(())
  }

  fn write_range(&self, sheet: &SpreadsheetHandle, range: GridRange, rows: &[Vec<Value>]) -> Result<(), ReportError> {
    let a1 = range.to_a1(&sheet.sheet_title);
    let url = values_url(&sheet.id, &a1, "")?;
    let body = json!({ "range": a1, "majorDimension": "ROWS", "values": rows });
    let params = [("valueInputOption", "RAW")];

    debug!(range = %a1, rows = rows.len(), "writing range");
    google::put_json(&url, &params, &self.token, &body)
      .map_err(|e| ReportError::WriteFailed(format!("writing {a1}: {e}")))?;

    Ok(())
  }

  fn discard_spreadsheet(&self, sheet: &SpreadsheetHandle) -> Result<(), ReportError> {
    let url = drive_file_url(&sheet.id)?;

    debug!(id = %sheet.id, "deleting spreadsheet");
    google::delete(&url, &self.token).map_err(|e| ReportError::WriteFailed(format!("deleting spreadsheet: {e}")))
  }
}
