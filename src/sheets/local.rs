use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{place_rows, GridRange, SpreadsheetApi, SpreadsheetHandle};
use crate::error::ReportError;

/// On-disk form of a locally written report document.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocalDocument {
  pub id: String,
  pub title: String,
  pub sheet: String,
  pub rows: Vec<Vec<Value>>,
}

/// Writes each document as `<dir>/<id>.json` instead of calling Google Sheets.
pub struct LocalSheetsApi {
  dir: PathBuf,
  now: DateTime<Utc>,
}

impl LocalSheetsApi {
  pub fn new<P: AsRef<Path>>(dir: P, now: DateTime<Utc>) -> Self {
    Self {
      dir: dir.as_ref().to_path_buf(),
      now,
    }
  }

  fn path_for(&self, id: &str) -> PathBuf {
    self.dir.join(format!("{}.json", id))
  }

  fn load(&self, id: &str) -> Result<LocalDocument, ReportError> {
    let path = self.path_for(id);
    let text = std::fs::read_to_string(&path)
      .map_err(|e| ReportError::WriteFailed(format!("reading {}: {e}", path.display())))?;

    serde_json::from_str(&text).map_err(|e| ReportError::WriteFailed(format!("parsing {}: {e}", path.display())))
  }

  fn store(&self, doc: &LocalDocument) -> Result<(), ReportError> {
    let path = self.path_for(&doc.id);
    let text = serde_json::to_string_pretty(doc).map_err(|e| ReportError::WriteFailed(e.to_string()))?;

    std::fs::write(&path, text).map_err(|e| ReportError::WriteFailed(format!("writing {}: {e}", path.display())))
  }
}

/// `YouTube Analytics Report` -> `youtube-analytics-report`.
fn slug(title: &str) -> String {
  let mut out = String::with_capacity(title.len());

  for c in title.chars() {
    if c.is_ascii_alphanumeric() {
      out.push(c.to_ascii_lowercase());
    } else if !out.ends_with('-') && !out.is_empty() {
      out.push('-');
    }
  }

  out.trim_end_matches('-').to_string()
}

impl SpreadsheetApi for LocalSheetsApi {
  fn create_spreadsheet(&self, title: &str) -> Result<SpreadsheetHandle, ReportError> {
    std::fs::create_dir_all(&self.dir)
      .map_err(|e| ReportError::WriteFailed(format!("creating {}: {e}", self.dir.display())))?;

    let base = format!("{}-{}", slug(title), self.now.format("%Y%m%d-%H%M%S"));
    let mut id = base.clone();
    let mut n = 1;

    while self.path_for(&id).exists() {
      id = format!("{}-{}", base, n);
      n += 1;
    }

    let doc = LocalDocument {
      id: id.clone(),
      title: title.to_string(),
      sheet: "Sheet1".into(),
      rows: Vec::new(),
    };
    self.store(&doc)?;

    let path = self.path_for(&id);
    debug!(path = %path.display(), "created local report document");

    Ok(SpreadsheetHandle {
      url: format!("file://{}", path.display()),
      id,
      sheet_title: doc.sheet,
    })
  }

  fn append_row(&self, sheet: &SpreadsheetHandle, row: &[Value]) -> Result<(), ReportError> {
    let mut doc = self.load(&sheet.id)?;
    doc.rows.push(row.to_vec());
    self.store(&doc)
  }

  fn write_range(&self, sheet: &SpreadsheetHandle, range: GridRange, rows: &[Vec<Value>]) -> Result<(), ReportError> {
    let mut doc = self.load(&sheet.id)?;
    place_rows(&mut doc.rows, range, rows);
    self.store(&doc)
  }

  fn discard_spreadsheet(&self, sheet: &SpreadsheetHandle) -> Result<(), ReportError> {
    let path = self.path_for(&sheet.id);
    debug!(path = %path.display(), "removing local report document");

    std::fs::remove_file(&path).map_err(|e| ReportError::WriteFailed(format!("removing {}: {e}", path.display())))
  }
}
