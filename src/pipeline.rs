// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one report run: resolve channel, compute window, fetch daily report, write spreadsheet
// role: orchestration
// inputs: YoutubeApi and SpreadsheetApi backends; report zone; reference instant
// outputs: SpreadsheetHandle of the created document, or the ReportError that stopped the run
// side_effects: Exactly one document is created, and only after every prior step succeeded
// invariants:
// - Steps run strictly in order; no retries
// - "No rows" and "no column headers" each emit exactly one warning diagnostic
// errors: Typed ReportError per cause; nothing is swallowed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::ReportError;
use crate::model::{ChannelListResponse, ReportQuery, ReportResponse, ReportTable, METRICS};
use crate::sheets::{SpreadsheetApi, SpreadsheetHandle};
use crate::window::{compute_trailing_window, format_date, ReportWindow, ReportZone, ONE_MONTH_IN_MS};
use crate::writer::write_report;
use crate::youtube::YoutubeApi;

/// Id of the first channel owned by the authenticated user.
pub fn resolve_own_channel_id(api: &dyn YoutubeApi) -> Result<String, ReportError> {
  let body = api.list_own_channels_json()?;
  let parsed: ChannelListResponse =
    serde_json::from_value(body).map_err(|e| ReportError::MalformedResponse(format!("channel list: {e}")))?;

  match parsed.first() {
    Some(channel) => Ok(channel.id.clone()),
    None => {
      debug!("channel list is empty");
      Err(ReportError::NotFound)
    }
  }
}

/// Daily metrics for `channel_id` over `window`, sorted by day.
pub fn fetch_daily_report(
  api: &dyn YoutubeApi,
  channel_id: &str,
  window: &ReportWindow,
  metrics: &[&str],
) -> Result<ReportTable, ReportError> {
  let query = ReportQuery::daily(channel_id, window, metrics);
  let body = api.query_report_json(&query)?;
  let parsed: ReportResponse =
    serde_json::from_value(body).map_err(|e| ReportError::MalformedResponse(format!("analytics report: {e}")))?;

  let rows = match parsed.rows {
    Some(rows) if !rows.is_empty() => rows,
    _ => {
      warn!("No rows returned.");
      return Err(ReportError::NoData);
    }
  };

  let column_headers = match parsed.column_headers {
    Some(headers) if !headers.is_empty() => headers,
    _ => {
      warn!("No columnHeaders returned.");
      return Err(ReportError::MalformedResponse("no columnHeaders returned".into()));
    }
  };

  Ok(ReportTable { column_headers, rows })
}

pub struct ReportPipeline<'a> {
  youtube: &'a dyn YoutubeApi,
  sheets: &'a dyn SpreadsheetApi,
  zone: ReportZone,
  now: DateTime<Utc>,
}

impl<'a> ReportPipeline<'a> {
  pub fn new(youtube: &'a dyn YoutubeApi, sheets: &'a dyn SpreadsheetApi, zone: ReportZone, now: DateTime<Utc>) -> Self {
    Self {
      youtube,
      sheets,
      zone,
      now,
    }
  }

  pub fn run(&self) -> Result<SpreadsheetHandle, ReportError> {
    // Phase 1: whose channel
    let channel_id = resolve_own_channel_id(self.youtube)?;
    debug!(channel_id = %channel_id, "resolved channel");

    // Phase 2: trailing window ending today
    let window = compute_trailing_window(self.now, ONE_MONTH_IN_MS, &self.zone);
    debug!(
      today = %format_date(self.now, &self.zone),
      start = %window.start_date(),
      end = %window.end_date(),
      zone = %self.zone,
      "report window"
    );

    // Phase 3: fetch; nothing is created unless this succeeds
    let table = fetch_daily_report(self.youtube, &channel_id, &window, &METRICS)?;

    // Phase 4: write
    let handle = write_report(self.sheets, &table)?;
    info!("Report spreadsheet created: {}", handle.url);

    Ok(handle)
  }
}
