// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: YouTube Data (channel listing) and YouTube Analytics (report query) backends behind one trait seam
// role: api/youtube
// inputs: Bearer token; env YTAR_TEST_CHANNELS_JSON / YTAR_TEST_REPORT_JSON fixtures for tests
// outputs: Raw JSON bodies for the pipeline to interpret
// side_effects: Network calls to googleapis.com (HTTP backend only)
// invariants:
// - Env fixtures take precedence over the network whenever any fixture variable is set
// - No token and no fixtures is ServiceUnavailable, decided before any request is made
// errors: Transport/status failures -> ServiceUnavailable; unparsable fixtures -> MalformedResponse
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::debug;

use crate::error::ReportError;
use crate::google::{self, TokenSource};
use crate::model::ReportQuery;

const CHANNELS_URL: &str = "https://www.googleapis.com/youtube/v3/channels";
const REPORTS_URL: &str = "https://youtubeanalytics.googleapis.com/v2/reports";

const ENV_CHANNELS: &str = "YTAR_TEST_CHANNELS_JSON";
const ENV_REPORT: &str = "YTAR_TEST_REPORT_JSON";

// --- Trait seam for the YouTube APIs ---
pub trait YoutubeApi {
  /// `channels.list` with `part=id,contentDetails` and `mine=true`.
  fn list_own_channels_json(&self) -> Result<serde_json::Value, ReportError>;
  /// `reports.query` on the analytics API.
  fn query_report_json(&self, query: &ReportQuery) -> Result<serde_json::Value, ReportError>;
}

struct YoutubeHttpApi {
  token: String,
}

impl YoutubeHttpApi {
  fn new(token: String) -> Self {
    Self { token }
  }
}

impl YoutubeApi for YoutubeHttpApi {
  fn list_own_channels_json(&self) -> Result<serde_json::Value, ReportError> {
    let params = [("part", "id,contentDetails"), ("mine", "true")];
    google::get_json(CHANNELS_URL, &params, &self.token)
      .map_err(|e| ReportError::ServiceUnavailable(format!("listing channels: {e}")))
  }

  fn query_report_json(&self, query: &ReportQuery) -> Result<serde_json::Value, ReportError> {
    google::get_json(REPORTS_URL, &query.params(), &self.token)
      .map_err(|e| ReportError::ServiceUnavailable(format!("querying analytics report: {e}")))
  }
}

struct YoutubeEnvApi;

fn fixture_json(key: &str, fallback: serde_json::Value) -> Result<serde_json::Value, ReportError> {
  match std::env::var(key) {
    Ok(s) => serde_json::from_str::<serde_json::Value>(&s)
      .map_err(|e| ReportError::MalformedResponse(format!("fixture {key}: {e}"))),
    Err(_) => Ok(fallback),
  }
}

impl YoutubeApi for YoutubeEnvApi {
  fn list_own_channels_json(&self) -> Result<serde_json::Value, ReportError> {
    fixture_json(ENV_CHANNELS, serde_json::json!({ "items": [] }))
  }

  fn query_report_json(&self, query: &ReportQuery) -> Result<serde_json::Value, ReportError> {
    debug!(ids = %query.ids, start = %query.start_date, end = %query.end_date, "serving report from fixture");
    fixture_json(ENV_REPORT, serde_json::json!({}))
  }
}

pub fn env_wants_mock() -> bool {
  std::env::var(ENV_CHANNELS).is_ok() || std::env::var(ENV_REPORT).is_ok()
}

/// Pick the backend: env fixtures first, then HTTP with a token.
pub fn build_api(tokens: &TokenSource) -> Result<Box<dyn YoutubeApi>, ReportError> {
  if env_wants_mock() {
    debug!("using env fixture YouTube backend");
    return Ok(Box::new(YoutubeEnvApi));
  }

  match tokens.token() {
    Some(t) => Ok(Box::new(YoutubeHttpApi::new(t))),
    None => Err(ReportError::ServiceUnavailable(
      "no access token for the YouTube APIs (set YTAR_ACCESS_TOKEN or log in with gcloud)".into(),
    )),
  }
}
