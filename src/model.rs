// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the API payload shapes (channel list, analytics report) and the query sent to the analytics API
// role: model/types
// outputs: Serde structs mirroring the YouTube Data and Analytics JSON field names; ReportQuery parameters
// invariants: Field names match the upstream camelCase JSON; rows are kept as raw JSON values
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

use crate::window::ReportWindow;

/// Metrics requested for every report, in column order.
pub const METRICS: [&str; 4] = [
  "views",
  "estimatedMinutesWatched",
  "averageViewDuration",
  "subscribersGained",
];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Channel {
  pub id: String,
  #[serde(rename = "contentDetails", skip_serializing_if = "Option::is_none")]
  pub content_details: Option<serde_json::Value>,
}

/// `items` may be absent or `null` when the account owns no channel.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChannelListResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items: Option<Vec<Channel>>,
}

impl ChannelListResponse {
  pub fn first(&self) -> Option<&Channel> {
    self.items.as_deref().and_then(<[Channel]>::first)
  }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnHeader {
  #[serde(default)]
  pub name: String,
  #[serde(rename = "columnType", skip_serializing_if = "Option::is_none")]
  pub column_type: Option<String>,
  #[serde(rename = "dataType", skip_serializing_if = "Option::is_none")]
  pub data_type: Option<String>,
}

/// Raw analytics response; either field may be absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ReportResponse {
  #[serde(rename = "columnHeaders")]
  pub column_headers: Option<Vec<ColumnHeader>>,
  pub rows: Option<Vec<Vec<serde_json::Value>>>,
}

/// A validated report: at least one row and at least one column header.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
  pub column_headers: Vec<ColumnHeader>,
  pub rows: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
  pub ids: String,
  pub start_date: String,
  pub end_date: String,
  pub metrics: String,
  pub dimensions: String,
  pub sort: String,
}

impl ReportQuery {
  /// Per-day report for one channel, sorted by day ascending.
  pub fn daily(channel_id: &str, window: &ReportWindow, metrics: &[&str]) -> Self {
    ReportQuery {
      ids: format!("channel=={}", channel_id),
      start_date: window.start_date(),
      end_date: window.end_date(),
      metrics: metrics.join(","),
      dimensions: "day".into(),
      sort: "day".into(),
    }
  }

  pub fn params(&self) -> Vec<(&'static str, &str)> {
    vec![
      ("ids", self.ids.as_str()),
      ("startDate", self.start_date.as_str()),
      ("endDate", self.end_date.as_str()),
      ("metrics", self.metrics.as_str()),
      ("dimensions", self.dimensions.as_str()),
      ("sort", self.sort.as_str()),
    ]
  }
}
