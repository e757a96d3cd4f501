use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

use crate::util;
use crate::window::ReportZone;

#[derive(Parser, Debug)]
#[command(
    name = "yt-analytics-report",
    version,
    about = "Export a YouTube channel's daily analytics (last 30 days) into a new spreadsheet",
    long_about = None
)]
pub struct Cli {
  /// Time zone for the report window: local, utc, or an IANA name like Europe/Berlin
  #[arg(long, default_value = "local")]
  pub tz: String,

  /// OAuth access token for the YouTube and Sheets APIs (falls back to `gcloud auth print-access-token`).
  /// Needs the youtube.readonly, yt-analytics.readonly and spreadsheets scopes, plus drive.file to
  /// delete a half-written spreadsheet; a default gcloud token lacks the YouTube scopes.
  #[arg(long, env = "YTAR_ACCESS_TOKEN", hide_env_values = true)]
  pub access_token: Option<String>,

  /// Write the report document as JSON into this directory instead of Google Sheets
  #[arg(long)]
  pub local_out: Option<String>,

  /// Print the connector's authentication declaration and exit
  #[arg(long)]
  pub auth_type: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant, RFC3339 (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub zone: ReportZone,
  pub access_token: Option<String>,
  pub local_out: Option<String>, // absolute path for stability
  pub now: Option<DateTime<Utc>>,
}

/// Parse a `--now-override` value (RFC3339, e.g. 2025-08-15T12:00:00Z).
pub fn parse_now_override(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .map(|dt| dt.with_timezone(&Utc))
      .with_context(|| format!("invalid --now-override {raw:?}, expected RFC3339"))
  })
  .transpose()
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let zone = ReportZone::parse(&cli.tz)?;
  let now = parse_now_override(cli.now_override.as_deref())?;

  let access_token = cli
    .access_token
    .map(|t| t.trim().to_string())
    .filter(|t| !t.is_empty());

  let local_out = cli.local_out.as_deref().map(util::canonicalize_lossy);

  Ok(EffectiveConfig {
    zone,
    access_token,
    local_out,
    now,
  })
}
