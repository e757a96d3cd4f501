use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use std::fmt;

use crate::error::ReportError;

// Report window types live here to keep the pipeline focused.

/// "One month" as a fixed span of 30 days rather than calendar-month arithmetic.
pub const ONE_MONTH_IN_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// Zone in which calendar dates for the report window are taken.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReportZone {
  Local,
  Utc,
  Named(chrono_tz::Tz),
}

impl ReportZone {
  /// Accepts `local`, `utc` (any case) or an IANA zone name such as `Europe/Berlin`.
  pub fn parse(name: &str) -> Result<Self, ReportError> {
    let name = name.trim();

    if name.eq_ignore_ascii_case("local") {
      return Ok(ReportZone::Local);
    }

    if name.eq_ignore_ascii_case("utc") {
      return Ok(ReportZone::Utc);
    }

    name
      .parse::<chrono_tz::Tz>()
      .map(ReportZone::Named)
      .map_err(|_| ReportError::Configuration(format!("unknown time zone {name:?}")))
  }

  /// Calendar date of `instant` as seen from this zone.
  pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
    match self {
      ReportZone::Local => instant.with_timezone(&Local).date_naive(),
      ReportZone::Utc => instant.date_naive(),
      ReportZone::Named(tz) => instant.with_timezone(tz).date_naive(),
    }
  }
}

impl fmt::Display for ReportZone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReportZone::Local => f.write_str("local"),
      ReportZone::Utc => f.write_str("utc"),
      ReportZone::Named(tz) => f.write_str(tz.name()),
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ReportWindow {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

impl ReportWindow {
  pub fn start_date(&self) -> String {
    ymd(self.start)
  }

  pub fn end_date(&self) -> String {
    ymd(self.end)
  }
}

fn ymd(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// Render the calendar date of `instant` in `zone` as `YYYY-MM-DD`.
pub fn format_date(instant: DateTime<Utc>, zone: &ReportZone) -> String {
  ymd(zone.date_of(instant))
}

/// Earliest start instant that every zone can still turn into a calendar date.
///
/// Zone offsets stay well under a day, so one day of headroom above
/// `MIN_UTC` keeps the local conversion inside chrono's range.
fn earliest_start() -> DateTime<Utc> {
  DateTime::<Utc>::MIN_UTC + TimeDelta::days(1)
}

/// Window of calendar dates covering `duration_ms` before `reference` up to `reference`.
///
/// Spans reaching past the representable range clamp to [`earliest_start`],
/// so the start date never comes after the end date in any zone.
pub fn compute_trailing_window(reference: DateTime<Utc>, duration_ms: u64, zone: &ReportZone) -> ReportWindow {
  let span = i64::try_from(duration_ms)
    .ok()
    .and_then(TimeDelta::try_milliseconds)
    .unwrap_or(TimeDelta::MAX);
  let start = reference
    .checked_sub_signed(span)
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
    .max(earliest_start());

  ReportWindow {
    start: zone.date_of(start),
    end: zone.date_of(reference),
  }
}
