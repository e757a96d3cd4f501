// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failure kinds for the report pipeline and its service backends
// role: errors
// outputs: ReportError, one variant per distinguishable reason a run produced no spreadsheet
// invariants:
// - Every pipeline step maps its failure onto exactly one variant; nothing panics
// - No variant is fatal to the process; callers may simply re-run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
  /// A required external capability is missing (no credentials, backend unreachable).
  #[error("service unavailable: {0}")]
  ServiceUnavailable(String),

  /// The current user owns no channel.
  #[error("no channel found for the current user")]
  NotFound,

  /// The analytics query returned zero rows.
  #[error("analytics report returned no rows")]
  NoData,

  /// The analytics query returned something we cannot tabulate.
  #[error("malformed analytics response: {0}")]
  MalformedResponse(String),

  #[error("configuration error: {0}")]
  Configuration(String),

  #[error("writing report failed: {0}")]
  WriteFailed(String),
}
