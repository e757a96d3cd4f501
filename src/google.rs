// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Shared Google REST plumbing (bearer-token discovery, JSON GET/POST/PUT, DELETE) for the YouTube and Sheets backends
// role: api/google
// inputs: Access token from flag/env YTAR_ACCESS_TOKEN; optional `gcloud` CLI for token fallback
// outputs: serde_json::Value bodies or ureq errors for callers to classify
// side_effects: Network calls to *.googleapis.com; spawns `gcloud` subprocess when needed
// invariants:
// - Never panic; transport and status failures come back as Err
// - Token discovery prefers the explicit token, then `gcloud auth print-access-token`, and only runs on demand
// errors: Returned raw; each backend maps them onto its own ReportError variant
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::unsync::OnceCell;
use serde::Serialize;

const USER_AGENT: &str = "yt-analytics-report";

/// Access token that is only discovered when a backend asks for it.
pub struct TokenSource {
  explicit: Option<String>,
  discover: fn() -> Option<String>,
  discovered: OnceCell<Option<String>>,
}

impl TokenSource {
  pub fn new(explicit: Option<String>) -> Self {
    Self::with_discovery(explicit, discover_access_token)
  }

  pub fn with_discovery(explicit: Option<String>, discover: fn() -> Option<String>) -> Self {
    Self {
      explicit,
      discover,
      discovered: OnceCell::new(),
    }
  }

  /// The explicit token, else the discovered one. Discovery runs at most once.
  pub fn token(&self) -> Option<String> {
    if let Some(t) = &self.explicit {
      return Some(t.clone());
    }

    self.discovered.get_or_init(self.discover).clone()
  }
}

/// Discover an access token via `gcloud auth print-access-token` if that CLI is available.
fn discover_access_token() -> Option<String> {
  let output = std::process::Command::new("gcloud")
    .args(["auth", "print-access-token"])
    .output()
    .ok()?;

  if !output.status.success() {
    return None;
  }

  let t = String::from_utf8_lossy(&output.stdout).trim().to_string();

  if t.is_empty() {
    None
  } else {
    Some(t)
  }
}

fn agent() -> ureq::Agent {
  ureq::Agent::config_builder().build().into()
}

fn bearer(token: &str) -> String {
  format!("Bearer {}", token)
}

pub fn get_json(url: &str, params: &[(&str, &str)], token: &str) -> Result<serde_json::Value, ureq::Error> {
  let mut req = agent()
    .get(url)
    .header("Accept", "application/json")
    .header("User-Agent", USER_AGENT)
    .header("Authorization", &bearer(token));

  for (k, v) in params {
    req = req.query(*k, *v);
  }

  req.call()?.body_mut().read_json::<serde_json::Value>()
}

pub fn post_json<B: Serialize>(
  url: &str,
  params: &[(&str, &str)],
  token: &str,
  body: &B,
) -> Result<serde_json::Value, ureq::Error> {
  let mut req = agent()
    .post(url)
    .header("Accept", "application/json")
    .header("User-Agent", USER_AGENT)
    .header("Authorization", &bearer(token));

  for (k, v) in params {
    req = req.query(*k, *v);
  }

  req.send_json(body)?.body_mut().read_json::<serde_json::Value>()
}

pub fn put_json<B: Serialize>(
  url: &str,
  params: &[(&str, &str)],
  token: &str,
  body: &B,
) -> Result<serde_json::Value, ureq::Error> {
  let mut req = agent()
    .put(url)
    .header("Accept", "application/json")
    .header("User-Agent", USER_AGENT)
    .header("Authorization", &bearer(token));

  for (k, v) in params {
    req = req.query(*k, *v);
  }

  req.send_json(body)?.body_mut().read_json::<serde_json::Value>()
}

pub fn delete(url: &str, token: &str) -> Result<(), ureq::Error> {
  agent()
    .delete(url)
    .header("User-Agent", USER_AGENT)
    .header("Authorization", &bearer(token))
    .call()?;

  Ok(())
}
