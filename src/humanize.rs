use once_cell::sync::Lazy;
use regex::Regex;

static RE_CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// Turn a machine column name into a label, e.g. `averageViewPercentage` -> `Average View Percentage`.
pub fn humanize(raw: &str) -> String {
  let spaced = RE_CAMEL_BOUNDARY.replace_all(raw, "$1 $2");
  let mut chars = spaced.chars();

  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}
