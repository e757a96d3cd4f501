use predicates::prelude::*;

fn local_report_doc(out_dir: &std::path::Path, stdout: &[u8]) -> serde_json::Value {
  let url = String::from_utf8_lossy(stdout).trim().to_string();
  let path = url.strip_prefix("file://").expect("file url on stdout");
  let root = std::fs::canonicalize(out_dir).unwrap();
  assert!(std::path::Path::new(path).starts_with(&root), "{} outside {}", path, root.display());
  serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn fixtures_produce_local_report_document() {
  let empty = test_support::tempdir();
  let out_dir = test_support::tempdir();
  let out_path = out_dir.path().to_str().unwrap();

  let out = test_support::report_cmd(empty.path())
    .env("YTAR_TEST_CHANNELS_JSON", test_support::read_fixture_text("channels.json"))
    .env("YTAR_TEST_REPORT_JSON", test_support::read_fixture_text("report.json"))
    .args([
      "--local-out",
      out_path,
      "--tz",
      "utc",
      "--now-override",
      "2025-08-15T12:00:00Z",
    ])
    .output()
    .unwrap();

  let err = String::from_utf8_lossy(&out.stderr);
  assert!(out.status.success(), "stderr: {}", err);
  assert!(err.contains("Report spreadsheet created: file://"));

  let doc = local_report_doc(out_dir.path(), &out.stdout);
  assert_eq!(doc["id"], "youtube-analytics-report-20250815-120000");
  assert_eq!(doc["title"], "YouTube Analytics Report");
  assert_eq!(doc["sheet"], "Sheet1");

  insta::assert_json_snapshot!(doc["rows"], @r###"
  [
    [
      "Day",
      "Views",
      "Estimated Minutes Watched",
      "Average View Duration",
      "Subscribers Gained"
    ],
    [
      "2025-08-13",
      120,
      300,
      150,
      2
    ],
    [
      "2025-08-14",
      95,
      210,
      133,
      0
    ],
    [
      "2025-08-15",
      143,
      389,
      163,
      5
    ]
  ]
  "###);
}

#[test]
fn two_column_report_rows_pass_through_verbatim() {
  let empty = test_support::tempdir();
  let out_dir = test_support::tempdir();

  let report = serde_json::json!({
    "columnHeaders": [{ "name": "views" }, { "name": "subscribersGained" }],
    "rows": [[10, 1], [20, 0]]
  });

  let out = test_support::report_cmd(empty.path())
    .env("YTAR_TEST_CHANNELS_JSON", r#"{"items":[{"id":"UC123"}]}"#)
    .env("YTAR_TEST_REPORT_JSON", report.to_string())
    .args(["--local-out", out_dir.path().to_str().unwrap(), "--tz", "utc"])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let doc = local_report_doc(out_dir.path(), &out.stdout);
  assert_eq!(
    doc["rows"],
    serde_json::json!([["Views", "Subscribers Gained"], [10, 1], [20, 0]])
  );
}

#[test]
fn stdout_carries_only_the_location() {
  let empty = test_support::tempdir();
  let out_dir = test_support::tempdir();

  test_support::report_cmd(empty.path())
    .env("YTAR_TEST_CHANNELS_JSON", test_support::read_fixture_text("channels.json"))
    .env("YTAR_TEST_REPORT_JSON", test_support::read_fixture_text("report.json"))
    .args(["--local-out", out_dir.path().to_str().unwrap(), "--tz", "Asia/Tokyo"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("file://").and(predicate::str::ends_with(".json\n")));
}

#[test]
fn access_token_env_is_not_required_with_fixtures_and_local_out() {
  let empty = test_support::tempdir();
  let out_dir = test_support::tempdir();

  let report: serde_json::Value = test_support::read_fixture_json("report.json");
  let out = test_support::report_cmd(empty.path())
    .env("YTAR_TEST_CHANNELS_JSON", test_support::read_fixture_text("channels.json"))
    .env("YTAR_TEST_REPORT_JSON", report.to_string())
    .args(["--local-out", out_dir.path().to_str().unwrap()])
    .output()
    .unwrap();
  assert!(out.status.success());

  let written = std::fs::read_dir(out_dir.path()).unwrap().count();
  assert_eq!(written, 1);
}

#[cfg(unix)]
#[test]
fn gcloud_is_not_consulted_when_no_backend_needs_a_token() {
  use std::os::unix::fs::PermissionsExt;

  let bin_dir = test_support::tempdir();
  let out_dir = test_support::tempdir();
  let gcloud = bin_dir.path().join("gcloud");
  std::fs::write(&gcloud, "#!/bin/sh\n: > \"$0.called\"\necho discovered-token\n").unwrap();
  std::fs::set_permissions(&gcloud, std::fs::Permissions::from_mode(0o755)).unwrap();

  let out = test_support::report_cmd(bin_dir.path())
    .env("YTAR_TEST_CHANNELS_JSON", test_support::read_fixture_text("channels.json"))
    .env("YTAR_TEST_REPORT_JSON", test_support::read_fixture_text("report.json"))
    .args(["--local-out", out_dir.path().to_str().unwrap(), "--tz", "utc"])
    .output()
    .unwrap();

  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  assert!(!bin_dir.path().join("gcloud.called").exists());
}
