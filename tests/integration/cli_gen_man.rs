#[test]
fn man_page_documents_report_flags() {
  let out = test_support::cmd_bin(test_support::BIN)
    .arg("--gen-man")
    .output()
    .unwrap();
  assert!(out.status.success());

  let page = String::from_utf8_lossy(&out.stdout);
  assert!(page.contains(".TH"), "{}", page);
  assert!(page.contains("yt\\-analytics\\-report"));
  // roff escapes dashes
  for flag in ["\\-\\-tz", "\\-\\-access\\-token", "\\-\\-local\\-out", "\\-\\-auth\\-type"] {
    assert!(page.contains(flag), "missing {flag}");
  }
  assert!(!page.contains("now\\-override"));
  assert!(!page.contains("gen\\-man"));
}
