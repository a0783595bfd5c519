use assert_cmd::Command;
use std::time::Duration;

fn shim_js_cli() -> Command {
  Command::cargo_bin("shim-js-cli").unwrap()
}

#[test]
fn strip_writes_code_without_comments_to_stdout() {
  let assert = shim_js_cli()
    .timeout(Duration::from_secs(5))
    .arg("strip")
    .write_stdin("let x = 1; // one\n/* two\n */let y = 'é';")
    .assert()
    .success()
    .code(0);

  assert_eq!(
    String::from_utf8_lossy(&assert.get_output().stdout),
    "let x = 1; \n\nlet y = 'é';"
  );
}

#[test]
fn strip_raw_latin1_writes_single_bytes() {
  let assert = shim_js_cli()
    .timeout(Duration::from_secs(5))
    .args(["strip", "--raw", "--encoding", "latin1"])
    .write_stdin("'é'")
    .assert()
    .success();

  assert_eq!(assert.get_output().stdout, b"'\xe9'");
}

#[test]
fn forced_latin1_fails_on_wide_input() {
  let assert = shim_js_cli()
    .timeout(Duration::from_secs(5))
    .args(["strip", "--encoding", "latin1"])
    .write_stdin("'😀'")
    .assert()
    .failure()
    .code(1);

  assert!(assert.get_output().stdout.is_empty());
  assert!(
    String::from_utf8_lossy(&assert.get_output().stderr).contains("U+1F600"),
    "expected overflow error on stderr"
  );
}

#[test]
fn keep_comments_copies_input() {
  let assert = shim_js_cli()
    .timeout(Duration::from_secs(5))
    .args(["strip", "--keep-comments"])
    .write_stdin("a // b")
    .assert()
    .success();

  assert_eq!(String::from_utf8_lossy(&assert.get_output().stdout), "a // b");
}

#[test]
fn split_prints_one_segment_per_line() {
  let assert = shim_js_cli()
    .timeout(Duration::from_secs(5))
    .args(["split", "a,,b"])
    .assert()
    .success();

  assert_eq!(String::from_utf8_lossy(&assert.get_output().stdout), "a\n\nb\n");
}
