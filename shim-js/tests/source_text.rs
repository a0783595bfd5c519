use shim_js::convert_utf8_to_latin1;
use shim_js::str_split;
use shim_js::strip_comments_latin1;
use shim_js::ShimError;

fn strip_utf8(code: &str) -> String {
  let out = convert_utf8_to_latin1(code.as_bytes(), true).unwrap();
  out.iter().map(|&b| b as char).collect()
}

#[test]
fn quoted_comment_markers_survive_and_trailing_comment_is_removed() {
  assert_eq!(
    strip_utf8("\"a // not a comment\" // real comment\nb"),
    "\"a // not a comment\" \nb"
  );
}

#[test]
fn escaped_quote_does_not_terminate_string() {
  assert_eq!(strip_utf8(r#""a\"b" /* c */"#), r#""a\"b" "#);
  assert_eq!(strip_utf8(r#"`a\`//b` + 1"#), r#"`a\`//b` + 1"#);
}

#[test]
fn block_comment_lines_collapse_to_one_newline() {
  assert_eq!(strip_utf8("a/*\n\n*/b"), "a\nb");
  assert_eq!(strip_utf8("a/*\r\n x \r\n*/b"), "a\nb");
}

#[test]
fn latin1_and_utf8_paths_agree_on_byte_sized_input() {
  let code = "var x = 'ÿ'; // trailing\n/* block */x";
  let latin1: Vec<u8> = code.chars().map(|c| c as u8).collect();
  assert_eq!(
    convert_utf8_to_latin1(code.as_bytes(), true).unwrap(),
    strip_comments_latin1(&latin1)
  );
}

#[test]
fn emoji_overflows_latin1_with_or_without_stripping() {
  let code = "let face = '😀';";
  for strip in [false, true] {
    let err = convert_utf8_to_latin1(code.as_bytes(), strip).unwrap_err();
    assert_eq!(
      err,
      ShimError::EncodingOverflow {
        code_point: 0x1F600,
        offset: 12
      }
    );
  }
  assert_eq!(
    convert_utf8_to_latin1("naïve".as_bytes(), false).unwrap(),
    b"na\xefve"
  );
}

#[test]
fn emoji_inside_a_comment_still_overflows() {
  let err = convert_utf8_to_latin1("x // 😀\n".as_bytes(), true).unwrap_err();
  assert!(err.is_encoding_overflow());
}

#[test]
fn split_keeps_empty_segments() {
  assert_eq!(str_split("a,,b", ','), ["a", "", "b"]);
}
