use crate::encoding::Utf8;
use crate::strip::strip_comments_into;
use crate::strip::strip_comments_latin1;
use crate::strip::strip_comments_latin1_with;
use crate::strip::BlockCommentNewlines;
use crate::strip::StripOptions;
use crate::ShimError;

fn check(code: &str, expected: &str) {
  let out = strip_comments_latin1(code.as_bytes());
  assert_eq!(String::from_utf8_lossy(&out), expected, "input: {code:?}");
}

fn check_per_line(code: &str, expected: &str) {
  let options = StripOptions::new().with_block_comment_newlines(BlockCommentNewlines::PerLine);
  let out = strip_comments_latin1_with(code.as_bytes(), &options);
  assert_eq!(String::from_utf8_lossy(&out), expected, "input: {code:?}");
}

#[test]
fn test_strip_line_comments() {
  check("a // comment\nb", "a \nb");
  check("// only", "");
  check("x//c", "x");
  check("a // comment\r\nb", "a \nb");
  check("a // comment\rb", "a \rb");
}

#[test]
fn test_strip_line_comment_inside_quotes_is_kept() {
  check(
    "\"a // not a comment\" // real comment\nb",
    "\"a // not a comment\" \nb",
  );
  check("'//' + `/* x */`", "'//' + `/* x */`");
}

#[test]
fn test_strip_escaped_quotes_stay_inside_string() {
  check(r#""a\"b" // c"#, r#""a\"b" "#);
  check(r#"'a\\' // c"#, r#"'a\\' "#);
  check(r#""a\'b" // c"#, r#""a\'b" "#);
  check(r#""\n//" x"#, r#""\n//" x"#);
}

#[test]
fn test_strip_block_comments() {
  check("a/**/b", "ab");
  check("a/* x */b", "ab");
  check("a/*\n\n*/b", "a\nb");
  check("a/*\r\n\r\n*/b", "a\nb");
  check("a/* ** */b", "ab");
  check("a/* *\n*/b", "a\nb");
  check("a/* unterminated", "a");
  check("a/*\r*/b", "a\nb");
}

#[test]
fn test_strip_block_comments_per_line() {
  check_per_line("a/*\n\n*/b", "a\n\nb");
  check_per_line("a/*\r\n\r\n*/b", "a\n\nb");
  check_per_line("a/* x */b", "ab");
}

#[test]
fn test_strip_lone_slashes_are_kept() {
  check("a / b", "a / b");
  check("a/", "a/");
  check("/", "/");
  check("a/'//'", "a/'//'");
  check("x = 4/2//half\n", "x = 4/2\n");
}

#[test]
fn test_strip_slash_after_emitted_backslash_is_not_a_comment() {
  check("\\//x", "\\//x");
}

#[test]
fn test_strip_unterminated_string_runs_to_end() {
  check("'abc // d", "'abc // d");
}

#[test]
fn test_strip_utf8_to_utf16_keeps_wide_literals() {
  let mut out: Vec<u16> = Vec::new();
  strip_comments_into(
    &Utf8,
    "s = '€' // ü\n".as_bytes(),
    &mut out,
    &StripOptions::default(),
  )
  .unwrap();
  assert_eq!(String::from_utf16(&out).unwrap(), "s = '€' \n");
}

#[test]
fn test_strip_unicode_line_terminators() {
  let source = "a // c\u{2028}b /*\u{2029}*/c".as_bytes();
  let mut wide: Vec<u16> = Vec::new();
  strip_comments_into(&Utf8, source, &mut wide, &StripOptions::default()).unwrap();
  assert_eq!(String::from_utf16(&wide).unwrap(), "a \u{2028}b \nc");

  let mut narrow: Vec<u8> = Vec::new();
  let err =
    strip_comments_into(&Utf8, source, &mut narrow, &StripOptions::default()).unwrap_err();
  assert_eq!(
    err,
    ShimError::EncodingOverflow {
      code_point: 0x2028,
      offset: 6
    }
  );
}

#[test]
fn test_strip_overflow_checked_inside_comments() {
  let mut out: Vec<u8> = Vec::new();
  let err = strip_comments_into(
    &Utf8,
    "a /* € */ b".as_bytes(),
    &mut out,
    &StripOptions::default(),
  )
  .unwrap_err();
  assert_eq!(
    err,
    ShimError::EncodingOverflow {
      code_point: 0x20AC,
      offset: 5
    }
  );
}
