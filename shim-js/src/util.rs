/// Splits `s` on `delimiter`, keeping empty segments between consecutive delimiters.
///
/// Behaves like reading delimited records from a stream: a trailing delimiter ends the last
/// record rather than starting an empty one, and an empty string has no records.
pub fn str_split(s: &str, delimiter: char) -> Vec<String> {
  let mut tokens: Vec<String> = s.split(delimiter).map(String::from).collect();
  if s.is_empty() || s.ends_with(delimiter) {
    tokens.pop();
  }
  tokens
}
