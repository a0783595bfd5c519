use crate::error::ShimError;
use crate::error::ShimResult;
use crate::strip::StripOptions;
use crate::utf8::convert_utf8_to_latin1_with;
use crate::utf8::convert_utf8_to_utf16_with;
use serde::Deserialize;
use serde::Serialize;

/// Which string representation loaded source text should end up in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetEncoding {
  /// Latin-1 when every code point fits, UTF-16 otherwise.
  #[default]
  Auto,
  Latin1,
  Utf16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
  pub strip_comments: bool,
  pub strip: StripOptions,
  pub encoding: TargetEncoding,
}

impl LoadOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_strip_comments(mut self, strip_comments: bool) -> Self {
    self.strip_comments = strip_comments;
    self
  }

  pub fn with_strip_options(mut self, strip: StripOptions) -> Self {
    self.strip = strip;
    self
  }

  pub fn with_encoding(mut self, encoding: TargetEncoding) -> Self {
    self.encoding = encoding;
    self
  }

  fn strip(&self) -> Option<&StripOptions> {
    self.strip_comments.then_some(&self.strip)
  }
}

/// Source text in one of the engine's two string representations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceString {
  Latin1(Vec<u8>),
  Utf16(Vec<u16>),
}

impl SourceString {
  /// Loads UTF-8 source text, trying the narrow representation first when allowed.
  pub fn from_utf8(input: &[u8], options: &LoadOptions) -> ShimResult<SourceString> {
    match options.encoding {
      TargetEncoding::Latin1 => {
        convert_utf8_to_latin1_with(input, options.strip()).map(SourceString::Latin1)
      }
      TargetEncoding::Utf16 => {
        convert_utf8_to_utf16_with(input, options.strip()).map(SourceString::Utf16)
      }
      TargetEncoding::Auto => match convert_utf8_to_latin1_with(input, options.strip()) {
        Ok(narrow) => Ok(SourceString::Latin1(narrow)),
        Err(ShimError::EncodingOverflow { code_point, offset }) => {
          tracing::debug!(
            code_point,
            offset,
            "source does not fit Latin-1, falling back to UTF-16"
          );
          convert_utf8_to_utf16_with(input, options.strip()).map(SourceString::Utf16)
        }
        Err(err) => Err(err),
      },
    }
  }

  pub fn is_latin1(&self) -> bool {
    matches!(self, SourceString::Latin1(_))
  }

  /// Length in code units.
  pub fn len(&self) -> usize {
    match self {
      SourceString::Latin1(units) => units.len(),
      SourceString::Utf16(units) => units.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Re-encodes as UTF-8. Lone surrogates become U+FFFD.
  pub fn to_string_lossy(&self) -> String {
    match self {
      SourceString::Latin1(units) => units.iter().map(|&b| b as char).collect(),
      SourceString::Utf16(units) => String::from_utf16_lossy(units),
    }
  }
}
