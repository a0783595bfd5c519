/// Errors produced by the call bridge and the source scanner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShimError {
  /// A decoded code point does not fit the target encoding. Recoverable: retry with a wider
  /// representation (e.g. UTF-16 instead of Latin-1).
  #[error("code point U+{code_point:04X} at byte {offset} does not fit the target encoding")]
  EncodingOverflow { code_point: u32, offset: usize },

  /// A multi-byte UTF-8 sequence runs past the end of the input.
  #[error("truncated UTF-8 sequence at byte {offset}")]
  TruncatedUtf8 { offset: usize },

  /// The requested configuration is not implemented. This is never recoverable at runtime.
  #[error("unsupported configuration: {0}")]
  UnsupportedConfiguration(&'static str),
}

impl ShimError {
  /// Whether retrying with a wider output encoding can succeed.
  pub fn is_encoding_overflow(&self) -> bool {
    matches!(self, ShimError::EncodingOverflow { .. })
  }
}

pub type ShimResult<T> = Result<T, ShimError>;
