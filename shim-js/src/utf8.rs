//! UTF-8 decoding and conversion to the engine's narrow (Latin-1) and wide (UTF-16) strings.
//!
//! Decoding does not validate: overlong forms, surrogates, and the obsolete 5- and 6-byte forms
//! decode to whatever value their bits spell. A narrow target then rejects anything above
//! U+00FF, which is the only check source loading needs.

use crate::encoding::transcode_into;
use crate::encoding::Sink;
use crate::encoding::Utf8;
use crate::error::ShimError;
use crate::error::ShimResult;
use crate::strip::strip_comments_into;
use crate::strip::StripOptions;

/// Values subtracted from the raw accumulated bits of a sequence, indexed by its number of
/// continuation bytes. Subtracting removes the lead and continuation marker bits in one step.
pub const OFFSETS_FROM_UTF8: [u32; 6] = [
  0x00000000, 0x00003080, 0x000E2080, 0x03C82080, 0xFA082080, 0x82082080,
];

/// Length in bytes of the sequence introduced by `lead`.
///
/// Stray continuation bytes and `0xFE`/`0xFF` are treated as one-byte sequences.
#[inline]
pub fn sequence_length(lead: u8) -> usize {
  match lead.leading_ones() {
    n @ 2..=6 => n as usize,
    _ => 1,
  }
}

/// Decodes the code point at `*pos` and advances `*pos` past its sequence.
///
/// Fails with [`ShimError::TruncatedUtf8`], leaving `*pos` unchanged, when the sequence runs past
/// the end of `input` or `*pos` is already at the end.
pub fn decode_one(input: &[u8], pos: &mut usize) -> ShimResult<u32> {
  let start = *pos;
  let Some(&lead) = input.get(start) else {
    return Err(ShimError::TruncatedUtf8 { offset: start });
  };
  let len = sequence_length(lead);
  let Some(bytes) = input.get(start..start + len) else {
    return Err(ShimError::TruncatedUtf8 { offset: start });
  };
  let raw = bytes
    .iter()
    .fold(0u32, |acc, &b| (acc << 6).wrapping_add(b as u32));
  *pos = start + len;
  Ok(raw.wrapping_sub(OFFSETS_FROM_UTF8[len - 1]))
}

fn convert<S: Sink + Default>(
  input: &[u8],
  strip: Option<&StripOptions>,
) -> ShimResult<S> {
  let mut out = S::default();
  match strip {
    Some(options) => strip_comments_into(&Utf8, input, &mut out, options)?,
    None => transcode_into(&Utf8, input, &mut out)?,
  };
  Ok(out)
}

/// Decodes UTF-8 `input` into a Latin-1 string, optionally stripping comments on the way.
///
/// Fails with [`ShimError::EncodingOverflow`] on the first code point above U+00FF, wherever it
/// appears (comments included); the caller should retry with [`convert_utf8_to_utf16`].
pub fn convert_utf8_to_latin1(input: &[u8], strip_comment: bool) -> ShimResult<Vec<u8>> {
  convert_utf8_to_latin1_with(input, strip_comment.then(StripOptions::default).as_ref())
}

pub fn convert_utf8_to_latin1_with(
  input: &[u8],
  strip: Option<&StripOptions>,
) -> ShimResult<Vec<u8>> {
  convert(input, strip)
}

/// Decodes UTF-8 `input` into UTF-16 code units, optionally stripping comments on the way.
pub fn convert_utf8_to_utf16(input: &[u8], strip_comment: bool) -> ShimResult<Vec<u16>> {
  convert_utf8_to_utf16_with(input, strip_comment.then(StripOptions::default).as_ref())
}

pub fn convert_utf8_to_utf16_with(
  input: &[u8],
  strip: Option<&StripOptions>,
) -> ShimResult<Vec<u16>> {
  convert(input, strip)
}
