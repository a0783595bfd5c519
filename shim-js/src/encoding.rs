//! Input codecs and output sinks shared by the scanner and the converters.

use crate::error::ShimError;
use crate::error::ShimResult;
use crate::utf8::decode_one;

/// Reads one code point from `input` at `*pos` and advances `*pos` past it.
///
/// Callers only invoke `decode` while `*pos < input.len()`.
pub trait Decode {
  fn decode(&self, input: &[u8], pos: &mut usize) -> ShimResult<u32>;
}

/// Every byte is one code point in `0..=255`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latin1;

impl Decode for Latin1 {
  #[inline]
  fn decode(&self, input: &[u8], pos: &mut usize) -> ShimResult<u32> {
    let byte = input[*pos];
    *pos += 1;
    Ok(byte as u32)
  }
}

/// Multi-byte UTF-8, decoded with the offset table in [`crate::utf8`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8;

impl Decode for Utf8 {
  #[inline]
  fn decode(&self, input: &[u8], pos: &mut usize) -> ShimResult<u32> {
    decode_one(input, pos)
  }
}

/// An output buffer of a fixed code unit width.
pub trait Sink {
  /// Largest code point the sink can represent. Anything above is an
  /// [`ShimError::EncodingOverflow`].
  const MAX_CODE_POINT: u32;

  /// Appends `c`, which the caller has checked against [`Sink::MAX_CODE_POINT`].
  fn push_code_point(&mut self, c: u32);

  /// The last code unit written, widened to `u32`.
  fn last_unit(&self) -> Option<u32>;
}

/// Latin-1: one byte per code point.
impl Sink for Vec<u8> {
  const MAX_CODE_POINT: u32 = 0xFF;

  #[inline]
  fn push_code_point(&mut self, c: u32) {
    debug_assert!(c <= Self::MAX_CODE_POINT);
    self.push(c as u8);
  }

  #[inline]
  fn last_unit(&self) -> Option<u32> {
    self.last().map(|&b| b as u32)
  }
}

/// UTF-16: one unit for the BMP, a surrogate pair above it. Lone surrogates pass through.
impl Sink for Vec<u16> {
  const MAX_CODE_POINT: u32 = 0x10FFFF;

  #[inline]
  fn push_code_point(&mut self, c: u32) {
    debug_assert!(c <= Self::MAX_CODE_POINT);
    if c < 0x10000 {
      self.push(c as u16);
    } else {
      let c = c - 0x10000;
      self.push(0xD800 | (c >> 10) as u16);
      self.push(0xDC00 | (c & 0x3FF) as u16);
    }
  }

  #[inline]
  fn last_unit(&self) -> Option<u32> {
    self.last().map(|&u| u as u32)
  }
}

/// Decodes `input` at `*pos` and rejects code points `S` cannot hold.
#[inline]
pub(crate) fn read_checked<D: Decode, S: Sink>(
  decoder: &D,
  input: &[u8],
  pos: &mut usize,
) -> ShimResult<u32> {
  let offset = *pos;
  let c = decoder.decode(input, pos)?;
  if c > S::MAX_CODE_POINT {
    *pos = offset;
    return Err(ShimError::EncodingOverflow {
      code_point: c,
      offset,
    });
  }
  Ok(c)
}

/// Decodes all of `input` into `sink` without touching comments.
pub fn transcode_into<D: Decode, S: Sink>(
  decoder: &D,
  input: &[u8],
  sink: &mut S,
) -> ShimResult<()> {
  let mut pos = 0;
  while pos < input.len() {
    let c = read_checked::<D, S>(decoder, input, &mut pos)?;
    sink.push_code_point(c);
  }
  Ok(())
}
