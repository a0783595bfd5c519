// Code points the scanner cares about. The scanner works on raw `u32` code points rather than
// `char` because decoded input may contain surrogates or values past U+10FFFF.

pub const BACKSLASH: u32 = '\\' as u32;
pub const SLASH: u32 = '/' as u32;
pub const ASTERISK: u32 = '*' as u32;
pub const LF: u32 = '\n' as u32;
pub const CR: u32 = '\r' as u32;
pub const LINE_SEPARATOR: u32 = 0x2028;
pub const PARAGRAPH_SEPARATOR: u32 = 0x2029;

pub const ECMASCRIPT_LINE_TERMINATORS: [u32; 4] = [LF, CR, LINE_SEPARATOR, PARAGRAPH_SEPARATOR];

pub const ECMASCRIPT_QUOTES: [u32; 3] = ['\'' as u32, '"' as u32, '`' as u32];

#[inline]
pub fn is_line_terminator(c: u32) -> bool {
  ECMASCRIPT_LINE_TERMINATORS.contains(&c)
}

/// Whether `c` opens a string or template literal.
#[inline]
pub fn is_quote(c: u32) -> bool {
  ECMASCRIPT_QUOTES.contains(&c)
}
