//! Comment stripping for JS source text.
//!
//! A single forward pass that copies input code points to a [`Sink`] and drops `//` and `/* */`
//! comments found outside string and template literals. It is not a tokenizer: regex literals,
//! template substitutions (`${...}`) and JSX text are not recognised, so a comment-like sequence
//! inside them may be stripped. Line terminators are kept so diagnostics against the stripped
//! text report the right lines.

use crate::char::is_line_terminator;
use crate::char::is_quote;
use crate::char::ASTERISK;
use crate::char::BACKSLASH;
use crate::char::CR;
use crate::char::LF;
use crate::char::SLASH;
use crate::encoding::read_checked;
use crate::encoding::Decode;
use crate::encoding::Latin1;
use crate::encoding::Sink;
use crate::error::ShimResult;
use memchr::memchr;
use serde::Deserialize;
use serde::Serialize;

#[cfg(test)]
mod tests;

/// What a block comment spanning several lines leaves behind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCommentNewlines {
  /// One `\n` for the whole comment if it contains any line terminator.
  #[default]
  Collapse,
  /// One `\n` per line terminator, so every following line keeps its number.
  PerLine,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripOptions {
  pub block_comment_newlines: BlockCommentNewlines,
}

impl StripOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_block_comment_newlines(
    mut self,
    block_comment_newlines: BlockCommentNewlines,
  ) -> Self {
    self.block_comment_newlines = block_comment_newlines;
    self
  }
}

// A decoded code point that has not been consumed yet.
#[derive(Copy, Clone)]
struct Lookahead {
  c: u32,
  next: usize,
}

struct Scanner<'a, D, S> {
  decoder: &'a D,
  source: &'a [u8],
  next: usize,
  sink: &'a mut S,
  options: &'a StripOptions,
  comments: usize,
}

impl<'a, D: Decode, S: Sink> Scanner<'a, D, S> {
  fn at_end(&self) -> bool {
    self.next >= self.source.len()
  }

  fn read(&mut self) -> ShimResult<Option<u32>> {
    if self.at_end() {
      return Ok(None);
    }
    read_checked::<D, S>(self.decoder, self.source, &mut self.next).map(Some)
  }

  fn peek(&self) -> ShimResult<Option<Lookahead>> {
    if self.at_end() {
      return Ok(None);
    }
    let mut next = self.next;
    let c = read_checked::<D, S>(self.decoder, self.source, &mut next)?;
    Ok(Some(Lookahead { c, next }))
  }

  fn peek_is(&self, expected: u32) -> ShimResult<Option<Lookahead>> {
    Ok(self.peek()?.filter(|la| la.c == expected))
  }

  fn consume(&mut self, la: Lookahead) {
    self.next = la.next;
  }

  fn emit(&mut self, c: u32) {
    self.sink.push_code_point(c);
  }

  fn run(&mut self) -> ShimResult<()> {
    while let Some(c) = self.read()? {
      if is_quote(c) {
        self.emit(c);
        self.string(c)?;
      } else if c == SLASH {
        self.slash()?;
      } else {
        self.emit(c);
      }
    }
    Ok(())
  }

  // Called after the opening quote has been emitted. An unterminated literal runs to the end.
  fn string(&mut self, quote: u32) -> ShimResult<()> {
    while let Some(c) = self.read()? {
      self.emit(c);
      if c == quote {
        break;
      }
      if c == BACKSLASH {
        if let Some(la) = self.peek()?.filter(|la| la.c == quote || la.c == BACKSLASH) {
          self.emit(la.c);
          self.consume(la);
        }
      }
    }
    Ok(())
  }

  // Called after a `/` in normal state has been read but not emitted.
  fn slash(&mut self) -> ShimResult<()> {
    let Some(la) = self.peek()? else {
      self.emit(SLASH);
      return Ok(());
    };
    match la.c {
      SLASH => {
        self.consume(la);
        // `\//` outside a literal is copied, not taken as a comment start.
        if self.sink.last_unit() == Some(BACKSLASH) {
          self.emit(SLASH);
          self.emit(SLASH);
          return Ok(());
        }
        self.comments += 1;
        self.line_comment()
      }
      ASTERISK => {
        self.consume(la);
        self.comments += 1;
        self.block_comment()
      }
      // Leave the lookahead for the main loop, it may open a string.
      _ => {
        self.emit(SLASH);
        Ok(())
      }
    }
  }

  // Folds CR LF into a single LF.
  fn fold_crlf(&mut self, c: u32) -> ShimResult<u32> {
    if c == CR {
      if let Some(la) = self.peek_is(LF)? {
        self.consume(la);
        return Ok(LF);
      }
    }
    Ok(c)
  }

  fn line_comment(&mut self) -> ShimResult<()> {
    while let Some(c) = self.read()? {
      if is_line_terminator(c) {
        let terminator = self.fold_crlf(c)?;
        self.emit(terminator);
        break;
      }
    }
    Ok(())
  }

  fn block_comment(&mut self) -> ShimResult<()> {
    let mut emitted_newline = false;
    while let Some(c) = self.read()? {
      if c == ASTERISK {
        if let Some(la) = self.peek_is(SLASH)? {
          self.consume(la);
          break;
        }
      } else if is_line_terminator(c) {
        self.fold_crlf(c)?;
        match self.options.block_comment_newlines {
          BlockCommentNewlines::PerLine => self.emit(LF),
          BlockCommentNewlines::Collapse if !emitted_newline => self.emit(LF),
          BlockCommentNewlines::Collapse => {}
        };
        emitted_newline = true;
      }
    }
    Ok(())
  }
}

/// Copies `source` into `sink`, decoding with `decoder` and dropping comments.
///
/// Every decoded code point is checked against the sink's range, including those inside comments
/// and literals. On error the sink holds a partial result the caller should discard.
pub fn strip_comments_into<D: Decode, S: Sink>(
  decoder: &D,
  source: &[u8],
  sink: &mut S,
  options: &StripOptions,
) -> ShimResult<()> {
  let mut scanner = Scanner {
    decoder,
    source,
    next: 0,
    sink,
    options,
    comments: 0,
  };
  let result = scanner.run();
  match &result {
    Ok(()) => tracing::trace!(
      bytes = source.len(),
      comments = scanner.comments,
      "stripped comments"
    ),
    Err(err) => tracing::debug!(
      bytes = source.len(),
      offset = scanner.next,
      %err,
      "comment stripping aborted"
    ),
  };
  result
}

/// Strips comments from source already in a single-byte encoding. Never fails.
pub fn strip_comments_latin1(source: &[u8]) -> Vec<u8> {
  strip_comments_latin1_with(source, &StripOptions::default())
}

pub fn strip_comments_latin1_with(source: &[u8], options: &StripOptions) -> Vec<u8> {
  // No slash, nothing to strip.
  if memchr(b'/', source).is_none() {
    return source.to_vec();
  }
  let mut out = Vec::with_capacity(source.len());
  match strip_comments_into(&Latin1, source, &mut out, options) {
    Ok(()) => out,
    Err(err) => unreachable!("Latin-1 input always fits a byte sink: {err}"),
  }
}
