//! Tokenizer for GEDCOM lines.

use crate::{LevelDigits, Line, Span, SyntaxError, SyntaxErrorKind};
use tracing::trace;

/// Split one physical line into level, tag and value.
///
/// `raw` may still carry its line terminator; trailing ASCII whitespace and
/// NUL are dropped before matching. Other Unicode spaces are kept. Blank lines produce `Ok(None)`. `offset` is the byte
/// position of `raw` within the whole input and only feeds the spans.
pub fn tokenize_line<'src>(
    raw: &'src str,
    line: usize,
    offset: u32,
    digits: LevelDigits,
) -> Result<Option<Line<'src>>, SyntaxError> {
    let text = raw.trim_end_matches(is_trailing_junk);
    if text.is_empty() {
        return Ok(None);
    }

    let error = |kind, start: usize, end: usize| {
        SyntaxError::new(
            kind,
            line,
            Span::new(
                offset.saturating_add(start as u32),
                offset.saturating_add(end as u32),
            ),
        )
    };

    // Level
    let level_len = text.bytes().take_while(u8::is_ascii_digit).count();
    if level_len == 0 {
        let first = text.chars().next().map_or(0, char::len_utf8);
        return Err(error(SyntaxErrorKind::ExpectedLevel, 0, first));
    }
    if digits == LevelDigits::Single && level_len > 1 {
        return Err(error(SyntaxErrorKind::LevelTooWide, 0, level_len));
    }
    let level: u32 = text[..level_len]
        .parse()
        .map_err(|_| error(SyntaxErrorKind::LevelOverflow, 0, level_len))?;

    // Separator
    let rest = &text[level_len..];
    match rest.chars().next() {
        Some(' ') => {}
        Some(c) => {
            return Err(error(
                SyntaxErrorKind::ExpectedSeparator,
                level_len,
                level_len + c.len_utf8(),
            ));
        }
        None => {
            return Err(error(SyntaxErrorKind::ExpectedTag, level_len, level_len));
        }
    }

    // Tag
    let tag_start = level_len + 1;
    let after = &rest[1..];
    let tag_len = after
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(after.len());
    if tag_len == 0 {
        let width = after.chars().next().map_or(0, char::len_utf8);
        return Err(error(
            SyntaxErrorKind::ExpectedTag,
            tag_start,
            tag_start + width,
        ));
    }
    let mut tag = &after[..tag_len];

    // Value: at most one separating space is consumed.
    let remainder = &after[tag_len..];
    let mut value = remainder.strip_prefix(' ').unwrap_or(remainder);

    let swapped = is_pointer(tag);
    if swapped {
        if value.is_empty() {
            return Err(error(
                SyntaxErrorKind::PointerWithoutTag,
                tag_start,
                tag_start + tag_len,
            ));
        }
        std::mem::swap(&mut tag, &mut value);
    }

    let span = Span::new(offset, offset.saturating_add(text.len() as u32));
    trace!(line, level, tag, value, swapped, "tokenized line");

    Ok(Some(Line {
        level,
        tag,
        value,
        swapped,
        line,
        span,
    }))
}

/// A cross-reference pointer such as `@I1@`. `@@` counts as one.
fn is_pointer(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('@') && token.ends_with('@')
}

fn is_trailing_junk(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\0' || c == '\x0b'
}

/// Tokenizes every line of an in-memory document.
///
/// Blank lines are skipped. A malformed line yields an error and tokenizing
/// carries on with the next line; callers that treat errors as fatal simply
/// stop pulling.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The remaining source text (suffix of the original input).
    remaining: &'src str,
    /// Byte position of `remaining` in the original input.
    pos: u32,
    /// Number of the next line.
    line: usize,
    digits: LevelDigits,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            remaining: source,
            pos: 0,
            line: 1,
            digits: LevelDigits::default(),
        }
    }

    /// Accept levels with the given number of digits.
    pub fn level_digits(mut self, digits: LevelDigits) -> Self {
        self.digits = digits;
        self
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Result<Line<'src>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_eof() {
            let end = self
                .remaining
                .find('\n')
                .map_or(self.remaining.len(), |nl| nl + 1);
            let raw = &self.remaining[..end];
            let (line, offset) = (self.line, self.pos);

            self.remaining = &self.remaining[end..];
            self.pos = self.pos.saturating_add(end as u32);
            self.line += 1;

            match tokenize_line(raw, line, offset, self.digits) {
                Ok(Some(tokenized)) => return Some(Ok(tokenized)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
