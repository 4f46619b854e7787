//! Tokenized line types.

use crate::Span;

/// How many digits a level number may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelDigits {
    /// Exactly one digit, `0` through `9`.
    #[default]
    Single,
    /// Any run of digits that fits a `u32`.
    Multi,
}

/// One tokenized GEDCOM line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'src> {
    /// Nesting level.
    pub level: u32,
    /// Tag naming the record or field, after any pointer swap.
    pub tag: &'src str,
    /// Remainder of the line, possibly empty.
    pub value: &'src str,
    /// Whether a `@XREF@` pointer was found in tag position and swapped
    /// into `value`.
    pub swapped: bool,
    /// 1-based line number.
    pub line: usize,
    /// Bytes of the line without its terminator or trailing whitespace.
    pub span: Span,
}
