//! Structural errors raised while tokenizing and nesting lines.

use std::fmt;

use crate::Span;

/// A line that does not fit the `LEVEL TAG [VALUE]` grammar, or that cannot
/// be placed in the record structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// 1-based line number.
    pub line: usize,
    /// Offending bytes, as offsets into the whole input.
    pub span: Span,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(kind: SyntaxErrorKind, line: usize, span: Span) -> Self {
        Self { kind, line, span }
    }
}

/// Kind of structural error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The line does not start with a level digit.
    ExpectedLevel,
    /// More than one level digit while only single-digit levels are accepted.
    LevelTooWide,
    /// The level does not fit in a `u32`.
    LevelOverflow,
    /// The level is not followed by a single space.
    ExpectedSeparator,
    /// No tag where one must start.
    ExpectedTag,
    /// A cross-reference pointer in tag position with nothing to swap it with.
    PointerWithoutTag,
    /// A `CONT`/`CONC` line while no record is open.
    OrphanContinuation,
}

impl SyntaxErrorKind {
    /// Short, human readable description.
    pub fn message(&self) -> &'static str {
        match self {
            SyntaxErrorKind::ExpectedLevel => "expected a level number",
            SyntaxErrorKind::LevelTooWide => "level must be a single digit",
            SyntaxErrorKind::LevelOverflow => "level number is too large",
            SyntaxErrorKind::ExpectedSeparator => "expected a space after the level",
            SyntaxErrorKind::ExpectedTag => "expected a tag",
            SyntaxErrorKind::PointerWithoutTag => "cross-reference pointer without a tag",
            SyntaxErrorKind::OrphanContinuation => "continuation line outside of any record",
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on line {}", self.kind, self.line)
    }
}

impl std::error::Error for SyntaxError {}
