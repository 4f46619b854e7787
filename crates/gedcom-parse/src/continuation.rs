//! Continuation line merging.

/// The two continuation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
    /// `CONT`: the text continues on a new line.
    Cont,
    /// `CONC`: the text continues directly, no separator.
    Conc,
}

impl ContinuationKind {
    /// Recognize a continuation tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "CONT" => Some(ContinuationKind::Cont),
            "CONC" => Some(ContinuationKind::Conc),
            _ => None,
        }
    }
}

/// Append continuation `text` to `current`.
///
/// An empty `current` takes `text` as is. Binary payloads never gain a
/// separator.
pub fn merge(current: &mut String, kind: ContinuationKind, text: &str, binary: bool) {
    if !current.is_empty() && !binary && kind == ContinuationKind::Cont {
        current.push('\n');
    }
    current.push_str(text);
}
