//! Parser options.

use gedcom_tokenizer::LevelDigits;

/// Options controlling how lines are interpreted.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Merge `CONT`/`CONC` lines into the enclosing value (default: true).
    /// When off they are ordinary tags and get their own hooks.
    pub auto_concat: bool,

    /// Accepted width of level numbers (default: single digit)
    pub level_digits: LevelDigits,

    /// Tags whose values are opaque payloads: continuations are appended
    /// without a line break (default: `BLOB`)
    pub binary_tags: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            auto_concat: true,
            level_digits: LevelDigits::Single,
            binary_tags: vec!["BLOB".to_string()],
        }
    }
}

impl ParserOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable continuation merging.
    pub fn auto_concat(mut self, enabled: bool) -> Self {
        self.auto_concat = enabled;
        self
    }

    /// Accept multi-digit levels such as `12`.
    pub fn multi_digit_levels(mut self) -> Self {
        self.level_digits = LevelDigits::Multi;
        self
    }

    /// Treat `tag` as a binary payload tag in addition to the existing ones.
    pub fn binary_tag(mut self, tag: impl Into<String>) -> Self {
        self.binary_tags.push(tag.into());
        self
    }

    pub(crate) fn is_binary(&self, tag: &str) -> bool {
        self.binary_tags.iter().any(|t| t == tag)
    }
}
