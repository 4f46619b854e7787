//! The stack of currently open records.

/// Open records, outermost first.
///
/// Tags, values and levels live in parallel vectors so that the tag path can
/// be handed out as a plain slice for hook lookup.
#[derive(Debug, Default)]
pub(crate) struct ContextStack {
    tags: Vec<String>,
    values: Vec<String>,
    levels: Vec<u32>,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Open a record.
    pub(crate) fn push(&mut self, tag: &str, value: &str, level: u32) {
        self.tags.push(tag.to_string());
        self.values.push(value.to_string());
        self.levels.push(level);
    }

    /// Close the innermost record, returning its tag and value.
    pub(crate) fn pop(&mut self) -> Option<(String, String)> {
        self.levels.pop()?;
        let tag = self.tags.pop()?;
        let value = self.values.pop()?;
        Some((tag, value))
    }

    /// Level of the innermost record; `None` when nothing is open.
    pub(crate) fn level(&self) -> Option<u32> {
        self.levels.last().copied()
    }

    pub(crate) fn tags(&self) -> &[String] {
        &self.tags
    }

    pub(crate) fn top_tag(&self) -> Option<&str> {
        self.tags.last().map(String::as_str)
    }

    pub(crate) fn top_value(&self) -> Option<&str> {
        self.values.last().map(String::as_str)
    }

    pub(crate) fn top_value_mut(&mut self) -> Option<&mut String> {
        self.values.last_mut()
    }

    pub(crate) fn depth(&self) -> usize {
        self.tags.len()
    }

    pub(crate) fn clear(&mut self) {
        self.tags.clear();
        self.values.clear();
        self.levels.clear();
    }
}

/// Read-only view of the parser state handed to every hook.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    stack: &'a ContextStack,
    line: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(stack: &'a ContextStack, line: usize) -> Self {
        Self { stack, line }
    }

    /// Tags of the open records, outermost first.
    pub fn tags(&self) -> &'a [String] {
        self.stack.tags()
    }

    /// Number of open records.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Level of the innermost open record.
    pub fn level(&self) -> Option<u32> {
        self.stack.level()
    }

    /// Tag of the innermost open record.
    pub fn tag(&self) -> Option<&'a str> {
        self.stack.top_tag()
    }

    /// 1-based number of the line being processed. While draining at the
    /// end of input this is the last line read.
    pub fn line(&self) -> usize {
        self.line
    }
}
