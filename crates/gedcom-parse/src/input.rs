//! Where a document comes from.

use std::borrow::Cow;
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Input accepted by [`Parser::parse`](crate::Parser::parse).
///
/// Strings are classified by shape: one containing a newline is document
/// text, anything else names a file. Use [`Input::text`] to force text.
pub enum Input<'a> {
    /// Document text held in memory.
    Text(Cow<'a, str>),
    /// A file to open and read.
    Path(PathBuf),
    /// An already open stream.
    Reader(Box<dyn BufRead + 'a>),
}

impl<'a> Input<'a> {
    /// Document text, regardless of its shape.
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Input::Text(text.into())
    }

    /// A file path, regardless of its shape.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Input::Path(path.into())
    }

    /// Read lines from an open stream.
    pub fn reader(reader: impl Read + 'a) -> Self {
        Input::Reader(Box::new(BufReader::new(reader)))
    }

    fn classify(text: Cow<'a, str>) -> Self {
        if text.contains('\n') {
            Input::Text(text)
        } else {
            Input::Path(PathBuf::from(text.into_owned()))
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::classify(Cow::Borrowed(s))
    }
}

impl From<String> for Input<'_> {
    fn from(s: String) -> Self {
        Input::classify(Cow::Owned(s))
    }
}

impl From<&Path> for Input<'_> {
    fn from(path: &Path) -> Self {
        Input::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Input<'_> {
    fn from(path: PathBuf) -> Self {
        Input::Path(path)
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Input::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Input::Reader(_) => f.write_str("Reader"),
        }
    }
}
