//! Error types for GEDCOM parsing.

use std::fmt;
use std::io;

use gedcom_tokenizer::SyntaxError;

/// Error returned by a hook. Passed through to the caller of `parse`
/// untouched.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// The parser was used incorrectly. Nothing was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// A hook was registered for a path with no tags.
    EmptyTagPath,
    /// An empty string was given as the input path.
    EmptyInputPath,
    /// The previous parse on this parser was aborted; its state is gone.
    Poisoned,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::EmptyTagPath => write!(f, "hook registered for an empty tag path"),
            UsageError::EmptyInputPath => write!(f, "input path is empty"),
            UsageError::Poisoned => {
                write!(f, "parser cannot be reused after an aborted parse")
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// Error that can occur during parsing.
#[derive(Debug)]
pub enum Error {
    /// The parser was used incorrectly.
    Usage(UsageError),
    /// The input is malformed.
    Syntax(SyntaxError),
    /// A hook failed while processing `line`.
    Hook {
        /// 1-based line number being processed when the hook failed.
        line: usize,
        /// The hook's own error.
        source: HookError,
    },
    /// The input could not be read.
    Io(io::Error),
}

impl Error {
    /// Whether the input itself is malformed.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    /// Whether a caller-supplied hook failed.
    pub fn is_hook(&self) -> bool {
        matches!(self, Error::Hook { .. })
    }

    /// The hook's error, if a hook failed.
    pub fn into_hook_error(self) -> Option<HookError> {
        match self {
            Error::Hook { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(e) => write!(f, "{}", e),
            Error::Syntax(e) => write!(f, "{}", e),
            Error::Hook { line, source } => write!(f, "hook failed on line {}: {}", line, source),
            Error::Io(e) => write!(f, "failed to read input: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Usage(e) => Some(e),
            Error::Syntax(e) => Some(e),
            Error::Hook { source, .. } => Some(source.as_ref()),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<UsageError> for Error {
    fn from(e: UsageError) -> Self {
        Error::Usage(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type for parsing.
pub type Result<T, E = Error> = std::result::Result<T, E>;
