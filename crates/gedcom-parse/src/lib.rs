//! Streaming, callback-driven parser for GEDCOM.
//!
//! GEDCOM is a line-oriented format where a leading level number nests each
//! record under the nearest preceding record with a lower level:
//!
//! ```text
//! 0 @I1@ INDI
//! 1 NAME John /Smith/
//! 1 BIRT
//! 2 DATE 1 JAN 1900
//! 0 TRLR
//! ```
//!
//! Rather than building a tree, [`Parser`] keeps a stack of open records and
//! runs hooks registered for an exact path of tags when a record opens
//! ([`Parser::before`]) and when it closes ([`Parser::after`]). `CONT` and
//! `CONC` continuation lines are merged into the value they extend, so
//! `after` hooks see the reassembled text.
//!
//! ```ignore
//! let mut names = Vec::new();
//! let mut parser = Parser::new();
//! parser.after(["INDI", "NAME"], |name, _| {
//!     names.push(name.to_string());
//!     Ok(())
//! })?;
//! parser.parse("family.ged")?;
//! ```

pub use gedcom_tokenizer::{LevelDigits, Line, Span, SyntaxError, SyntaxErrorKind, Tokenizer};

mod continuation;
pub use continuation::ContinuationKind;

mod diagnostic;

mod error;
pub use error::{Error, HookError, Result, UsageError};

mod input;
pub use input::Input;

mod options;
pub use options::ParserOptions;

mod parser;
pub use parser::Parser;

mod registry;
pub use registry::{HookRegistry, Phase, Selector, TagPath};

mod stack;
pub use stack::Context;
