//! Line tokenizer for GEDCOM.
//!
//! Every non-blank GEDCOM line has the shape `LEVEL TAG [VALUE]`. This crate
//! splits one physical line into a [`Line`] and knows nothing about record
//! nesting or callbacks; see `gedcom-parse` for that.

mod span;
pub use span::Span;

mod error;
pub use error::{SyntaxError, SyntaxErrorKind};

mod line;
pub use line::{LevelDigits, Line};

mod tokenizer;
pub use tokenizer::{Tokenizer, tokenize_line};
