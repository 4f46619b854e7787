//! Streaming, callback-driven GEDCOM parser.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use gedcom_tokenizer::{Line, SyntaxError, SyntaxErrorKind, Tokenizer, tokenize_line};
use tracing::{debug, trace};

use crate::continuation::{self, ContinuationKind};
use crate::error::{Error, HookError, Result, UsageError};
use crate::input::Input;
use crate::options::ParserOptions;
use crate::registry::{HookRegistry, Phase, Selector};
use crate::stack::{Context, ContextStack};

/// Parses GEDCOM line by line and runs hooks as records open and close.
///
/// Register hooks with [`before`](Parser::before) and
/// [`after`](Parser::after), then call one of the `parse` methods. Hooks see
/// records outer to inner when they open, and inner to outer when they
/// close.
///
/// If a parse fails the parser refuses further parses.
pub struct Parser<'h> {
    options: ParserOptions,
    hooks: HookRegistry<'h>,
    stack: ContextStack,
    /// Line being processed.
    line: usize,
    poisoned: bool,
}

impl<'h> Parser<'h> {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Create a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            hooks: HookRegistry::new(),
            stack: ContextStack::new(),
            line: 0,
            poisoned: false,
        }
    }

    /// The options in effect.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Whether `CONT`/`CONC` lines are merged into the enclosing value.
    pub fn auto_concat(&self) -> bool {
        self.options.auto_concat
    }

    /// Enable or disable continuation merging.
    pub fn set_auto_concat(&mut self, enabled: bool) {
        self.options.auto_concat = enabled;
    }

    /// Run `hook` with the record's value whenever a record opens while
    /// exactly the records in `selector` are open.
    pub fn before<S, F>(&mut self, selector: S, hook: F) -> Result<&mut Self, UsageError>
    where
        S: Into<Selector>,
        F: FnMut(&str, &Context<'_>) -> Result<(), HookError> + 'h,
    {
        self.hooks
            .register(Phase::Before, selector.into(), Box::new(hook))?;
        Ok(self)
    }

    /// Run `hook` with the record's final value (continuations merged) when
    /// a record closes while exactly the records in `selector` are open.
    pub fn after<S, F>(&mut self, selector: S, hook: F) -> Result<&mut Self, UsageError>
    where
        S: Into<Selector>,
        F: FnMut(&str, &Context<'_>) -> Result<(), HookError> + 'h,
    {
        self.hooks
            .register(Phase::After, selector.into(), Box::new(hook))?;
        Ok(self)
    }

    /// The registered hooks.
    pub fn hooks(&self) -> &HookRegistry<'h> {
        &self.hooks
    }

    /// Tags of the currently open records, outermost first.
    pub fn context(&self) -> &[String] {
        self.stack.tags()
    }

    /// Parse text, a file or a stream, picked by the shape of `input`.
    pub fn parse<'a>(&mut self, input: impl Into<Input<'a>>) -> Result<()> {
        match input.into() {
            Input::Text(text) => self.parse_str(&text),
            Input::Path(path) => self.parse_file(path),
            Input::Reader(reader) => self.parse_reader(reader),
        }
    }

    /// Parse an in-memory document.
    pub fn parse_str(&mut self, source: &str) -> Result<()> {
        let digits = self.options.level_digits;
        self.run(|parser| {
            for line in Tokenizer::new(source).level_digits(digits) {
                parser.process(line?)?;
            }
            Ok(())
        })
    }

    /// Open and parse a file.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(UsageError::EmptyInputPath.into());
        }
        if self.poisoned {
            return Err(UsageError::Poisoned.into());
        }
        debug!(path = %path.display(), "opening GEDCOM file");
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse lines from an open stream.
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let digits = self.options.level_digits;
        self.run(|parser| {
            let mut buf = String::new();
            let mut offset = 0u32;
            let mut number = 0;
            loop {
                buf.clear();
                let read = reader.read_line(&mut buf)?;
                if read == 0 {
                    return Ok(());
                }
                number += 1;
                if let Some(line) = tokenize_line(&buf, number, offset, digits)? {
                    parser.process(line)?;
                }
                offset = offset.saturating_add(read as u32);
            }
        })
    }

    /// Run one parse: reset, feed lines through `feed`, then close
    /// everything still open.
    fn run(&mut self, feed: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.poisoned {
            return Err(UsageError::Poisoned.into());
        }
        self.stack.clear();
        self.line = 0;
        debug!(auto_concat = self.options.auto_concat, "parse started");

        let result = feed(self).and_then(|()| self.unwind(None));
        match &result {
            Ok(()) => debug!(lines = self.line, "parse finished"),
            Err(e) => {
                debug!(line = self.line, error = %e, "parse aborted");
                self.poisoned = true;
            }
        }
        result
    }

    fn process(&mut self, line: Line<'_>) -> Result<()> {
        self.line = line.line;

        if self.options.auto_concat
            && !line.swapped
            && let Some(kind) = ContinuationKind::from_tag(line.tag)
        {
            return self.concat(kind, &line);
        }

        self.unwind(Some(line.level))?;
        self.push(line.tag, line.value, line.level)
    }

    fn concat(&mut self, kind: ContinuationKind, line: &Line<'_>) -> Result<()> {
        let binary = self
            .stack
            .top_tag()
            .is_some_and(|tag| self.options.is_binary(tag));
        let Some(current) = self.stack.top_value_mut() else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::OrphanContinuation,
                line.line,
                line.span,
            )
            .into());
        };
        continuation::merge(current, kind, line.value, binary);
        trace!(?kind, binary, "merged continuation");
        Ok(())
    }

    /// Close records until the innermost open one is shallower than
    /// `target`; `None` closes everything.
    fn unwind(&mut self, target: Option<u32>) -> Result<()> {
        while let Some(level) = self.stack.level()
            && target.is_none_or(|target| level >= target)
        {
            self.dispatch(Phase::After)?;
            if let Some((tag, _)) = self.stack.pop() {
                trace!(level, tag = %tag, "closed record");
            }
        }
        Ok(())
    }

    fn push(&mut self, tag: &str, value: &str, level: u32) -> Result<()> {
        self.stack.push(tag, value, level);
        trace!(level, tag, depth = self.stack.depth(), "opened record");
        self.dispatch(Phase::Before)
    }

    fn dispatch(&mut self, phase: Phase) -> Result<()> {
        let Some(value) = self.stack.top_value() else {
            return Ok(());
        };
        let line = self.line;
        let cx = Context::new(&self.stack, line);
        let fired = self
            .hooks
            .dispatch(phase, &cx, value)
            .map_err(|source| Error::Hook { line, source })?;
        if fired > 0 {
            trace!(%phase, fired, "dispatched hooks");
        }
        Ok(())
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .field("context", &self.stack.tags())
            .field("poisoned", &self.poisoned)
            .finish()
    }
}
