//! Diagnostic rendering for parse errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use gedcom_tokenizer::{SyntaxError, SyntaxErrorKind};

use crate::error::Error;

impl Error {
    /// Render this error with ariadne.
    ///
    /// Syntax and hook errors are pointed at their line in `source`; the
    /// other kinds carry no location and render as their message.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, mut writer: W) {
        let report = match self {
            Error::Syntax(e) => syntax_report(e, filename),
            Error::Hook { line, source: err } => {
                let range = line_range(source, *line);
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message("hook failed")
                    .with_label(
                        Label::new((filename, range))
                            .with_message(err.to_string())
                            .with_color(Color::Red),
                    )
            }
            Error::Usage(_) | Error::Io(_) => {
                let _ = writeln!(writer, "error: {}", self);
                return;
            }
        };
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }
}

fn syntax_report<'a>(
    error: &SyntaxError,
    filename: &'a str,
) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
    let range: std::ops::Range<usize> = error.span.into();
    let (label, help) = match error.kind {
        SyntaxErrorKind::ExpectedLevel => (
            "lines must start with a level",
            "every line has the shape `LEVEL TAG [VALUE]`, e.g. `1 NAME John /Smith/`",
        ),
        SyntaxErrorKind::LevelTooWide => (
            "level has more than one digit",
            "enable multi-digit levels in the parser options to accept this",
        ),
        SyntaxErrorKind::LevelOverflow => ("level out of range", "levels must fit in 32 bits"),
        SyntaxErrorKind::ExpectedSeparator => (
            "expected a single space here",
            "separate the level and the tag with one space",
        ),
        SyntaxErrorKind::ExpectedTag => (
            "expected a tag here",
            "the tag follows the level after exactly one space",
        ),
        SyntaxErrorKind::PointerWithoutTag => (
            "pointer is not followed by a tag",
            "a record pointer must be followed by its tag, e.g. `0 @I1@ INDI`",
        ),
        SyntaxErrorKind::OrphanContinuation => (
            "nothing to continue",
            "CONT and CONC lines must follow the line they extend",
        ),
    };

    Report::build(ReportKind::Error, (filename, range.clone()))
        .with_message(error.kind.message())
        .with_label(
            Label::new((filename, range))
                .with_message(label)
                .with_color(Color::Red),
        )
        .with_help(help)
}

/// Byte range of 1-based line `number` in `source`, without its terminator.
fn line_range(source: &str, number: usize) -> std::ops::Range<usize> {
    let mut start = 0;
    for (index, line) in source.split_inclusive('\n').enumerate() {
        if index + 1 == number {
            let text = line.trim_end_matches(['\r', '\n']);
            return start..start + text.len();
        }
        start += line.len();
    }
    source.len()..source.len()
}
