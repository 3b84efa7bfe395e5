use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Arithmetic,
}

impl ErrorKind {
    fn color(self) -> Color {
        match self {
            ErrorKind::Lexical => Color::Red,
            ErrorKind::Syntax => Color::Yellow,
            ErrorKind::Arithmetic => Color::Magenta,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "Lexical Error",
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Arithmetic => "Arithmetic Error",
        };
        f.write_str(name)
    }
}

/// A failure raised by one stage of the pipeline for a single input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CalcError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn lexical(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Lexical, span, message)
    }

    pub fn syntax(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Syntax, span, message)
    }

    pub fn syntax_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::Syntax, span, message, help)
    }

    pub fn arithmetic(span: Span, message: String) -> Self {
        Self::new(ErrorKind::Arithmetic, span, message)
    }

    /// Render the diagnostic for `source` as an ariadne report.
    pub fn write_report<W: io::Write>(
        &self,
        source: &str,
        filename: Option<&str>,
        writer: W,
        color: bool,
    ) -> io::Result<()> {
        let filename = filename.unwrap_or("<stdin>");
        let kind_color = self.kind.color();

        // ariadne counts chars, spans count bytes. Labels past the end of the
        // line (e.g. a missing ')') are clamped onto the last character.
        let len = source.chars().count().max(1);
        let start = char_offset(source, self.span.start).min(len - 1);
        let end = char_offset(source, self.span.end).clamp(start + 1, len);

        let header = if color {
            format!("{}: {}", self.kind.fg(kind_color), self.message)
        } else {
            format!("{}: {}", self.kind, self.message)
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_config(Config::default().with_color(color))
            .with_message(header)
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(kind_color),
            );

        if let Some(ref help_text) = self.help {
            let note = if color {
                format!("{}: {}", "help".fg(Color::Cyan), help_text)
            } else {
                format!("help: {}", help_text)
            };
            report_builder = report_builder.with_note(note);
        }

        report_builder
            .finish()
            .write((filename, Source::from(source)), writer)
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte)
        .count()
}
