//! Error types for SVG parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax { span: Span, message: String },

    #[error("no <svg> root element found")]
    MissingRoot,
}

impl ParseError {
    /// Create a syntax error at a byte offset, clamped to the source length
    pub fn syntax(position: usize, source_len: usize, message: impl Into<String>) -> Self {
        let start = position.min(source_len);
        let end = (start + 1).min(source_len);
        Self::Syntax {
            span: start..end,
            message: message.into(),
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            ParseError::Syntax { span, .. } => Some(span),
            ParseError::MissingRoot => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let written = match self {
            ParseError::Syntax { span, message } => {
                Report::build(ReportKind::Error, filename, span.start)
                    .with_message("malformed SVG")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(message)
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf)
            }
            ParseError::MissingRoot => Report::<(&str, Span)>::build(ReportKind::Error, filename, 0)
                .with_message(self.to_string())
                .with_note("the document must contain an <svg> element")
                .finish()
                .write((filename, Source::from(source)), &mut buf),
        };

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
