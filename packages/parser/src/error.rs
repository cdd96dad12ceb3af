use std::ops::Range;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected token at {}: expected {expected}, found {found}", .span.start)]
    UnexpectedToken {
        span: Range<usize>,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Mismatched closing tag at {}: expected </{expected}>, found </{found}>", .span.start)]
    MismatchedTag {
        span: Range<usize>,
        expected: String,
        found: String,
    },

    #[error("Closing tag </{name}> at {} has no matching start tag", .span.start)]
    UnexpectedClosingTag { span: Range<usize>, name: String },

    #[error("Element <{name}> opened at {} is never closed", .span.start)]
    UnclosedTag { span: Range<usize>, name: String },

    #[error("Duplicate element id '{id}' at {}", .span.start)]
    DuplicateId { span: Range<usize>, id: String },

    #[error("Invalid markup at {}", .span.start)]
    Lexer { span: Range<usize> },
}

impl ParseError {
    pub fn unexpected_token(
        span: Range<usize>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn lexer_error(span: Range<usize>) -> Self {
        Self::Lexer { span }
    }

    /// Byte span the error points at
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MismatchedTag { span, .. }
            | ParseError::UnexpectedClosingTag { span, .. }
            | ParseError::UnclosedTag { span, .. }
            | ParseError::DuplicateId { span, .. }
            | ParseError::Lexer { span } => span.clone(),
            ParseError::UnexpectedEof { pos, .. } => *pos..*pos,
        }
    }

    fn label(&self) -> String {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEof { expected, .. } => format!("expected {}", expected),
            ParseError::MismatchedTag { expected, .. } => format!("expected </{}>", expected),
            ParseError::UnexpectedClosingTag { .. } => "no open element here".to_string(),
            ParseError::UnclosedTag { name, .. } => format!("<{}> opened here", name),
            ParseError::DuplicateId { id, .. } => format!("'{}' already used", id),
            ParseError::Lexer { .. } => "not valid markup".to_string(),
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let span = error.span();
    let span = if span.is_empty() {
        let start = span.start.min(source.len().saturating_sub(1));
        start..start + 1
    } else {
        span
    };

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_color(Color::Red)
                .with_message(error.label()),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}

#[cfg(not(feature = "pretty-errors"))]
pub fn format_error(_source: &str, filename: &str, error: &ParseError) -> String {
    format!("{}: {} ({})", filename, error, error.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_of_eof_is_empty_point() {
        let err = ParseError::unexpected_eof(12, "'>'");
        assert_eq!(err.span(), 12..12);
        assert_eq!(
            err.to_string(),
            "Unexpected end of input at 12: expected '>'"
        );
    }

    #[test]
    fn test_format_error_mentions_message() {
        let source = "<svg>\n  <rect>\n</svg>";
        let err = ParseError::MismatchedTag {
            span: 15..21,
            expected: "rect".to_string(),
            found: "svg".to_string(),
        };

        let formatted = format_error(source, "broken.svg", &err);
        assert!(formatted.contains("Mismatched closing tag"));
        assert!(formatted.contains("broken.svg"));
    }
}
