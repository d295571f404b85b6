use std::fmt;

/// The closed set of parse failure categories.
///
/// Every error the lexer or parser can produce falls into one of these kinds,
/// so callers can match on the category without string inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input contained no tokens at all.
    EmptyInput,
    /// The first keyword did not select a known query or update form.
    UnknownQueryForm,
    /// A string literal ran to end of line or end of input.
    UnterminatedString,
    /// A `\\`-escape was unknown, or a `\u`/`\U` escape denoted a surrogate
    /// or a value beyond U+10FFFF.
    InvalidEscape,
    /// A numeric literal does not fit the target representation.
    NumericOutOfRange,
    UnclosedBrace,
    UnclosedBracket,
    UnclosedParen,
    UnclosedQuotedTriple,
    /// A specific token was required; carries a description of what.
    ExpectedToken(String),
    ExpectedIri,
    ExpectedWhere,
    ExpectedLBrace,
    /// `VERSION` must be followed by a quoted string.
    ExpectedVersionString,
    /// `CONSTRUCT` without a template or `WHERE` clause.
    MalformedConstruct,
    /// Tokens remained after a complete statement.
    UnexpectedTrailingInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::EmptyInput => f.write_str("empty input"),
            ParseErrorKind::UnknownQueryForm => f.write_str("unknown query form"),
            ParseErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ParseErrorKind::InvalidEscape => f.write_str("invalid escape"),
            ParseErrorKind::NumericOutOfRange => f.write_str("numeric literal out of range"),
            ParseErrorKind::UnclosedBrace => f.write_str("unclosed `{`"),
            ParseErrorKind::UnclosedBracket => f.write_str("unclosed `[`"),
            ParseErrorKind::UnclosedParen => f.write_str("unclosed `(`"),
            ParseErrorKind::UnclosedQuotedTriple => f.write_str("unclosed `<<`"),
            ParseErrorKind::ExpectedToken(what) => write!(f, "expected {what}"),
            ParseErrorKind::ExpectedIri => f.write_str("expected an IRI"),
            ParseErrorKind::ExpectedWhere => f.write_str("expected WHERE"),
            ParseErrorKind::ExpectedLBrace => f.write_str("expected `{`"),
            ParseErrorKind::ExpectedVersionString => f.write_str("expected version string"),
            ParseErrorKind::MalformedConstruct => f.write_str("malformed CONSTRUCT"),
            ParseErrorKind::UnexpectedTrailingInput => f.write_str("unexpected trailing input"),
        }
    }
}

/// A fatal syntax error with its source position.
///
/// The parser reports the first error and stops; there is no recovery. The
/// `snippet` is the full source line the error points into, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    kind: ParseErrorKind,
    message: String,
    line: u32,
    column: u32,
    snippet: String,
}

impl ParseError {
    pub(crate) fn new(
        kind: ParseErrorKind,
        message: impl Into<String>,
        line: u32,
        column: u32,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
            snippet: snippet.into(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// The source line the error position points into.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

/// Extracts the line at `offset` for error snippets.
pub(crate) fn snippet_at(source: &str, offset: usize) -> String {
    let clamped = offset.min(source.len());
    let start = source[..clamped].rfind('\n').map_or(0, |i| i + 1);
    let end = source[clamped..]
        .find('\n')
        .map_or(source.len(), |i| clamped + i);
    source[start..end].trim_end().to_owned()
}
