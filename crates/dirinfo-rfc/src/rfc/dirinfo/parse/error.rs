//! Content-line grammar error types.

use std::fmt;

use crate::error::DirInfoError;

/// Result type for grammar matchers.
pub type GrammarResult<T> = Result<T, GrammarError>;

/// A mismatch between input text and the content-line or value grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    /// The kind of error.
    pub kind: GrammarErrorKind,
    /// Byte offset into the matched text where the mismatch was detected.
    pub column: usize,
    /// Additional context or message.
    pub message: String,
}

impl GrammarError {
    /// Creates a new grammar error.
    #[must_use]
    pub fn new(kind: GrammarErrorKind, column: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            column,
            message: message.into(),
        }
    }

    /// Creates an unexpected character error.
    #[must_use]
    pub fn unexpected(column: usize, expected: &str, found: Option<char>) -> Self {
        let found = found.map_or_else(|| "end of line".to_string(), |c| format!("{c:?}"));
        Self::new(
            GrammarErrorKind::UnexpectedChar,
            column,
            format!("expected {expected}, found {found}"),
        )
    }

    /// Wraps this error with the text it was matched against.
    #[must_use]
    pub fn in_text(self, text: &str) -> DirInfoError {
        DirInfoError::InvalidEncoding(format!("{self} in {text:?}"))
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}: {}: {}", self.column, self.kind, self.message)
    }
}

impl std::error::Error for GrammarError {}

impl From<GrammarError> for DirInfoError {
    fn from(err: GrammarError) -> Self {
        Self::InvalidEncoding(err.to_string())
    }
}

/// The kind of grammar error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// Unexpected character or end of line.
    UnexpectedChar,
    /// Group or property name is empty or contains disallowed characters.
    InvalidName,
    /// Parameter name or value is malformed.
    InvalidParameter,
    /// Quoted parameter value has no closing quote.
    UnterminatedQuote,
    /// No `:` separates the name and parameters from the value.
    MissingColon,
    /// Value contains a line break.
    InvalidValue,
    /// Malformed DATE.
    InvalidDate,
    /// Malformed TIME.
    InvalidTime,
    /// Malformed DATE-TIME.
    InvalidDateTime,
    /// Malformed INTEGER.
    InvalidInteger,
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar => write!(f, "unexpected character"),
            Self::InvalidName => write!(f, "invalid name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnterminatedQuote => write!(f, "unterminated quoted string"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::InvalidDate => write!(f, "invalid date"),
            Self::InvalidTime => write!(f, "invalid time"),
            Self::InvalidDateTime => write!(f, "invalid date-time"),
            Self::InvalidInteger => write!(f, "invalid integer"),
        }
    }
}
