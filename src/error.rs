//! Errors raised while parsing or evaluating an options record.
//!
//! Every message is formatted here so the exact text stays in one place.

use std::fmt;

use crate::ast::TokenKind;

/// Error returned by a host function invoked from a call expression.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// What the parser would have accepted where it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    One(TokenKind),
    OneOf(Vec<TokenKind>),
}

/// Unexpected token while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// The complete options record being parsed
    pub input: String,
    pub unexpected: TokenKind,
    pub expected: Expected,
    /// Index of the offending token among the non-separator tokens.
    /// This is the offset reported in the message.
    pub offset: usize,
    /// UTF-16 offset of the offending token within `input`
    pub position: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid options record: '{}', expected to be in the format of an object literal. Unexpected token: {}, ",
            self.input, self.unexpected
        )?;
        match &self.expected {
            Expected::One(kind) => write!(f, "expected token: {}", kind)?,
            Expected::OneOf(kinds) => {
                let names: Vec<&str> = kinds.iter().map(|k| k.name()).collect();
                write!(f, "expected one of: {}", names.join(", "))?
            }
        }
        write!(f, ", at offset {}.", self.offset)
    }
}

impl std::error::Error for SyntaxError {}

/// Property read on an undefined or null value.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccessError {
    /// The property that could not be read
    pub property: String,
    /// `"undefined"` or `"null"`
    pub receiver: &'static str,
    /// Chain resolved before the failing read, e.g. `a.b`
    pub path: String,
}

impl fmt::Display for PropertyAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unable to read property '{}' of {} value '{}'.",
            self.property, self.receiver, self.path
        )
    }
}

impl std::error::Error for PropertyAccessError {}

/// A function or the global object reached a resolved value without having
/// been marked as supported for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityViolation {
    /// How the value was reached
    pub path: String,
    /// `"function"` or `"global object"`
    pub kind: &'static str,
}

impl fmt::Display for SecurityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value '{}' is a {} that has not been marked as supported for processing.",
            self.path, self.kind
        )
    }
}

impl std::error::Error for SecurityViolation {}

/// Any failure of `parse`, `parse_structural` or `evaluate`.
#[derive(Debug)]
pub enum Error {
    /// Malformed input, including characters the lexer could not read
    Syntax(SyntaxError),

    /// Read of a property on `undefined` or `null`
    PropertyAccess(PropertyAccessError),

    /// Unapproved function or global object in the result
    Security(SecurityViolation),

    /// Failure raised by a function from the function context, unchanged
    Host(HostError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(e) => write!(f, "{}", e),
            Error::PropertyAccess(e) => write!(f, "{}", e),
            Error::Security(e) => write!(f, "{}", e),
            Error::Host(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(e) => Some(e),
            Error::PropertyAccess(e) => Some(e),
            Error::Security(e) => Some(e),
            Error::Host(e) => Some(e.as_ref()),
        }
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}

impl From<PropertyAccessError> for Error {
    fn from(e: PropertyAccessError) -> Self {
        Error::PropertyAccess(e)
    }
}

impl From<SecurityViolation> for Error {
    fn from(e: SecurityViolation) -> Self {
        Error::Security(e)
    }
}

#[test]
fn test_syntax_message_single_expected() {
    let err = SyntaxError {
        input: "{ a 1 }".to_string(),
        unexpected: TokenKind::NumberLiteral,
        expected: Expected::One(TokenKind::Colon),
        offset: 2,
        position: 4,
    };
    assert_eq!(
        err.to_string(),
        "Invalid options record: '{ a 1 }', expected to be in the format of an object literal. Unexpected token: numberLiteral, expected token: colon, at offset 2."
    );
}
