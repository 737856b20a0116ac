//! Error types for the gridsheet engine.

use thiserror::Error;

use crate::engine::Position;

/// Errors surfaced by sheet operations.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The position lies outside the addressable area.
    #[error("invalid position {0}")]
    InvalidPosition(Position),

    /// Committing the change would make a formula (transitively) read
    /// itself.
    #[error("circular dependency detected")]
    CircularDependency,

    /// The text after `=` is not a well-formed expression.
    #[error("formula parse error: {0}")]
    Formula(#[from] ParseError),
}

/// Errors produced while parsing a formula expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("malformed number literal `{0}`")]
    InvalidNumber(String),

    #[error("malformed cell reference `{0}`")]
    InvalidReference(String),

    #[error("unexpected `{0}`")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

pub type Result<T> = std::result::Result<T, SheetError>;
