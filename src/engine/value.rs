//! Cell values and evaluation error categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed formula evaluation.
///
/// Evaluation errors are values carried inside [`CellValue::Error`], not
/// control flow; they never disturb the dependency graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A formula references a position outside the addressable area.
    Ref,
    /// A referenced cell holds text that is not a numeric literal.
    Value,
    /// Division by zero or a non-finite result.
    Arithmetic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Ref => "#REF!",
            ErrorKind::Value => "#VALUE!",
            ErrorKind::Arithmetic => "#ARITHM!",
        })
    }
}

/// The observable value of a cell.
///
/// Empty cells report an empty [`CellValue::Text`]; formula cells report a
/// number or an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Error(ErrorKind),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Error(kind) => write!(f, "{}", kind),
        }
    }
}
