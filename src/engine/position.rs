//! Cell position parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style notation
//! (e.g. "A1", "B2", "AA100") and zero-indexed row/column coordinates,
//! plus the validity predicate and the ordering the rest of the engine
//! keys on.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of addressable rows.
pub const MAX_ROWS: usize = 16_384;
/// Number of addressable columns.
pub const MAX_COLS: usize = 16_384;

/// A cell position given by row and column indices (0-indexed).
///
/// Ordered lexicographically by `(row, col)`.
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Whether this position lies inside the addressable area.
    pub fn is_valid(self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse a position from spreadsheet notation (e.g. "A1", "AZ10").
    ///
    /// Returns `None` on malformed input (lowercase letters, a missing
    /// letter or digit part, leading zeros) and on coordinates outside the
    /// addressable area.
    pub fn parse(name: &str) -> Option<Position> {
        let pos = Self::parse_raw(name)?;
        pos.is_valid().then_some(pos)
    }

    /// Like [`Position::parse`] but keeps well-formed out-of-range
    /// coordinates, saturating on numeric overflow. The formula lexer uses
    /// this so oversized references survive to evaluation time and report
    /// `#REF!` instead of failing the parse.
    pub(crate) fn parse_raw(name: &str) -> Option<Position> {
        let caps = position_re().captures(name)?;
        let letters = &caps[1];
        let digits = &caps[2];

        // Bijective base-26: A=0, Z=25, AA=26, AZ=51, BA=52, ...
        let col = letters
            .bytes()
            .try_fold(0usize, |acc, c| {
                acc.checked_mul(26)?.checked_add((c - b'A') as usize + 1)
            })
            .map_or(usize::MAX, |n| n - 1);

        let row = digits
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .unwrap_or(usize::MAX);

        Some(Position { row, col })
    }

    /// Convert a column index to spreadsheet letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col.saturating_add(1);
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

fn position_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Z]+)([1-9][0-9]*)$").expect("position regex must compile"))
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid cell position: {}", s))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            Position::col_to_letters(self.col),
            self.row.saturating_add(1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_letter_columns() {
        let a1 = Position::parse("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = Position::parse("B1").unwrap();
        assert_eq!(b1.col, 1);

        let z1 = Position::parse("Z1").unwrap();
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_parse_multi_letter_columns() {
        assert_eq!(Position::parse("AA1").unwrap().col, 26);
        assert_eq!(Position::parse("AZ1").unwrap().col, 51);
        assert_eq!(Position::parse("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_parse_row_numbers() {
        assert_eq!(Position::parse("A1").unwrap().row, 0);
        assert_eq!(Position::parse("A10").unwrap().row, 9);
        assert_eq!(Position::parse("A100").unwrap().row, 99);
    }

    #[test]
    fn test_parse_invalid_inputs() {
        assert!(Position::parse("").is_none());
        assert!(Position::parse("123").is_none());
        assert!(Position::parse("ABC").is_none());
        assert!(Position::parse("A0").is_none());
        assert!(Position::parse("A01").is_none());
        assert!(Position::parse("1A").is_none());
        assert!(Position::parse("A 1").is_none());
        assert!(Position::parse("A1B2").is_none());
    }

    #[test]
    fn test_parse_rejects_lowercase() {
        assert!(Position::parse("a1").is_none());
        assert!(Position::parse("aA1").is_none());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(Position::parse("A16384").is_some());
        assert!(Position::parse("A16385").is_none());
        // Column 16383 is "XFD"; one past it is invalid.
        assert_eq!(Position::col_to_letters(MAX_COLS - 1), "XFD");
        assert!(Position::parse("XFD1").is_some());
        assert!(Position::parse("XFE1").is_none());
    }

    #[test]
    fn test_parse_raw_keeps_out_of_range() {
        let pos = Position::parse_raw("A99999").unwrap();
        assert_eq!(pos.row, 99_998);
        assert!(!pos.is_valid());
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["A1", "Z9", "AA1", "AZ52", "XFD16384"] {
            let pos = Position::parse(name).unwrap();
            assert_eq!(pos.to_string(), name);
        }
    }

    #[test]
    fn test_ordering_is_row_major() {
        let a1 = Position::new(0, 0);
        let b1 = Position::new(0, 1);
        let a2 = Position::new(1, 0);
        assert!(a1 < b1);
        assert!(b1 < a2);
        assert!(a1 < a2);
    }
}
