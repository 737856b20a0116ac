//! gridsheet - Sparse spreadsheet evaluation core.
//!
//! Cells hold literal text or arithmetic formulas that refer to other cells
//! by position. The sheet keeps the dependency graph acyclic, memoizes
//! formula results, invalidates downstream values on change, and renders
//! the occupied rectangle as tab-separated text.

pub mod engine;
pub mod error;

pub use engine::{Cell, CellValue, ErrorKind, Formula, Position, Sheet, Size, MAX_COLS, MAX_ROWS};
pub use error::{ParseError, Result, SheetError};

#[cfg(test)]
mod tests {
    use crate::{CellValue, Position, Sheet, SheetError};

    fn pos(name: &str) -> Position {
        Position::parse(name).unwrap()
    }

    #[test]
    fn test_simple_arithmetic_chain() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "2").unwrap();
        sheet.set_cell(pos("A2"), "3").unwrap();
        sheet.set_cell(pos("A3"), "=A1+A2").unwrap();

        assert_eq!(sheet.value(pos("A3")).unwrap(), CellValue::Number(5.0));
        let a3 = sheet.get_cell(pos("A3")).unwrap().unwrap();
        assert_eq!(a3.text(), "=A1+A2");
        assert_eq!(a3.referenced_cells(), &[pos("A1"), pos("A2")]);
    }

    #[test]
    fn test_text_round_trip() {
        let mut sheet = Sheet::new();
        for text in ["hello", "12abc", "'quoted", " spaced "] {
            sheet.set_cell(pos("B1"), text).unwrap();
            assert_eq!(sheet.get_cell(pos("B1")).unwrap().unwrap().text(), text);
        }
    }

    #[test]
    fn test_cycle_is_an_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "=B1").unwrap();
        assert!(matches!(
            sheet.set_cell(pos("B1"), "=A1"),
            Err(SheetError::CircularDependency)
        ));
        // B1 stays the empty placeholder it was.
        assert_eq!(sheet.get_cell(pos("B1")).unwrap().unwrap().text(), "");
    }

    #[test]
    fn test_update_propagates_to_dependents() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "2").unwrap();
        sheet.set_cell(pos("A2"), "3").unwrap();
        sheet.set_cell(pos("A3"), "=A1+A2").unwrap();
        assert_eq!(sheet.value(pos("A3")).unwrap(), CellValue::Number(5.0));

        sheet.set_cell(pos("A1"), "10").unwrap();
        assert_eq!(sheet.value(pos("A3")).unwrap(), CellValue::Number(13.0));
    }

    #[test]
    fn test_position_parse_and_display() {
        assert_eq!(pos("AZ52").row, 51);
        assert_eq!(pos("AZ52").col, 51);
        assert_eq!(Position::new(51, 51).to_string(), "AZ52");
        assert!(Position::parse("az52").is_none());
    }
}
