//! Property tests for the position codec.

use gridsheet::{Position, MAX_COLS, MAX_ROWS};
use proptest::prelude::*;

proptest! {
    #[test]
    fn display_then_parse_round_trips(row in 0..MAX_ROWS, col in 0..MAX_COLS) {
        let pos = Position::new(row, col);
        let rendered = pos.to_string();
        prop_assert_eq!(Position::parse(&rendered), Some(pos));
    }

    #[test]
    fn lowercase_never_parses(s in "[a-z]{1,3}[1-9][0-9]{0,3}") {
        prop_assert_eq!(Position::parse(&s), None);
    }

    #[test]
    fn arbitrary_input_never_panics(s in ".*") {
        let _ = Position::parse(&s);
    }

    #[test]
    fn ordering_matches_row_major_tuples(
        a_row in 0..MAX_ROWS, a_col in 0..MAX_COLS,
        b_row in 0..MAX_ROWS, b_col in 0..MAX_COLS,
    ) {
        let a = Position::new(a_row, a_col);
        let b = Position::new(b_row, b_col);
        prop_assert_eq!(a.cmp(&b), (a_row, a_col).cmp(&(b_row, b_col)));
    }

    #[test]
    fn parsed_positions_are_always_valid(s in "[A-Z]{1,3}[1-9][0-9]{0,4}") {
        if let Some(pos) = Position::parse(&s) {
            prop_assert!(pos.is_valid());
        }
    }
}
