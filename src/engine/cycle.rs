//! Circular dependency detection for formula cells.
//!
//! Before a new formula is committed we must verify it doesn't close a loop
//! (e.g. A1 reads B1, B1 reads C1, C1 reads A1). The proposed edges are not
//! yet installed, so the check walks the *dependents* relation outward from
//! the cell being set: if any cell that transitively reads it is also one of
//! its proposed dependencies, committing would create a cycle.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::cell::Cell;
use super::position::Position;

/// Would making `start` depend on `new_deps` create a cycle?
pub(crate) fn creates_cycle(
    start: Position,
    new_deps: &BTreeSet<Position>,
    cells: &HashMap<Position, Cell>,
) -> bool {
    if new_deps.contains(&start) {
        return true;
    }

    let mut visited = HashSet::new();
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        let Some(cell) = cells.get(&current) else {
            continue;
        };
        for &dependent in &cell.dependents {
            if new_deps.contains(&dependent) {
                return true;
            }
            stack.push(dependent);
        }
    }
    false
}
