//! Sparse sheet: cell storage, dependency bookkeeping, printing.
//!
//! The sheet owns every cell, keyed by position. All mutation goes through
//! [`Sheet::set_cell`] and [`Sheet::clear_cell`], which keep the two
//! adjacency sets mutually inverse, the dependency graph acyclic, and the
//! memoized values of downstream cells invalidated.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::io;

use tracing::{debug, trace};

use super::cell::{Cell, CellKind};
use super::cycle::creates_cycle;
use super::position::Position;
use super::value::CellValue;
use crate::error::{Result, SheetError};

/// Extent of the printable area: the smallest top-left rectangle containing
/// every occupied cell.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Default)]
pub struct Sheet {
    cells: HashMap<Position, Cell>,
    /// Occupied-cell count per row, for bounding-box queries.
    rows: BTreeMap<usize, usize>,
    /// Occupied-cell count per column.
    cols: BTreeMap<usize, usize>,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::default()
    }

    /// Replace the content of the cell at `pos` with `text`.
    ///
    /// Referenced cells missing from the sheet are created as empty
    /// placeholders. The call either commits in full or returns an error
    /// with the sheet unchanged.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition(pos));
        }

        let kind = CellKind::from_input(text)?;
        let new_deps: BTreeSet<Position> = kind.referenced_cells().iter().copied().collect();

        // Reject before touching anything; a failed set must leave the
        // sheet exactly as it was.
        if creates_cycle(pos, &new_deps, &self.cells) {
            debug!(%pos, "rejected cyclic formula");
            return Err(SheetError::CircularDependency);
        }

        for &dep in &new_deps {
            self.materialize(dep);
        }
        self.materialize(pos);

        let old_deps = match self.cells.get_mut(&pos) {
            Some(cell) => std::mem::take(&mut cell.depends_on),
            None => BTreeSet::new(),
        };
        for dep in &old_deps {
            if let Some(dep_cell) = self.cells.get_mut(dep) {
                dep_cell.dependents.remove(&pos);
            }
        }
        for dep in &new_deps {
            if let Some(dep_cell) = self.cells.get_mut(dep) {
                dep_cell.dependents.insert(pos);
            }
        }
        trace!(%pos, deps = new_deps.len(), "committing cell");
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.depends_on = new_deps;
            cell.kind = kind;
        }

        self.invalidate_from(pos);
        Ok(())
    }

    /// Read-only access to the cell at `pos`, if any.
    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition(pos));
        }
        Ok(self.cells.get(&pos))
    }

    /// The value at `pos`; missing cells read as the empty string.
    pub fn value(&self, pos: Position) -> Result<CellValue> {
        Ok(match self.get_cell(pos)? {
            Some(cell) => cell.value(self),
            None => CellValue::Text(String::new()),
        })
    }

    /// Reset the cell at `pos`.
    ///
    /// A cell nothing depends on is removed outright. A cell still read by
    /// formulas stays behind as an empty placeholder, and those formulas
    /// see zero on their next evaluation.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition(pos));
        }
        if !self.cells.contains_key(&pos) {
            return Ok(());
        }

        let old_deps = match self.cells.get_mut(&pos) {
            Some(cell) => std::mem::take(&mut cell.depends_on),
            None => BTreeSet::new(),
        };
        for dep in &old_deps {
            if let Some(dep_cell) = self.cells.get_mut(dep) {
                dep_cell.dependents.remove(&pos);
            }
        }

        self.invalidate_from(pos);

        let referenced = self.cells.get(&pos).is_some_and(Cell::is_referenced);
        if referenced {
            if let Some(cell) = self.cells.get_mut(&pos) {
                cell.kind = CellKind::Empty;
            }
        } else {
            self.remove(pos);
        }
        debug!(%pos, kept = referenced, "cleared cell");
        Ok(())
    }

    /// Current printable bounding box.
    pub fn printable_size(&self) -> Size {
        Size {
            rows: self.rows.keys().next_back().map_or(0, |row| row + 1),
            cols: self.cols.keys().next_back().map_or(0, |col| col + 1),
        }
    }

    /// Write the evaluated values of the printable rectangle, tab-separated,
    /// one line per row.
    pub fn print_values<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.value(self).to_string())
    }

    /// Write the source texts of the printable rectangle.
    pub fn print_texts<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.text().to_string())
    }

    fn print_with<W: io::Write>(
        &self,
        out: &mut W,
        render: impl Fn(&Cell) -> String,
    ) -> io::Result<()> {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    out.write_all(b"\t")?;
                }
                if let Some(cell) = self.cells.get(&Position::new(row, col)) {
                    out.write_all(render(cell).as_bytes())?;
                }
            }
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Lookup without position validation, for the formula evaluator.
    pub(crate) fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// Ensure a cell exists at `pos`, creating an empty one with bounding
    /// box bookkeeping if needed.
    fn materialize(&mut self, pos: Position) {
        if self.cells.contains_key(&pos) {
            return;
        }
        self.cells.insert(pos, Cell::new());
        *self.rows.entry(pos.row).or_insert(0) += 1;
        *self.cols.entry(pos.col).or_insert(0) += 1;
    }

    fn remove(&mut self, pos: Position) {
        if self.cells.remove(&pos).is_none() {
            return;
        }
        if let Some(count) = self.rows.get_mut(&pos.row) {
            *count -= 1;
            if *count == 0 {
                self.rows.remove(&pos.row);
            }
        }
        if let Some(count) = self.cols.get_mut(&pos.col) {
            *count -= 1;
            if *count == 0 {
                self.cols.remove(&pos.col);
            }
        }
    }

    /// Drop the memoized values of `start` and every cell that transitively
    /// reads it.
    fn invalidate_from(&self, start: Position) {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }
            if let Some(cell) = self.cells.get(&pos) {
                cell.invalidate();
                for &dependent in &cell.dependents {
                    stack.push(dependent);
                }
            }
        }
    }
}
