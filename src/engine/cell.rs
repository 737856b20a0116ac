//! Cell container: content kind, adjacency sets, memoized value.
//!
//! A cell is exactly one of empty, literal text, or formula. The two
//! adjacency sets record, as positions, which cells this one reads
//! (`depends_on`) and which cells read it (`dependents`). They are
//! relations over the sheet's arena, never ownership; only the sheet
//! mutates them.

use std::collections::BTreeSet;

use super::formula::Formula;
use super::position::Position;
use super::sheet::Sheet;
use super::value::{CellValue, ErrorKind};
use crate::error::ParseError;

/// What a cell holds.
#[derive(Debug, Default)]
pub(crate) enum CellKind {
    #[default]
    Empty,
    /// Literal text as the user typed it, including any leading apostrophe.
    Text(String),
    Formula(FormulaCell),
}

#[derive(Debug)]
pub(crate) struct FormulaCell {
    formula: Formula,
    /// Source text, reconstructed as `=` plus the printed expression.
    text: String,
    /// Memoized numeric result. Error results are recomputed on every read.
    cache: std::cell::Cell<Option<f64>>,
}

impl CellKind {
    /// Classify user input.
    ///
    /// `=expr` parses as a formula; a lone `=` stays text; a leading
    /// apostrophe quotes the rest verbatim; everything else is text.
    pub(crate) fn from_input(text: &str) -> Result<CellKind, ParseError> {
        if text.is_empty() {
            return Ok(CellKind::Empty);
        }
        if let Some(body) = text.strip_prefix('=') {
            if !body.is_empty() {
                let formula = Formula::parse(body)?;
                let text = format!("={}", formula.expression());
                return Ok(CellKind::Formula(FormulaCell {
                    formula,
                    text,
                    cache: std::cell::Cell::new(None),
                }));
            }
        }
        Ok(CellKind::Text(text.to_string()))
    }

    pub(crate) fn referenced_cells(&self) -> &[Position] {
        match self {
            CellKind::Formula(cell) => cell.formula.referenced_cells(),
            _ => &[],
        }
    }
}

/// A single cell owned by a [`Sheet`].
#[derive(Debug, Default)]
pub struct Cell {
    pub(crate) kind: CellKind,
    /// Positions this cell reads.
    pub(crate) depends_on: BTreeSet<Position>,
    /// Positions that read this cell.
    pub(crate) dependents: BTreeSet<Position>,
}

impl Cell {
    pub(crate) fn new() -> Cell {
        Cell::default()
    }

    /// Source text: empty for empty cells, the user's text for text cells
    /// (apostrophe included), `=` plus the printed expression for formulas.
    pub fn text(&self) -> &str {
        match &self.kind {
            CellKind::Empty => "",
            CellKind::Text(raw) => raw,
            CellKind::Formula(cell) => &cell.text,
        }
    }

    /// The cell's value.
    ///
    /// Formula cells evaluate lazily against the owning sheet; a numeric
    /// result is memoized until invalidated, an error result is not.
    pub fn value(&self, sheet: &Sheet) -> CellValue {
        match &self.kind {
            CellKind::Empty => CellValue::Text(String::new()),
            CellKind::Text(_) => CellValue::Text(self.text_value().to_string()),
            CellKind::Formula(cell) => {
                if let Some(n) = cell.cache.get() {
                    return CellValue::Number(n);
                }
                match cell.formula.evaluate(sheet) {
                    Ok(n) => {
                        cell.cache.set(Some(n));
                        CellValue::Number(n)
                    }
                    Err(kind) => CellValue::Error(kind),
                }
            }
        }
    }

    /// Positions this cell reads, deduplicated and sorted. Empty for
    /// non-formula cells.
    pub fn referenced_cells(&self) -> &[Position] {
        self.kind.referenced_cells()
    }

    /// Whether any other cell reads this one.
    pub fn is_referenced(&self) -> bool {
        !self.dependents.is_empty()
    }

    /// Numeric reading of this cell for use inside formula arithmetic.
    pub(crate) fn numeric_value(&self, sheet: &Sheet) -> Result<f64, ErrorKind> {
        match &self.kind {
            CellKind::Empty => Ok(0.0),
            CellKind::Text(_) => match self.text_value().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(ErrorKind::Value),
            },
            CellKind::Formula(_) => match self.value(sheet) {
                CellValue::Number(n) => Ok(n),
                CellValue::Error(kind) => Err(kind),
                CellValue::Text(_) => Err(ErrorKind::Value),
            },
        }
    }

    /// Drop the memoized result, if any.
    pub(crate) fn invalidate(&self) {
        if let CellKind::Formula(cell) = &self.kind {
            cell.cache.set(None);
        }
    }

    #[cfg(test)]
    pub(crate) fn cached(&self) -> Option<f64> {
        match &self.kind {
            CellKind::Formula(cell) => cell.cache.get(),
            _ => None,
        }
    }

    /// Text value with a quoting apostrophe stripped.
    fn text_value(&self) -> &str {
        match &self.kind {
            CellKind::Text(raw) => raw.strip_prefix('\'').unwrap_or(raw),
            _ => "",
        }
    }
}
