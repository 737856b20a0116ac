//! Arithmetic formulas over sheet cells.
//!
//! A [`Formula`] owns the parsed expression tree together with its printed
//! form and the list of valid positions it reads. Evaluation borrows the
//! sheet read-only; missing and empty cells read as zero.

mod ast;
mod parser;

use ast::Expr;

use super::position::Position;
use super::sheet::Sheet;
use super::value::ErrorKind;
use crate::error::ParseError;

#[derive(Debug)]
pub struct Formula {
    ast: Expr,
    expression: String,
    references: Vec<Position>,
}

impl Formula {
    /// Parse an expression (the text after the leading `=`).
    pub fn parse(input: &str) -> Result<Formula, ParseError> {
        let ast = parser::parse(input)?;
        let mut references = Vec::new();
        ast.collect_references(&mut references);
        references.sort_unstable();
        references.dedup();
        let expression = ast.to_string();
        Ok(Formula {
            ast,
            expression,
            references,
        })
    }

    /// Evaluate against the given sheet.
    ///
    /// Division by zero and non-finite results report
    /// [`ErrorKind::Arithmetic`]; references outside the addressable area
    /// report [`ErrorKind::Ref`].
    pub fn evaluate(&self, sheet: &Sheet) -> Result<f64, ErrorKind> {
        let value = self.ast.evaluate(sheet)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ErrorKind::Arithmetic)
        }
    }

    /// The expression printed back from the parse tree: no whitespace,
    /// minimal parentheses.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Valid positions referenced by the expression, sorted and
    /// deduplicated.
    pub fn referenced_cells(&self) -> &[Position] {
        &self.references
    }
}
