//! Expression tree: evaluation and minimal-parenthesis printing.

use std::fmt::{self, Write as _};

use crate::engine::position::Position;
use crate::engine::sheet::Sheet;
use crate::engine::value::ErrorKind;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }

    /// Subtraction and division do not associate: their right operand must
    /// keep parentheses when it binds equally tight.
    fn right_grouping_significant(self) -> bool {
        matches!(self, BinaryOp::Sub | BinaryOp::Div)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Reference(Position),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub(crate) fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub(crate) fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Number(_) | Expr::Reference(_) => 4,
            Expr::Unary { .. } => 3,
            Expr::Binary { op, .. } => op.precedence(),
        }
    }

    pub(crate) fn evaluate(&self, sheet: &Sheet) -> Result<f64, ErrorKind> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Reference(pos) => {
                if !pos.is_valid() {
                    return Err(ErrorKind::Ref);
                }
                match sheet.cell_at(*pos) {
                    None => Ok(0.0),
                    Some(cell) => cell.numeric_value(sheet),
                }
            }
            Expr::Unary { op, operand } => {
                let value = operand.evaluate(sheet)?;
                Ok(match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                })
            }
            Expr::Binary { op, lhs, rhs } => {
                let left = lhs.evaluate(sheet)?;
                let right = rhs.evaluate(sheet)?;
                match op {
                    BinaryOp::Add => Ok(left + right),
                    BinaryOp::Sub => Ok(left - right),
                    BinaryOp::Mul => Ok(left * right),
                    BinaryOp::Div => {
                        if right == 0.0 {
                            Err(ErrorKind::Arithmetic)
                        } else {
                            Ok(left / right)
                        }
                    }
                }
            }
        }
    }

    /// Collect every valid referenced position, in syntactic order.
    pub(crate) fn collect_references(&self, out: &mut Vec<Position>) {
        match self {
            Expr::Number(_) => {}
            Expr::Reference(pos) => {
                if pos.is_valid() {
                    out.push(*pos);
                }
            }
            Expr::Unary { operand, .. } => operand.collect_references(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_references(out);
                rhs.collect_references(out);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_with_context(self, f, 0)
    }
}

/// Print `expr`, wrapping it in parentheses only when it binds weaker than
/// the surrounding context requires.
fn write_with_context(expr: &Expr, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
    let wrap = expr.precedence() < min_precedence;
    if wrap {
        f.write_char('(')?;
    }
    match expr {
        Expr::Number(n) => write!(f, "{}", n)?,
        Expr::Reference(pos) => write!(f, "{}", pos)?,
        Expr::Unary { op, operand } => {
            f.write_char(match op {
                UnaryOp::Plus => '+',
                UnaryOp::Neg => '-',
            })?;
            // A sign distributes over a product, so only additive operands
            // need grouping.
            write_with_context(operand, f, 2)?;
        }
        Expr::Binary { op, lhs, rhs } => {
            let precedence = op.precedence();
            write_with_context(lhs, f, precedence)?;
            f.write_char(op.symbol())?;
            let rhs_min = if op.right_grouping_significant() {
                precedence + 1
            } else {
                precedence
            };
            write_with_context(rhs, f, rhs_min)?;
        }
    }
    if wrap {
        f.write_char(')')?;
    }
    Ok(())
}
