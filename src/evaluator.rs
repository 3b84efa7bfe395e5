use crate::ast::Expr;
use crate::error::{CalcError, Span};
use tracing::trace;

/// Tree-walking evaluator over integer expressions.
///
/// Stateless: the same tree always evaluates to the same result. Errors carry
/// the span they should be reported against, which the caller supplies since
/// the tree itself keeps no source positions.
pub struct Evaluator {
    span: Span,
}

impl Evaluator {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<i64, CalcError> {
        let value = match expr {
            Expr::Literal(value) => *value,
            Expr::Add(left, right) => {
                let (l, r) = self.operands(left, right)?;
                l.checked_add(r).ok_or_else(|| self.overflow())?
            }
            Expr::Subtract(left, right) => {
                let (l, r) = self.operands(left, right)?;
                l.checked_sub(r).ok_or_else(|| self.overflow())?
            }
            Expr::Multiply(left, right) => {
                let (l, r) = self.operands(left, right)?;
                l.checked_mul(r).ok_or_else(|| self.overflow())?
            }
            Expr::Divide(left, right) => {
                let (l, r) = self.operands(left, right)?;
                self.floor_div(l, r)?
            }
            Expr::Positive(operand) => self.evaluate(operand)?,
            Expr::Negative(operand) => self
                .evaluate(operand)?
                .checked_neg()
                .ok_or_else(|| self.overflow())?,
        };

        trace!(node = %expr, value, "evaluated node");
        Ok(value)
    }

    fn operands(&self, left: &Expr, right: &Expr) -> Result<(i64, i64), CalcError> {
        Ok((self.evaluate(left)?, self.evaluate(right)?))
    }

    /// Integer division rounding toward negative infinity.
    fn floor_div(&self, l: i64, r: i64) -> Result<i64, CalcError> {
        if r == 0 {
            return Err(CalcError::arithmetic(
                self.span.clone(),
                "division by zero".to_string(),
            ));
        }

        // Only i64::MIN / -1 fails here.
        let quotient = l.checked_div(r).ok_or_else(|| self.overflow())?;
        if l % r != 0 && ((l < 0) != (r < 0)) {
            Ok(quotient - 1)
        } else {
            Ok(quotient)
        }
    }

    fn overflow(&self) -> CalcError {
        CalcError::arithmetic(self.span.clone(), "integer overflow".to_string())
    }
}

/// Evaluate a tree with errors reported against `0..0`.
pub fn evaluate(expr: &Expr) -> Result<i64, CalcError> {
    Evaluator::new(Span::new(0, 0)).evaluate(expr)
}
