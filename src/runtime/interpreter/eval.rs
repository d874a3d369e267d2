//! Expression evaluation

use super::{ops, Interpreter, STACK_RED_ZONE, STACK_SEGMENT};
use crate::frontend::core::parser::ast::{Expr, UnOp};
use crate::runtime::errors::{EvalResult, RuntimeError};
use crate::runtime::literal::Literal;
use tracing::{error, warn};

impl Interpreter {
    /// Evaluate an expression. Only call failures are fatal; everything
    /// else degrades to a logged fallback value.
    pub(crate) fn evaluate(
        &mut self,
        expr: &Expr,
    ) -> EvalResult {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || self.evaluate_expr(expr))
    }

    fn evaluate_expr(
        &mut self,
        expr: &Expr,
    ) -> EvalResult {
        match expr {
            Expr::Literal(value, _) => Ok(value.clone()),
            Expr::Grouping(inner, _) => self.evaluate(inner),
            Expr::Variable(name, span) => Ok(self.read_variable(name, span.line())),
            Expr::Assign { name, value, span } => {
                let value = self.evaluate(value)?;
                Ok(self.assign_variable(name, value, span.line()))
            }
            Expr::Binary {
                op,
                left,
                right,
                span,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(ops::binary(*op, left, &right, span.line()))
            }
            Expr::Logical {
                op, left, right, ..
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(ops::logical(*op, &left, &right))
            }
            Expr::Unary {
                op: op @ (UnOp::Inc | UnOp::Dec),
                operand,
                prefix,
                span,
            } => self.increment(*op, operand, *prefix, span.line()),
            Expr::Unary {
                op, operand, span, ..
            } => {
                let value = self.evaluate(operand)?;
                Ok(ops::unary(*op, value, span.line()))
            }
            Expr::Now(_) => Ok(self.now()),
            Expr::FunctionCall(call) => self.call_function(call),
            Expr::NativeCall(call) => self.call_native(call),
            Expr::ProcessCall(call) => self.call_process(call),
        }
    }

    fn read_variable(
        &self,
        name: &str,
        line: usize,
    ) -> Literal {
        self.env.get(name).unwrap_or_else(|| {
            warn!("Undefined variable '{}' at line: {}", name, line);
            Literal::Int(0)
        })
    }

    /// Store `value` and yield it. The variable must hold the same kind;
    /// a mismatch or an undefined target warns and binds nothing.
    fn assign_variable(
        &mut self,
        name: &str,
        value: Literal,
        line: usize,
    ) -> Literal {
        let Some(cell) = self.env.get_ref(name) else {
            warn!("Assignment to undefined variable '{}' at line: {}", name, line);
            return value;
        };
        let mut slot = cell.borrow_mut();
        if !slot.assign(&value) {
            warn!(
                "Cannot assign {} to {} variable '{}' at line: {}",
                value.describe(),
                slot.kind(),
                name,
                line
            );
        }
        value
    }

    /// `++` / `--` in place. Prefix yields the new value, postfix the old one.
    fn increment(
        &mut self,
        op: UnOp,
        operand: &Expr,
        prefix: bool,
        line: usize,
    ) -> EvalResult {
        let Expr::Variable(name, _) = operand else {
            return Err(RuntimeError::InvalidTarget {
                op: op.symbol(),
                line,
            });
        };
        let Some(cell) = self.env.get_ref(name) else {
            error!("Undefined variable '{}' for '{}' at line: {}", name, op.symbol(), line);
            return Ok(Literal::Int(0));
        };

        let delta = if op == UnOp::Inc { 1 } else { -1 };
        let mut slot = cell.borrow_mut();
        let old = slot.clone();
        match old.step(delta) {
            Ok(new) => {
                *slot = new.clone();
                Ok(if prefix { new } else { old })
            }
            Err(_) => {
                warn!(
                    "Operator '{}' needs a number, '{}' is {} at line: {}",
                    op.symbol(),
                    name,
                    old.describe(),
                    line
                );
                Ok(old)
            }
        }
    }
}
