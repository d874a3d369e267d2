//! Operator dispatch
//!
//! Maps AST operators onto `Literal` operations and turns operator failures
//! into diagnostics plus a fallback value. None of these are fatal.

use crate::frontend::core::parser::ast::{BinOp, LogicalOp, UnOp};
use crate::runtime::literal::{ArithOp, CmpOp, Literal, OpError};
use tracing::{error, warn};

fn arith_op(op: BinOp) -> Option<ArithOp> {
    match op {
        BinOp::Add => Some(ArithOp::Add),
        BinOp::Sub => Some(ArithOp::Sub),
        BinOp::Mul => Some(ArithOp::Mul),
        BinOp::Div => Some(ArithOp::Div),
        BinOp::Mod => Some(ArithOp::Mod),
        BinOp::Pow => Some(ArithOp::Pow),
        _ => None,
    }
}

fn cmp_op(op: BinOp) -> Option<CmpOp> {
    match op {
        BinOp::Lt => Some(CmpOp::Lt),
        BinOp::Le => Some(CmpOp::Le),
        BinOp::Gt => Some(CmpOp::Gt),
        BinOp::Ge => Some(CmpOp::Ge),
        _ => None,
    }
}

/// Apply a binary operator.
///
/// Arithmetic failures yield the left operand, failed comparisons yield
/// `false`, and failed `!=` yields `true`.
pub(super) fn binary(
    op: BinOp,
    left: Literal,
    right: &Literal,
    line: usize,
) -> Literal {
    if let Some(arith) = arith_op(op) {
        return match left.arithmetic(arith, right) {
            Ok(value) => value,
            Err(OpError::DivisionByZero) => {
                warn!(
                    "Division by zero in {} {} {} at line: {}",
                    left.describe(),
                    op.symbol(),
                    right.describe(),
                    line
                );
                left
            }
            Err(OpError::Unsupported) => {
                warn!(
                    "Unsupported operation {} {} {} at line: {}",
                    left.describe(),
                    op.symbol(),
                    right.describe(),
                    line
                );
                left
            }
        };
    }

    if let Some(cmp) = cmp_op(op) {
        return match left.compare(cmp, right) {
            Ok(holds) => Literal::Bool(holds),
            Err(_) => {
                error!(
                    "Cannot compare {} {} {} at line: {}",
                    left.describe(),
                    op.symbol(),
                    right.describe(),
                    line
                );
                Literal::Bool(false)
            }
        };
    }

    let negate = op == BinOp::Neq;
    match left.equals(right) {
        Ok(equal) => Literal::Bool(equal != negate),
        Err(_) => {
            error!(
                "Cannot compare {} {} {} at line: {}",
                left.describe(),
                op.symbol(),
                right.describe(),
                line
            );
            Literal::Bool(negate)
        }
    }
}

/// `and` / `or` / `xor` over operand truthiness
pub(super) fn logical(
    op: LogicalOp,
    left: &Literal,
    right: &Literal,
) -> Literal {
    let (l, r) = (left.is_truthy(), right.is_truthy());
    Literal::Bool(match op {
        LogicalOp::And => l && r,
        LogicalOp::Or => l || r,
        LogicalOp::Xor => l != r,
    })
}

/// `-` and `!`; an unsupported operand is returned unchanged
pub(super) fn unary(
    op: UnOp,
    operand: Literal,
    line: usize,
) -> Literal {
    let result = match op {
        UnOp::Neg => operand.negate(),
        UnOp::Not => operand.not(),
        UnOp::Inc => operand.step(1),
        UnOp::Dec => operand.step(-1),
    };
    match result {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "Unsupported operation {}{} at line: {}",
                op.symbol(),
                operand.describe(),
                line
            );
            operand
        }
    }
}
