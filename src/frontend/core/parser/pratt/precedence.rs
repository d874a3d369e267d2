//! Precedence handling for the expression parser
//!
//! Binding powers, lowest to highest:
//! assignment → or → and → xor → equality → comparison → additive →
//! multiplicative → power → unary → call.

use crate::frontend::core::lexer::tokens::TokenKind;
use crate::frontend::core::parser::ast::{BinOp, LogicalOp};

pub const BP_LOWEST: u8 = 0;
pub const BP_ASSIGN: u8 = 1;
pub const BP_OR: u8 = 2;
pub const BP_AND: u8 = 3;
pub const BP_XOR: u8 = 4;
pub const BP_EQUALITY: u8 = 5;
pub const BP_COMPARISON: u8 = 6;
pub const BP_ADDITIVE: u8 = 7;
pub const BP_MULTIPLICATIVE: u8 = 8;
pub const BP_POWER: u8 = 9;
pub const BP_UNARY: u8 = 10;
pub const BP_CALL: u8 = 11;

/// What an infix token builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Binary(BinOp),
    Logical(LogicalOp),
    /// `=`, or a compound assignment carrying its arithmetic operator
    Assign(Option<BinOp>),
}

/// Left binding power and operator of an infix token.
/// All binary levels are left associative; assignment is right associative.
pub fn infix_binding(kind: &TokenKind) -> Option<(u8, InfixOp)> {
    let entry = match kind {
        TokenKind::Eq => (BP_ASSIGN, InfixOp::Assign(None)),
        TokenKind::PlusEq => (BP_ASSIGN, InfixOp::Assign(Some(BinOp::Add))),
        TokenKind::MinusEq => (BP_ASSIGN, InfixOp::Assign(Some(BinOp::Sub))),
        TokenKind::StarEq => (BP_ASSIGN, InfixOp::Assign(Some(BinOp::Mul))),
        TokenKind::SlashEq => (BP_ASSIGN, InfixOp::Assign(Some(BinOp::Div))),
        TokenKind::KwOr => (BP_OR, InfixOp::Logical(LogicalOp::Or)),
        TokenKind::KwAnd => (BP_AND, InfixOp::Logical(LogicalOp::And)),
        TokenKind::KwXor => (BP_XOR, InfixOp::Logical(LogicalOp::Xor)),
        TokenKind::EqEq => (BP_EQUALITY, InfixOp::Binary(BinOp::Eq)),
        TokenKind::Neq => (BP_EQUALITY, InfixOp::Binary(BinOp::Neq)),
        TokenKind::Lt => (BP_COMPARISON, InfixOp::Binary(BinOp::Lt)),
        TokenKind::Le => (BP_COMPARISON, InfixOp::Binary(BinOp::Le)),
        TokenKind::Gt => (BP_COMPARISON, InfixOp::Binary(BinOp::Gt)),
        TokenKind::Ge => (BP_COMPARISON, InfixOp::Binary(BinOp::Ge)),
        TokenKind::Plus => (BP_ADDITIVE, InfixOp::Binary(BinOp::Add)),
        TokenKind::Minus => (BP_ADDITIVE, InfixOp::Binary(BinOp::Sub)),
        TokenKind::Star => (BP_MULTIPLICATIVE, InfixOp::Binary(BinOp::Mul)),
        TokenKind::Slash => (BP_MULTIPLICATIVE, InfixOp::Binary(BinOp::Div)),
        TokenKind::Percent => (BP_MULTIPLICATIVE, InfixOp::Binary(BinOp::Mod)),
        TokenKind::Caret => (BP_POWER, InfixOp::Binary(BinOp::Pow)),
        _ => return None,
    };
    Some(entry)
}
