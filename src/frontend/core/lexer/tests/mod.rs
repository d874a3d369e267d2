//! Lexer tests module
//!
//! - basic: identifiers, whitespace, lexemes and lines
//! - literals: numbers and strings
//! - operators: single and double character operators
//! - keywords: keyword table and case-insensitivity
//! - comments: line and block comments
//! - classification: procedure/function/process identifier tagging
//! - errors: fatal lexical errors and delimiter balance
//! - properties: quickcheck lexeme preservation

mod classification;
mod literals;

use crate::frontend::core::lexer::{tokenize, TokenKind};

/// Kinds of a source's tokens, without the trailing `Eof`
pub(super) fn kinds(source: &str) -> Vec<TokenKind> {
    let mut tokens = tokenize(source).unwrap();
    assert_eq!(tokens.pop().map(|t| t.kind), Some(TokenKind::Eof));
    tokens.into_iter().map(|t| t.kind).collect()
}
