//! Parser module
//!
//! Recursive descent for statements, Pratt binding powers for expressions.
//! This module provides the main entry points for parsing tokens into AST.

pub mod ast;
pub mod parser_state;
pub mod pratt;
pub mod printer;
pub mod statements;
pub mod visitor;
#[cfg(test)]
pub mod tests;

// Re-export commonly used items
pub use ast::*;
pub use parser_state::{ParseError, ParseResult, ParserState};
pub use pratt::*;
pub use printer::AstPrinter;
pub use statements::StatementParser;
pub use visitor::Visitor;

// Re-export lexer tokens
pub use crate::frontend::core::lexer::tokens::*;
pub use crate::util::span::Span;

use tracing::debug;

/// Parse tokens into a `StmtKind::Program` statement
///
/// Parsing stops at the first error; no partial tree is returned.
///
/// # Example
/// ```text
/// program demo;
/// begin
///     print(1 + 2);
/// end.
/// ```
pub fn parse(tokens: &[Token]) -> Result<Stmt, ParseError> {
    let mut state = ParserState::new(tokens);

    match statements::parse_program(&mut state) {
        Ok(program) => Ok(program),
        Err(error) => {
            debug!("Parse failed: {}", error);
            state.error(error);
            state.synchronize();
            Err(state
                .first_error()
                .cloned()
                .unwrap_or_else(|| state.unexpected()))
        }
    }
}

/// Parse a single expression, requiring the whole token stream to be consumed
pub fn parse_expression(tokens: &[Token]) -> Result<ExprRef, ParseError> {
    let mut state = ParserState::new(tokens);
    let expr = state.parse_expression(BP_LOWEST)?;

    if !state.at_end() {
        return Err(state.unexpected());
    }
    Ok(expr)
}
