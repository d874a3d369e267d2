//! Pratt parser implementation
//! Expression parsing by binding power over the precedence ladder

pub mod led;
pub mod nud;
pub mod precedence;

pub use led::InfixParser;
pub use precedence::*;

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, ParserState};

impl ParserState<'_> {
    /// Parse an expression whose infix operators bind at least as tightly
    /// as `min_bp`
    pub fn parse_expression(
        &mut self,
        min_bp: u8,
    ) -> ParseResult<ExprRef> {
        let mut left = self.parse_prefix()?;

        while let Some((left_bp, op)) = infix_binding(self.kind()) {
            if left_bp < min_bp {
                break;
            }
            left = self.parse_infix(left, left_bp, op)?;
        }

        Ok(left)
    }
}
