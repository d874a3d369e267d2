//! Statement parsing modules
//! Contains specialized modules for different statement types

pub mod control_flow;
pub mod declarations;

pub use control_flow::*;
pub use declarations::*;

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};

/// Statement parsing entry points
pub trait StatementParser {
    /// Parse a single statement
    fn parse_statement(&mut self) -> ParseResult<Stmt>;

    /// Parse a variable declaration or, failing that, a statement
    fn parse_declaration(&mut self) -> ParseResult<Stmt>;
}

impl StatementParser for ParserState<'_> {
    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let start_span = self.span();

        match self.kind() {
            TokenKind::KwPrint => control_flow::parse_print_stmt(self, start_span),
            TokenKind::KwBegin => control_flow::parse_block_stmt(self, start_span),
            TokenKind::IdProcedure(name) => {
                let name = name.clone();
                declarations::parse_procedure_call(self, name)
            }
            TokenKind::KwSwitch => control_flow::parse_switch_stmt(self, start_span),
            TokenKind::KwRepeat => control_flow::parse_repeat_stmt(self, start_span),
            TokenKind::KwFor => control_flow::parse_for_stmt(self, start_span),
            TokenKind::KwBreak => control_flow::parse_break_stmt(self, start_span),
            TokenKind::KwContinue => control_flow::parse_continue_stmt(self, start_span),
            TokenKind::KwLoop => control_flow::parse_loop_stmt(self, start_span),
            TokenKind::KwIf => control_flow::parse_if_stmt(self, start_span),
            TokenKind::KwWhile => control_flow::parse_while_stmt(self, start_span),
            TokenKind::KwReturn => control_flow::parse_return_stmt(self, start_span),
            TokenKind::KwProcedure | TokenKind::KwFunction | TokenKind::KwProcess => {
                Err(ParseError::message(
                    "Routines can only be declared before the main block",
                    self.line(),
                ))
            }
            TokenKind::Eof => Err(ParseError::message(
                "Unexpected end of input",
                self.line(),
            )),
            _ => declarations::parse_expr_stmt(self, start_span),
        }
    }

    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        if self.kind().is_type_keyword() {
            let span = self.span();
            declarations::parse_var_decl(self, span)
        } else {
            self.parse_statement()
        }
    }
}
