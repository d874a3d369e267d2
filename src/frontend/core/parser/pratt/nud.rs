//! Prefix expression parsing (nud - null denotation)
//!
//! Literals, grouping, unary operators, variables and the three call forms.

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};
use crate::frontend::core::parser::pratt::precedence::*;
use crate::util::span::Span;
use std::rc::Rc;

impl ParserState<'_> {
    /// Parse a prefix expression
    pub(crate) fn parse_prefix(&mut self) -> ParseResult<ExprRef> {
        let span = self.span();
        let expr = match self.kind().clone() {
            TokenKind::IntLiteral(n) => self.literal(Literal::Int(n), span),
            TokenKind::FloatLiteral(n) => self.literal(Literal::Float(n), span),
            TokenKind::StringLiteral(s) => self.literal(Literal::Str(s), span),
            TokenKind::BoolLiteral(b) => self.literal(Literal::Bool(b), span),
            TokenKind::KwNow => {
                self.bump();
                Expr::Now(span)
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression(BP_LOWEST)?;
                self.expect(&TokenKind::RParen)?;
                Expr::Grouping(inner, span.to(self.previous_span()))
            }
            TokenKind::Minus => self.parse_unary(UnOp::Neg)?,
            TokenKind::Bang | TokenKind::KwNot => self.parse_unary(UnOp::Not)?,
            TokenKind::PlusPlus => self.parse_unary(UnOp::Inc)?,
            TokenKind::MinusMinus => self.parse_unary(UnOp::Dec)?,
            TokenKind::Identifier(name) => self.parse_identifier(name)?,
            TokenKind::IdFunction(name) => Expr::FunctionCall(self.parse_call(name)?),
            TokenKind::IdProcess(name) => Expr::ProcessCall(self.parse_call(name)?),
            TokenKind::IdProcedure(name) => {
                return Err(ParseError::message(
                    format!("Procedure '{}' cannot be used as a value", name),
                    span.line(),
                ))
            }
            _ => return Err(self.unexpected()),
        };
        Ok(Rc::new(expr))
    }

    fn literal(
        &mut self,
        value: Literal,
        span: Span,
    ) -> Expr {
        self.bump();
        Expr::Literal(value, span)
    }

    /// `- x`, `! x`, `not x`, `++ x`, `-- x`
    fn parse_unary(
        &mut self,
        op: UnOp,
    ) -> ParseResult<Expr> {
        let span = self.span();
        self.bump();
        let operand = self.parse_expression(BP_UNARY)?;

        if matches!(op, UnOp::Inc | UnOp::Dec) && !matches!(*operand, Expr::Variable(..)) {
            return Err(ParseError::message(
                format!("Operator '{}' requires a variable", op.symbol()),
                span.line(),
            ));
        }

        Ok(Expr::Unary {
            op,
            operand,
            prefix: true,
            span,
        })
    }

    /// Variable reference, postfix `++`/`--`, or a native call `name(args)`
    fn parse_identifier(
        &mut self,
        name: String,
    ) -> ParseResult<Expr> {
        let span = self.span();

        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
            return Ok(Expr::NativeCall(self.parse_call(name)?));
        }

        self.bump();
        let op = match self.kind() {
            TokenKind::PlusPlus => UnOp::Inc,
            TokenKind::MinusMinus => UnOp::Dec,
            _ => return Ok(Expr::Variable(name, span)),
        };
        self.bump();

        Ok(Expr::Unary {
            op,
            operand: Rc::new(Expr::Variable(name, span)),
            prefix: false,
            span: span.to(self.previous_span()),
        })
    }

    /// `name ( [expr {, expr}] )`; the callee token is current
    pub(crate) fn parse_call(
        &mut self,
        name: String,
    ) -> ParseResult<Call> {
        let span = self.span();
        self.bump();
        let args = self.parse_call_args()?;
        Ok(Call::new(name, args, span.to(self.previous_span())))
    }

    /// Parenthesised, comma separated argument list
    pub(crate) fn parse_call_args(&mut self) -> ParseResult<Vec<ExprRef>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();

        if self.skip(&TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression(BP_LOWEST)?);
            if self.skip(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RParen)?;
            return Ok(args);
        }
    }
}
