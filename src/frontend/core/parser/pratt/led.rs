//! Infix expression parsing (led - left denotation)

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};
use crate::frontend::core::parser::pratt::precedence::*;
use std::rc::Rc;

/// Extension trait for infix parsing
pub trait InfixParser {
    /// Consume the infix operator at the cursor and build the node with `lhs`
    fn parse_infix(
        &mut self,
        lhs: ExprRef,
        bp: u8,
        op: InfixOp,
    ) -> ParseResult<ExprRef>;
}

impl InfixParser for ParserState<'_> {
    fn parse_infix(
        &mut self,
        lhs: ExprRef,
        bp: u8,
        op: InfixOp,
    ) -> ParseResult<ExprRef> {
        match op {
            InfixOp::Binary(op) => self.parse_binary(lhs, bp, op),
            InfixOp::Logical(op) => self.parse_logical(lhs, bp, op),
            InfixOp::Assign(op) => self.parse_assign(lhs, op),
        }
    }
}

impl ParserState<'_> {
    fn parse_binary(
        &mut self,
        left: ExprRef,
        bp: u8,
        op: BinOp,
    ) -> ParseResult<ExprRef> {
        self.bump();
        let right = self.parse_expression(bp + 1)?;
        let span = left.span().to(right.span());
        Ok(Rc::new(Expr::Binary {
            op,
            left,
            right,
            span,
        }))
    }

    fn parse_logical(
        &mut self,
        left: ExprRef,
        bp: u8,
        op: LogicalOp,
    ) -> ParseResult<ExprRef> {
        self.bump();
        let right = self.parse_expression(bp + 1)?;
        let span = left.span().to(right.span());
        Ok(Rc::new(Expr::Logical {
            op,
            left,
            right,
            span,
        }))
    }

    /// `name = value` and the compound forms, which desugar to
    /// `name = name <op> value`
    fn parse_assign(
        &mut self,
        target: ExprRef,
        compound: Option<BinOp>,
    ) -> ParseResult<ExprRef> {
        let line = self.line();
        let (name, name_span) = match &*target {
            Expr::Variable(name, span) => (name.clone(), *span),
            _ => return Err(ParseError::message("Invalid assignment target", line)),
        };
        self.bump();

        // right associative: `a = b = c` is `a = (b = c)`
        let rhs = self.parse_expression(BP_ASSIGN)?;
        let span = name_span.to(rhs.span());

        let value = match compound {
            Some(op) => Rc::new(Expr::Binary {
                op,
                left: target,
                right: rhs,
                span,
            }),
            None => rhs,
        };

        Ok(Rc::new(Expr::Assign { name, value, span }))
    }
}
