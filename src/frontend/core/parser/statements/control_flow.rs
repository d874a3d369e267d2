//! Control flow statement parsing
//! Handles blocks, conditionals, loops, switch and the jump statements

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, ParserState};
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::statements::{declarations, StatementParser};
use crate::util::span::Span;
use std::rc::Rc;

/// Parse block statement: `begin decl* end`
pub fn parse_block_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.expect(&TokenKind::KwBegin)?;

    let mut stmts = Vec::new();
    while !state.at(&TokenKind::KwEnd) && !state.at_end() {
        // stray `;` is an empty statement
        if state.skip(&TokenKind::Semicolon) {
            continue;
        }
        stmts.push(Rc::new(state.parse_declaration()?));
    }
    state.expect(&TokenKind::KwEnd)?;

    Ok(Stmt::new(StmtKind::Block(stmts), span.to(state.previous_span())))
}

/// `( expr )`, used by every conditional form
fn parse_condition(state: &mut ParserState<'_>) -> ParseResult<ExprRef> {
    state.expect(&TokenKind::LParen)?;
    let condition = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::RParen)?;
    Ok(condition)
}

fn parse_body(state: &mut ParserState<'_>) -> ParseResult<StmtRef> {
    Ok(Rc::new(state.parse_statement()?))
}

/// Parse if statement: `if ( c ) stmt [elif ( c ) stmt]* [else stmt]`
pub fn parse_if_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'if'

    let condition = parse_condition(state)?;
    let then_branch = parse_body(state)?;

    let mut elif_branches = Vec::new();
    while state.skip(&TokenKind::KwElif) {
        let condition = parse_condition(state)?;
        let body = parse_body(state)?;
        elif_branches.push(ElifBranch { condition, body });
    }

    let else_branch = if state.skip(&TokenKind::KwElse) {
        Some(parse_body(state)?)
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            then_branch,
            elif_branches,
            else_branch,
        },
        span.to(state.previous_span()),
    ))
}

/// Parse while loop: `while ( c ) stmt`
pub fn parse_while_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'while'
    let condition = parse_condition(state)?;
    let body = parse_body(state)?;
    Ok(Stmt::new(
        StmtKind::While { condition, body },
        span.to(state.previous_span()),
    ))
}

/// Parse repeat loop: `repeat stmt until ( c ) ;`
pub fn parse_repeat_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'repeat'
    let body = parse_body(state)?;
    state.expect(&TokenKind::KwUntil)?;
    let condition = parse_condition(state)?;
    state.skip(&TokenKind::Semicolon);
    Ok(Stmt::new(
        StmtKind::Repeat { body, condition },
        span.to(state.previous_span()),
    ))
}

/// Parse unconditional loop: `loop stmt`
pub fn parse_loop_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'loop'
    let body = parse_body(state)?;
    Ok(Stmt::new(StmtKind::Loop(body), span.to(state.previous_span())))
}

/// Parse for loop: `for ( [init] ; [cond] ; [step] ) stmt`
///
/// The initializer is a variable declaration or an expression statement, and
/// consumes its own `;`.
pub fn parse_for_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'for'
    state.expect(&TokenKind::LParen)?;

    let initializer = if state.skip(&TokenKind::Semicolon) {
        None
    } else if state.kind().is_type_keyword() {
        let init_span = state.span();
        Some(Rc::new(declarations::parse_var_decl(state, init_span)?))
    } else {
        let init_span = state.span();
        Some(Rc::new(declarations::parse_expr_stmt(state, init_span)?))
    };

    let condition = if state.at(&TokenKind::Semicolon) {
        None
    } else {
        Some(state.parse_expression(BP_LOWEST)?)
    };
    state.expect(&TokenKind::Semicolon)?;

    let step = if state.at(&TokenKind::RParen) {
        None
    } else {
        Some(state.parse_expression(BP_LOWEST)?)
    };
    state.expect(&TokenKind::RParen)?;

    let body = parse_body(state)?;

    Ok(Stmt::new(
        StmtKind::For {
            initializer,
            condition,
            step,
            body,
        },
        span.to(state.previous_span()),
    ))
}

/// Parse switch: `switch ( e ) begin [case e : stmt]* [default : stmt] end`
pub fn parse_switch_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'switch'
    let subject = parse_condition(state)?;
    state.expect(&TokenKind::KwBegin)?;

    let mut cases = Vec::new();
    while state.skip(&TokenKind::KwCase) {
        let value = state.parse_expression(BP_LOWEST)?;
        state.expect(&TokenKind::Colon)?;
        let body = parse_body(state)?;
        cases.push(SwitchCase { value, body });
    }

    let default = if state.skip(&TokenKind::KwDefault) {
        state.expect(&TokenKind::Colon)?;
        Some(parse_body(state)?)
    } else {
        None
    };

    state.expect(&TokenKind::KwEnd)?;

    Ok(Stmt::new(
        StmtKind::Switch {
            subject,
            cases,
            default,
        },
        span.to(state.previous_span()),
    ))
}

/// Parse break statement: `break ;`
pub fn parse_break_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'break'
    state.expect(&TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Break, span))
}

/// Parse continue statement: `continue ;`
pub fn parse_continue_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'continue'
    state.expect(&TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Continue, span))
}

/// Parse return statement: `return [expr] ;`
pub fn parse_return_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'return'

    let value = if state.at(&TokenKind::Semicolon) {
        None
    } else {
        Some(state.parse_expression(BP_LOWEST)?)
    };
    state.expect(&TokenKind::Semicolon)?;

    Ok(Stmt::new(StmtKind::Return(value), span.to(state.previous_span())))
}

/// Parse print statement: `print ( expr ) ;`
pub fn parse_print_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'print'
    state.expect(&TokenKind::LParen)?;
    let value = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::RParen)?;
    state.expect(&TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Print(value), span.to(state.previous_span())))
}
