//! Declaration statement parsing
//! Program header, variables, routines, procedure calls and expression statements

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::statements::control_flow;
use crate::util::span::Span;
use crate::util::Spanned;
use std::rc::Rc;

/// Map a type keyword to the literal kind it declares
pub fn type_of(kind: &TokenKind) -> Option<LiteralKind> {
    match kind {
        TokenKind::KwInt => Some(LiteralKind::Int),
        TokenKind::KwFloat => Some(LiteralKind::Float),
        TokenKind::KwByte => Some(LiteralKind::Byte),
        TokenKind::KwString => Some(LiteralKind::String),
        TokenKind::KwBool => Some(LiteralKind::Bool),
        _ => None,
    }
}

fn expect_type(state: &mut ParserState<'_>) -> ParseResult<LiteralKind> {
    match type_of(state.kind()) {
        Some(ty) => {
            state.bump();
            Ok(ty)
        }
        None => Err(ParseError::message(
            format!("Expected a type, found {}", state.kind()),
            state.line(),
        )),
    }
}

/// Parse the whole source: `program NAME ; decl* begin … end .`
pub fn parse_program(state: &mut ParserState<'_>) -> ParseResult<Stmt> {
    let span = state.span();
    state.expect(&TokenKind::KwProgram)?;
    let name = state.expect_name("program name")?;
    state.expect(&TokenKind::Semicolon)?;

    let mut declarations = Vec::new();
    while !state.at(&TokenKind::KwBegin) && !state.at_end() {
        if state.skip(&TokenKind::Semicolon) {
            continue;
        }
        declarations.push(Rc::new(parse_top_level(state)?));
    }

    let body_span = state.span();
    let body = Rc::new(control_flow::parse_block_stmt(state, body_span)?);
    state.expect(&TokenKind::Dot)?;

    if !state.at_end() {
        return Err(ParseError::message(
            format!("Unexpected {} after end of program", state.kind()),
            state.line(),
        ));
    }

    Ok(Stmt::new(
        StmtKind::Program(Program {
            name,
            declarations,
            body,
        }),
        span.to(state.previous_span()),
    ))
}

/// Declarations allowed between the program header and the main block:
/// routines and global variables
fn parse_top_level(state: &mut ParserState<'_>) -> ParseResult<Stmt> {
    let span = state.span();
    match state.kind() {
        TokenKind::KwProcedure => parse_routine(state, span, RoutineKind::Procedure),
        TokenKind::KwFunction => parse_routine(state, span, RoutineKind::Function),
        TokenKind::KwProcess => parse_routine(state, span, RoutineKind::Process),
        kind if kind.is_type_keyword() => parse_var_decl(state, span),
        _ => Err(ParseError::message(
            format!("Expected a declaration or 'begin', found {}", state.kind()),
            state.line(),
        )),
    }
}

/// Parse variable declaration: `type a [, b …] [= expr] ;`
///
/// All names share the initializer.
pub fn parse_var_decl(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    let ty = expect_type(state)?;

    let mut names = Vec::new();
    loop {
        let name_span = state.span();
        let name = match state.kind() {
            TokenKind::Identifier(name) => name.clone(),
            _ => {
                return Err(ParseError::message(
                    format!("Expected variable name, found {}", state.kind()),
                    state.line(),
                ))
            }
        };
        state.bump();
        names.push(Spanned::new(name, name_span));

        if !state.skip(&TokenKind::Comma) {
            break;
        }
    }

    let initializer = if state.skip(&TokenKind::Eq) {
        Some(state.parse_expression(BP_LOWEST)?)
    } else {
        None
    };
    state.expect(&TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::VarDecl {
            ty,
            names,
            initializer,
        },
        span.to(state.previous_span()),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoutineKind {
    Procedure,
    Function,
    Process,
}

/// Parse a routine declaration
///
/// `procedure NAME ( params ) body`, `function NAME ( params ) : type body`,
/// `process NAME ( params ) body`. The body must be a `begin … end` block.
fn parse_routine(
    state: &mut ParserState<'_>,
    span: Span,
    kind: RoutineKind,
) -> ParseResult<Stmt> {
    state.bump(); // consume 'procedure' / 'function' / 'process'
    let name = state.expect_name("routine name")?;
    let params = parse_params(state)?;

    let return_type = if kind == RoutineKind::Function {
        state.expect(&TokenKind::Colon)?;
        Some(expect_type(state)?)
    } else {
        None
    };

    if !state.at(&TokenKind::KwBegin) {
        return Err(ParseError::ExpectedToken {
            expected: TokenKind::KwBegin,
            found: state.kind().clone(),
            line: state.line(),
        });
    }
    let body_span = state.span();
    let body = Rc::new(control_flow::parse_block_stmt(state, body_span)?);

    let decl = Rc::new(RoutineDecl {
        name,
        params,
        return_type,
        body,
        span: span.to(state.previous_span()),
    });
    let stmt_kind = match kind {
        RoutineKind::Procedure => StmtKind::ProcedureDecl(decl),
        RoutineKind::Function => StmtKind::FunctionDecl(decl),
        RoutineKind::Process => StmtKind::ProcessDecl(decl),
    };
    Ok(Stmt::new(stmt_kind, span.to(state.previous_span())))
}

/// `( [type name {, type name}] )`
fn parse_params(state: &mut ParserState<'_>) -> ParseResult<Vec<Param>> {
    state.expect(&TokenKind::LParen)?;
    let mut params: Vec<Param> = Vec::new();

    if state.skip(&TokenKind::RParen) {
        return Ok(params);
    }

    loop {
        let ty = expect_type(state)?;
        let line = state.line();
        let name = match state.kind() {
            TokenKind::Identifier(name) => name.clone(),
            _ => {
                return Err(ParseError::message(
                    format!("Expected parameter name, found {}", state.kind()),
                    line,
                ))
            }
        };
        state.bump();

        if params.iter().any(|p| p.name == name) {
            return Err(ParseError::message(
                format!("Duplicate parameter '{}'", name),
                line,
            ));
        }
        params.push(Param::new(name, ty));

        if !state.skip(&TokenKind::Comma) {
            break;
        }
    }
    state.expect(&TokenKind::RParen)?;

    Ok(params)
}

/// Parse procedure call statement: `NAME ( args ) ;`
pub fn parse_procedure_call(
    state: &mut ParserState<'_>,
    name: String,
) -> ParseResult<Stmt> {
    let call = state.parse_call(name)?;
    state.expect(&TokenKind::Semicolon)?;
    let span = call.span;
    Ok(Stmt::new(StmtKind::ProcedureCall(call), span))
}

/// Parse expression statement: `expr ;`
pub fn parse_expr_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Stmt> {
    let expr = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::Semicolon)?;
    Ok(Stmt::new(StmtKind::Expression(expr), span.to(state.previous_span())))
}
