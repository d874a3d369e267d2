//! Parser tests module
//!
//! - state: ParserState cursor helpers
//! - expressions: precedence, associativity and call forms
//! - statements: control flow and declarations
//! - errors: fatal parse errors and their lines

mod expressions;

use crate::frontend::core::lexer::tokenize;
use crate::frontend::core::parser::{parse, parse_expression, AstPrinter, ParseError, Stmt};

/// S-expression of a single expression source
pub(super) fn sexpr(source: &str) -> String {
    let tokens = tokenize(source).unwrap();
    let expr = parse_expression(&tokens).unwrap();
    AstPrinter::new().print_expr(&expr)
}

pub(super) fn parse_source(source: &str) -> Result<Stmt, ParseError> {
    let tokens = tokenize(source).unwrap();
    parse(&tokens)
}

/// Wrap statements in a minimal program and render the main block
pub(super) fn main_block(body: &str) -> String {
    let source = format!("program t;\nbegin\n{}\nend.", body);
    let stmt = parse_source(&source).unwrap();
    AstPrinter::new().print(&stmt)
}
