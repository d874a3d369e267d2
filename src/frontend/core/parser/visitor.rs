//! AST visiting contract
//!
//! A pass over the tree implements `Visitor` and picks its own result types,
//! so new passes need no changes to the node definitions.

use crate::frontend::core::parser::ast::{Expr, Stmt};

pub trait Visitor {
    type ExprOutput;
    type StmtOutput;

    fn visit_expr(
        &mut self,
        expr: &Expr,
    ) -> Self::ExprOutput;

    fn visit_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> Self::StmtOutput;
}
