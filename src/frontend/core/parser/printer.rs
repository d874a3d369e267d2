//! S-expression rendering of the AST
//!
//! Used by the `ast` CLI command and by the parser tests to assert tree shape.

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::visitor::Visitor;

/// Renders expressions and statements as S-expressions
#[derive(Debug, Default)]
pub struct AstPrinter {
    indent: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a statement; nested blocks are split over indented lines
    pub fn print(
        &mut self,
        stmt: &Stmt,
    ) -> String {
        self.visit_stmt(stmt)
    }

    /// Render a single expression
    pub fn print_expr(
        &mut self,
        expr: &Expr,
    ) -> String {
        self.visit_expr(expr)
    }

    fn parenthesize(
        &mut self,
        head: &str,
        exprs: &[&ExprRef],
    ) -> String {
        let mut out = format!("({}", head);
        for expr in exprs {
            out.push(' ');
            out.push_str(&self.visit_expr(expr));
        }
        out.push(')');
        out
    }

    fn call(
        &mut self,
        head: &str,
        call: &Call,
    ) -> String {
        let args: Vec<&ExprRef> = call.args.iter().collect();
        self.parenthesize(&format!("{} {}", head, call.name), &args)
    }

    fn opt_expr(
        &mut self,
        expr: &Option<ExprRef>,
    ) -> String {
        match expr {
            Some(e) => self.visit_expr(e),
            None => "_".to_string(),
        }
    }

    fn nested(
        &mut self,
        stmts: &[StmtRef],
    ) -> String {
        self.indent += 1;
        let pad = "  ".repeat(self.indent);
        let body: String = stmts
            .iter()
            .map(|s| format!("\n{}{}", pad, self.visit_stmt(s)))
            .collect();
        self.indent -= 1;
        body
    }

    fn routine(
        &mut self,
        head: &str,
        decl: &RoutineDecl,
    ) -> String {
        let params: Vec<String> = decl
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name))
            .collect();
        let ret = match decl.return_type {
            Some(ty) => format!(" : {}", ty),
            None => String::new(),
        };
        let body = self.visit_stmt(&decl.body);
        format!("({} {} ({}){} {})", head, decl.name, params.join(", "), ret, body)
    }
}

impl Visitor for AstPrinter {
    type ExprOutput = String;
    type StmtOutput = String;

    fn visit_expr(
        &mut self,
        expr: &Expr,
    ) -> String {
        match expr {
            Expr::Literal(Literal::Str(s), _) => format!("\"{}\"", s),
            Expr::Literal(value, _) => value.to_string(),
            Expr::Binary {
                op, left, right, ..
            } => self.parenthesize(op.symbol(), &[left, right]),
            Expr::Logical {
                op, left, right, ..
            } => self.parenthesize(op.symbol(), &[left, right]),
            Expr::Unary {
                op,
                operand,
                prefix: true,
                ..
            } => self.parenthesize(op.symbol(), &[operand]),
            Expr::Unary { op, operand, .. } => {
                self.parenthesize(&format!("post{}", op.symbol()), &[operand])
            }
            Expr::Grouping(inner, _) => self.parenthesize("group", &[inner]),
            Expr::Variable(name, _) => name.clone(),
            Expr::Assign { name, value, .. } => self.parenthesize(&format!("= {}", name), &[value]),
            Expr::Now(_) => "now".to_string(),
            Expr::FunctionCall(call) => self.call("call", call),
            Expr::NativeCall(call) => self.call("native", call),
            Expr::ProcessCall(call) => self.call("spawn", call),
        }
    }

    fn visit_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> String {
        match &stmt.kind {
            StmtKind::Program(program) => {
                let mut parts = program.declarations.clone();
                parts.push(program.body.clone());
                format!("(program {}{})", program.name, self.nested(&parts))
            }
            StmtKind::Block(stmts) => format!("(block{})", self.nested(stmts)),
            StmtKind::VarDecl {
                ty,
                names,
                initializer,
            } => {
                let names: Vec<&str> = names.iter().map(|n| n.value.as_str()).collect();
                match initializer {
                    Some(init) => format!("(var {} {} = {})", ty, names.join(" "), self.visit_expr(init)),
                    None => format!("(var {} {})", ty, names.join(" ")),
                }
            }
            StmtKind::Print(value) => self.parenthesize("print", &[value]),
            StmtKind::Expression(expr) => self.parenthesize("expr", &[expr]),
            StmtKind::If {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            } => {
                let mut out = format!(
                    "(if {} {}",
                    self.visit_expr(condition),
                    self.visit_stmt(then_branch)
                );
                for branch in elif_branches {
                    out.push_str(&format!(
                        " (elif {} {})",
                        self.visit_expr(&branch.condition),
                        self.visit_stmt(&branch.body)
                    ));
                }
                if let Some(else_branch) = else_branch {
                    out.push_str(&format!(" (else {})", self.visit_stmt(else_branch)));
                }
                out.push(')');
                out
            }
            StmtKind::While { condition, body } => {
                format!("(while {} {})", self.visit_expr(condition), self.visit_stmt(body))
            }
            StmtKind::Repeat { body, condition } => {
                format!("(repeat {} {})", self.visit_stmt(body), self.visit_expr(condition))
            }
            StmtKind::Loop(body) => format!("(loop {})", self.visit_stmt(body)),
            StmtKind::For {
                initializer,
                condition,
                step,
                body,
            } => {
                let init = match initializer {
                    Some(init) => self.visit_stmt(init),
                    None => "_".to_string(),
                };
                format!(
                    "(for {} {} {} {})",
                    init,
                    self.opt_expr(condition),
                    self.opt_expr(step),
                    self.visit_stmt(body)
                )
            }
            StmtKind::Switch {
                subject,
                cases,
                default,
            } => {
                let mut out = format!("(switch {}", self.visit_expr(subject));
                for case in cases {
                    out.push_str(&format!(
                        " (case {} {})",
                        self.visit_expr(&case.value),
                        self.visit_stmt(&case.body)
                    ));
                }
                if let Some(default) = default {
                    out.push_str(&format!(" (default {})", self.visit_stmt(default)));
                }
                out.push(')');
                out
            }
            StmtKind::Break => "(break)".to_string(),
            StmtKind::Continue => "(continue)".to_string(),
            StmtKind::Return(value) => match value {
                Some(value) => self.parenthesize("return", &[value]),
                None => "(return)".to_string(),
            },
            StmtKind::ProcedureDecl(decl) => self.routine("procedure", decl),
            StmtKind::FunctionDecl(decl) => self.routine("function", decl),
            StmtKind::ProcessDecl(decl) => self.routine("process", decl),
            StmtKind::ProcedureCall(call) => self.call("call", call),
        }
    }
}
