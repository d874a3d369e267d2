//! Statement execution

use super::{Interpreter, RoutineKind, STACK_RED_ZONE, STACK_SEGMENT};
use crate::frontend::core::parser::ast::{
    ElifBranch, Expr, ExprRef, Stmt, StmtKind, StmtRef, SwitchCase,
};
use crate::runtime::environment::Environment;
use crate::runtime::errors::{ExecResult, Flow, RuntimeError};
use crate::runtime::literal::{Literal, LiteralKind};
use crate::util::Spanned;
use tracing::warn;

/// What a loop does after one run of its body
enum LoopControl {
    Next,
    Exit,
    Propagate(Flow),
}

impl From<Flow> for LoopControl {
    fn from(flow: Flow) -> Self {
        match flow {
            Flow::Normal | Flow::Continue => LoopControl::Next,
            Flow::Break => LoopControl::Exit,
            flow @ Flow::Return(_) => LoopControl::Propagate(flow),
        }
    }
}

impl Interpreter {
    /// Execute one statement in the active scope
    pub(crate) fn execute(
        &mut self,
        stmt: &Stmt,
    ) -> ExecResult {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || self.execute_stmt(stmt))
    }

    fn execute_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> ExecResult {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                let scope = Environment::with_parent(&self.env);
                self.execute_in(stmts, &scope)
            }
            StmtKind::Program(_) => {
                self.run_program(stmt)?;
                Ok(Flow::Normal)
            }
            StmtKind::VarDecl {
                ty,
                names,
                initializer,
            } => {
                self.declare_variables(*ty, names, initializer.as_ref())?;
                Ok(Flow::Normal)
            }
            StmtKind::Print(expr) => {
                let value = self.evaluate(expr)?;
                self.print(&value);
                Ok(Flow::Normal)
            }
            StmtKind::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }
            StmtKind::If {
                condition,
                then_branch,
                elif_branches,
                else_branch,
            } => self.execute_if(condition, then_branch, elif_branches, else_branch.as_ref()),
            StmtKind::While { condition, body } => {
                while self.condition(condition)? {
                    match LoopControl::from(self.execute(body)?) {
                        LoopControl::Next => {}
                        LoopControl::Exit => break,
                        LoopControl::Propagate(flow) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::Repeat { body, condition } => {
                loop {
                    match LoopControl::from(self.execute(body)?) {
                        LoopControl::Next => {}
                        LoopControl::Exit => break,
                        LoopControl::Propagate(flow) => return Ok(flow),
                    }
                    if self.condition(condition)? {
                        break;
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::Loop(body) => {
                loop {
                    match LoopControl::from(self.execute(body)?) {
                        LoopControl::Next => {}
                        LoopControl::Exit => break,
                        LoopControl::Propagate(flow) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            StmtKind::For {
                initializer,
                condition,
                step,
                body,
            } => {
                let scope = Environment::with_parent(&self.env);
                let previous = std::mem::replace(&mut self.env, scope);
                let result = self.execute_for(initializer.as_ref(), condition.as_ref(), step.as_ref(), body);
                self.env = previous;
                result
            }
            StmtKind::Switch {
                subject,
                cases,
                default,
            } => self.execute_switch(subject, cases, default.as_ref()),
            StmtKind::Break => Ok(Flow::Break),
            StmtKind::Continue => Ok(Flow::Continue),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };
                Ok(Flow::Return(value))
            }
            StmtKind::ProcedureDecl(decl) => {
                self.declare_routine(RoutineKind::Procedure, decl)?;
                Ok(Flow::Normal)
            }
            StmtKind::FunctionDecl(decl) => {
                self.declare_routine(RoutineKind::Function, decl)?;
                Ok(Flow::Normal)
            }
            StmtKind::ProcessDecl(decl) => {
                self.declare_routine(RoutineKind::Process, decl)?;
                Ok(Flow::Normal)
            }
            StmtKind::ProcedureCall(call) => {
                self.call_procedure(call)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn condition(
        &mut self,
        expr: &Expr,
    ) -> Result<bool, RuntimeError> {
        Ok(self.evaluate(expr)?.is_truthy())
    }

    /// Bind every name to the shared initializer, converted to `ty`
    fn declare_variables(
        &mut self,
        ty: LiteralKind,
        names: &[Spanned<String>],
        initializer: Option<&ExprRef>,
    ) -> Result<(), RuntimeError> {
        let value = match initializer {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                value.convert(ty).unwrap_or_else(|| {
                    warn!(
                        "Cannot initialize {} variable with {} at line: {}",
                        ty,
                        value.describe(),
                        expr.line()
                    );
                    Literal::default_for(ty)
                })
            }
            None => Literal::default_for(ty),
        };

        for name in names {
            if !self.env.define(name, value.clone()) {
                return Err(RuntimeError::Redefinition {
                    name: name.value.clone(),
                    line: name.span.line(),
                });
            }
        }
        Ok(())
    }

    fn execute_if(
        &mut self,
        condition: &Expr,
        then_branch: &Stmt,
        elif_branches: &[ElifBranch],
        else_branch: Option<&StmtRef>,
    ) -> ExecResult {
        if self.condition(condition)? {
            return self.execute(then_branch);
        }
        for branch in elif_branches {
            if self.condition(&branch.condition)? {
                return self.execute(&branch.body);
            }
        }
        match else_branch {
            Some(body) => self.execute(body),
            None => Ok(Flow::Normal),
        }
    }

    /// Runs inside the loop's own scope; `continue` still runs the step
    fn execute_for(
        &mut self,
        initializer: Option<&StmtRef>,
        condition: Option<&ExprRef>,
        step: Option<&ExprRef>,
        body: &Stmt,
    ) -> ExecResult {
        if let Some(init) = initializer {
            self.execute(init)?;
        }
        loop {
            if let Some(condition) = condition {
                if !self.condition(condition)? {
                    break;
                }
            }
            match LoopControl::from(self.execute(body)?) {
                LoopControl::Next => {}
                LoopControl::Exit => break,
                LoopControl::Propagate(flow) => return Ok(flow),
            }
            if let Some(step) = step {
                self.evaluate(step)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// First matching case runs; control flow passes through to the
    /// enclosing statement
    fn execute_switch(
        &mut self,
        subject: &Expr,
        cases: &[SwitchCase],
        default: Option<&StmtRef>,
    ) -> ExecResult {
        let value = self.evaluate(subject)?;
        for case in cases {
            let candidate = self.evaluate(&case.value)?;
            if value.matches(&candidate) {
                return self.execute(&case.body);
            }
        }
        match default {
            Some(body) => self.execute(body),
            None => Ok(Flow::Normal),
        }
    }
}
