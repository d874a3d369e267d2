//! Routine, native and process calls

use super::Interpreter;
use crate::frontend::core::parser::ast::{Call, ExprRef, RoutineDecl, StmtKind};
use crate::runtime::environment::Environment;
use crate::runtime::errors::{EvalResult, Flow, RuntimeError};
use crate::runtime::literal::Literal;
use crate::runtime::native::{ExecutionContext, NativeArgs, MAX_NATIVE_ARGS};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// Default deepest nesting of procedure and function frames
pub const MAX_CALL_DEPTH: usize = 1000;

/// Declaration kind of a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineKind {
    Procedure,
    Function,
    Process,
}

impl fmt::Display for RoutineKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            RoutineKind::Procedure => "procedure",
            RoutineKind::Function => "function",
            RoutineKind::Process => "process",
        };
        f.write_str(name)
    }
}

/// A declared procedure, function or process
#[derive(Debug, Clone)]
pub struct Routine {
    pub kind: RoutineKind,
    pub decl: Rc<RoutineDecl>,
}

impl Interpreter {
    /// Add a routine to the routine table. Names are unique across all
    /// three kinds.
    pub(super) fn declare_routine(
        &mut self,
        kind: RoutineKind,
        decl: &Rc<RoutineDecl>,
    ) -> Result<(), RuntimeError> {
        if self.routines.contains_key(&decl.name) {
            return Err(RuntimeError::DuplicateDeclaration {
                name: decl.name.clone(),
                line: decl.span.line(),
            });
        }
        debug!("Declared {} '{}'/{}", kind, decl.name, decl.arity());
        self.routines.insert(
            decl.name.clone(),
            Routine {
                kind,
                decl: Rc::clone(decl),
            },
        );
        Ok(())
    }

    fn lookup_routine(
        &self,
        call: &Call,
    ) -> Result<Routine, RuntimeError> {
        self.routines
            .get(&call.name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedCallee {
                name: call.name.clone(),
                line: call.line(),
            })
    }

    /// `name(args);` as a statement. A function's value is discarded.
    pub(super) fn call_procedure(
        &mut self,
        call: &Call,
    ) -> Result<(), RuntimeError> {
        let routine = self.lookup_routine(call)?;
        self.call_routine(&routine, call)?;
        Ok(())
    }

    pub(super) fn call_function(
        &mut self,
        call: &Call,
    ) -> EvalResult {
        let routine = self.lookup_routine(call)?;
        self.call_routine(&routine, call)
    }

    pub(super) fn call_process(
        &mut self,
        call: &Call,
    ) -> EvalResult {
        let routine = self.lookup_routine(call)?;
        self.call_routine(&routine, call)
    }

    /// Registered native first, then a routine declared further down the
    /// source
    pub(super) fn call_native(
        &mut self,
        call: &Call,
    ) -> EvalResult {
        let Some((func, arity)) = self.natives.get(&call.name).map(|n| (n.func, n.arity)) else {
            if let Some(routine) = self.routines.get(&call.name).cloned() {
                debug!("'{}' resolved to {} declaration", call.name, routine.kind);
                return self.call_routine(&routine, call);
            }
            return Err(RuntimeError::UndefinedCallee {
                name: call.name.clone(),
                line: call.line(),
            });
        };

        if call.arity > MAX_NATIVE_ARGS {
            return Err(RuntimeError::TooManyArguments {
                name: call.name.clone(),
                found: call.arity,
                max: MAX_NATIVE_ARGS,
                line: call.line(),
            });
        }
        if let Some(expected) = arity {
            check_arity(call, expected)?;
        }

        let mut args = NativeArgs::new();
        for arg in &call.args {
            args.push(self.evaluate(arg)?);
        }

        let mut ctx = ExecutionContext::new(
            &call.name,
            call.line(),
            &args,
            &mut self.rng,
            self.current.as_ref(),
            self.scheduler.kill_requests_mut(),
        );
        Ok(func(&mut ctx, args.len()))
    }

    fn call_routine(
        &mut self,
        routine: &Routine,
        call: &Call,
    ) -> EvalResult {
        let decl = &routine.decl;
        check_arity(call, decl.arity())?;

        match routine.kind {
            RoutineKind::Process => {
                let args = self.evaluate_args(&call.args)?;
                let env = Environment::with_parent(&self.globals);
                bind_params(decl, args, &env, call.line());
                let id = self.scheduler.spawn(decl, env);
                Ok(id.into())
            }
            RoutineKind::Procedure => {
                self.invoke(decl, call)?;
                Ok(Literal::Int(0))
            }
            RoutineKind::Function => {
                let value = self.invoke(decl, call)?;
                Ok(check_return(decl, value, call.line()))
            }
        }
    }

    /// Run a procedure or function body in a fresh frame and hand back its
    /// `return` value
    fn invoke(
        &mut self,
        decl: &RoutineDecl,
        call: &Call,
    ) -> Result<Option<Literal>, RuntimeError> {
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                name: call.name.clone(),
                limit: self.max_call_depth,
                line: call.line(),
            });
        }

        let args = self.evaluate_args(&call.args)?;
        let frame = Environment::with_parent(&self.globals);
        bind_params(decl, args, &frame, call.line());

        self.call_depth += 1;
        let result = match &decl.body.kind {
            StmtKind::Block(stmts) => self.execute_in(stmts, &frame),
            _ => self.execute_in(std::slice::from_ref(&decl.body), &frame),
        };
        self.call_depth -= 1;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(None),
            flow @ (Flow::Break | Flow::Continue) => {
                debug!("{:?} escaped the body of '{}' and was ignored", flow, decl.name);
                Ok(None)
            }
        }
    }

    fn evaluate_args(
        &mut self,
        args: &[ExprRef],
    ) -> Result<Vec<Literal>, RuntimeError> {
        args.iter().map(|arg| self.evaluate(arg)).collect()
    }
}

fn check_arity(
    call: &Call,
    expected: usize,
) -> Result<(), RuntimeError> {
    if call.arity == expected {
        return Ok(());
    }
    Err(RuntimeError::ArityMismatch {
        name: call.name.clone(),
        expected,
        found: call.arity,
        line: call.line(),
    })
}

/// Bind argument values to parameters, converted to the declared kinds
fn bind_params(
    decl: &RoutineDecl,
    args: Vec<Literal>,
    env: &Environment,
    line: usize,
) {
    for (param, value) in decl.params.iter().zip(args) {
        let bound = value.convert(param.ty).unwrap_or_else(|| {
            warn!(
                "Argument {} is not convertible to {} for parameter '{}' of '{}' at line: {}",
                value.describe(),
                param.ty,
                param.name,
                decl.name,
                line
            );
            param.default.clone()
        });
        env.define(&param.name, bound);
    }
}

/// Check a function result against its declared return kind
fn check_return(
    decl: &RoutineDecl,
    value: Option<Literal>,
    line: usize,
) -> Literal {
    let Some(expected) = decl.return_type else {
        return value.unwrap_or(Literal::Int(0));
    };
    match value {
        Some(value) => {
            if value.kind() != expected {
                error!(
                    "Function '{}' returned {} but is declared {} at line: {}",
                    decl.name,
                    value.describe(),
                    expected,
                    line
                );
            }
            value
        }
        None => {
            warn!(
                "Function '{}' ended without return, using default {} at line: {}",
                decl.name, expected, line
            );
            Literal::default_for(expected)
        }
    }
}
