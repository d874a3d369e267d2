//! Process definitions for the scheduler.
//!
//! A process is a spawned instance of a `process` declaration. Its body is
//! split once, at spawn time, into three segments around the first top-level
//! `loop` statement:
//!
//! - INIT: statements before the loop, run once
//! - LOOP: the loop's body, run once per tick
//! - FINAL: statements after the loop, run once after a `break`
//!
//! A body without a `loop` is all INIT.

use crate::frontend::core::parser::ast::{RoutineDecl, StmtKind, StmtRef};
use crate::runtime::environment::Environment;
use crate::runtime::errors::{Flow, RuntimeError};
use crate::runtime::interpreter::Interpreter;
use crate::runtime::literal::Literal;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Unique process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u64);

impl ProcessId {
    /// Get the inner value.
    #[inline]
    pub fn inner(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProcessId {
    fn from(val: u64) -> Self {
        Self(val)
    }
}

impl From<ProcessId> for u64 {
    fn from(val: ProcessId) -> Self {
        val.0
    }
}

impl From<ProcessId> for Literal {
    fn from(val: ProcessId) -> Self {
        Literal::Int(val.0 as i64)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Process({})", self.0)
    }
}

/// Process state. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessState {
    Init,
    Loop,
    Final,
    Done,
}

impl fmt::Display for ProcessState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            ProcessState::Init => "INIT",
            ProcessState::Loop => "LOOP",
            ProcessState::Final => "FINAL",
            ProcessState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// What natives see of the process currently being stepped
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    id: ProcessId,
    name: String,
    env: Environment,
}

impl ProcessHandle {
    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read a variable visible from the process scope
    pub fn get(
        &self,
        name: &str,
    ) -> Option<Literal> {
        self.env.get(name)
    }

    /// Write a process-local variable, defining it when missing
    pub fn set(
        &self,
        name: &str,
        value: Literal,
    ) {
        if self.env.contains_local(name) {
            self.env.assign(name, value);
        } else {
            self.env.define(name, value);
        }
    }
}

/// A spawned process
pub struct Process {
    id: ProcessId,
    name: String,
    state: ProcessState,
    env: Environment,
    init: Vec<StmtRef>,
    body: Option<Vec<StmtRef>>,
    finalize: Vec<StmtRef>,
    steps: u64,
    loop_ticks: u64,
    killed: bool,
}

impl Process {
    /// Create a process running `decl` in `env`, whose parameters are
    /// already bound.
    pub fn new(
        id: ProcessId,
        decl: &RoutineDecl,
        env: Environment,
    ) -> Self {
        let statements = decl.body_statements();
        let split = statements
            .iter()
            .position(|stmt| matches!(stmt.kind, StmtKind::Loop(_)));

        let (init, body, finalize) = match split {
            Some(index) => {
                let body = match &statements[index].kind {
                    StmtKind::Loop(inner) => match &inner.kind {
                        StmtKind::Block(stmts) => stmts.clone(),
                        _ => vec![Rc::clone(inner)],
                    },
                    _ => Vec::new(),
                };
                (
                    statements[..index].to_vec(),
                    Some(body),
                    statements[index + 1..].to_vec(),
                )
            }
            None => (statements, None, Vec::new()),
        };

        Self {
            id,
            name: decl.name.clone(),
            state: ProcessState::Init,
            env,
            init,
            body,
            finalize,
            steps: 0,
            loop_ticks: 0,
            killed: false,
        }
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Whether the body had a `loop` segment
    pub fn has_loop(&self) -> bool {
        self.body.is_some()
    }

    /// Number of steps taken
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of LOOP segment executions
    pub fn loop_ticks(&self) -> u64 {
        self.loop_ticks
    }

    pub fn is_done(&self) -> bool {
        self.state == ProcessState::Done
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub(crate) fn kill(&mut self) {
        self.killed = true;
        self.state = ProcessState::Done;
    }

    pub fn handle(&self) -> ProcessHandle {
        ProcessHandle {
            id: self.id,
            name: self.name.clone(),
            env: self.env.clone(),
        }
    }

    fn transition(
        &mut self,
        next: ProcessState,
    ) {
        if next > self.state {
            debug!("{} '{}': {} -> {}", self.id, self.name, self.state, next);
            self.state = next;
        }
    }

    /// Advance the state machine by one tick
    pub fn step(
        &mut self,
        interp: &mut Interpreter,
    ) -> Result<ProcessState, RuntimeError> {
        if self.is_done() {
            return Ok(self.state);
        }
        self.steps += 1;

        match self.state {
            ProcessState::Init => {
                let flow = interp.execute_in(&self.init, &self.env)?;
                if matches!(flow, Flow::Return(_)) {
                    self.transition(ProcessState::Done);
                } else if self.body.is_some() {
                    self.transition(ProcessState::Loop);
                } else {
                    self.run_final(interp)?;
                }
            }
            ProcessState::Loop => {
                self.loop_ticks += 1;
                let scope = Environment::with_parent(&self.env);
                let body = self.body.as_deref().unwrap_or_default();
                match interp.execute_in(body, &scope)? {
                    Flow::Break => self.run_final(interp)?,
                    Flow::Return(_) => self.transition(ProcessState::Done),
                    Flow::Normal | Flow::Continue => {}
                }
            }
            ProcessState::Final => self.run_final(interp)?,
            ProcessState::Done => {}
        }

        Ok(self.state)
    }

    fn run_final(
        &mut self,
        interp: &mut Interpreter,
    ) -> Result<(), RuntimeError> {
        self.transition(ProcessState::Final);
        interp.execute_in(&self.finalize, &self.env)?;
        self.transition(ProcessState::Done);
        Ok(())
    }
}

impl fmt::Debug for Process {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Process")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .finish()
    }
}
