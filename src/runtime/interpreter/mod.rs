//! Tree-walking interpreter
//!
//! Evaluates the AST directly. The interpreter owns everything a run needs:
//! the global scope, the routine table, the native registry, the process
//! scheduler, the random source and the print sink. Nothing is global, so
//! several interpreters can coexist in one host.
//!
//! Submodules split the work:
//! - `eval`: expressions
//! - `exec`: statements
//! - `ops`: operator dispatch and diagnostics
//! - `calls`: routine, native and process calls

mod calls;
mod eval;
mod exec;
mod ops;

pub use calls::{Routine, RoutineKind, MAX_CALL_DEPTH};

/// Stack left when evaluation switches to a fresh segment
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment deep recursion allocates
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

use crate::frontend::core::parser::ast::{Expr, Stmt, StmtKind, StmtRef};
use crate::frontend::core::parser::visitor::Visitor;
use crate::frontend::Compiler;
use crate::runtime::environment::Environment;
use crate::runtime::errors::{EvalResult, ExecResult, Flow, RuntimeError, ScriptError};
use crate::runtime::literal::Literal;
use crate::runtime::native::NativeRegistry;
use crate::runtime::scheduler::{ProcessHandle, ProcessId, Scheduler, SchedulerStats};
use crate::util::config::RuntimeConfig;
use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// In-memory print sink. Clones share the buffer, so a host keeps one
/// handle and gives the other to the interpreter.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Written lines, without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Drain the buffer
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Interpreter state
pub struct Interpreter {
    globals: Environment,
    /// Scope statements currently execute in
    env: Environment,
    routines: HashMap<String, Routine>,
    natives: NativeRegistry,
    scheduler: Scheduler,
    /// Process being stepped, visible to natives
    current: Option<ProcessHandle>,
    rng: StdRng,
    started: Instant,
    output: Box<dyn Write>,
    echo_prints: bool,
    call_depth: usize,
    max_call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to stdout, with the built-in natives and an
    /// OS-seeded random source
    pub fn new() -> Self {
        let globals = Environment::new();
        Self {
            env: globals.clone(),
            globals,
            routines: HashMap::new(),
            natives: NativeRegistry::with_stdlib(),
            scheduler: Scheduler::new(),
            current: None,
            rng: StdRng::from_os_rng(),
            started: Instant::now(),
            output: Box::new(io::stdout()),
            echo_prints: false,
            call_depth: 0,
            max_call_depth: MAX_CALL_DEPTH,
        }
    }

    /// Interpreter honoring the seed and print echo settings of `config`
    pub fn with_config(config: &RuntimeConfig) -> Self {
        let mut interp = Self::new();
        if let Some(seed) = config.rng_seed {
            interp.rng = StdRng::seed_from_u64(seed);
        }
        interp.echo_prints = config.echo_prints;
        interp.max_call_depth = config.max_call_depth;
        interp
    }

    /// Replace the random source with a seeded one
    pub fn with_seed(
        mut self,
        seed: u64,
    ) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Send `print` output to `output`
    pub fn with_output(
        mut self,
        output: impl Write + 'static,
    ) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Send `print` output to a fresh in-memory buffer and return a handle to it
    pub fn capture_output(&mut self) -> SharedBuffer {
        let buffer = SharedBuffer::new();
        self.output = Box::new(buffer.clone());
        buffer
    }

    /// Deepest nesting of procedure and function frames before a call fails
    /// with `CallDepthExceeded`
    pub fn set_max_call_depth(
        &mut self,
        depth: usize,
    ) {
        self.max_call_depth = depth;
    }

    pub fn set_echo_prints(
        &mut self,
        echo: bool,
    ) {
        self.echo_prints = echo;
    }

    pub fn natives(&self) -> &NativeRegistry {
        &self.natives
    }

    /// Registry for host natives
    pub fn natives_mut(&mut self) -> &mut NativeRegistry {
        &mut self.natives
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    /// Declared routine by name
    pub fn routine(
        &self,
        name: &str,
    ) -> Option<&Routine> {
        self.routines.get(name)
    }

    /// Request that a process stop at the next tick boundary
    pub fn kill(
        &mut self,
        id: ProcessId,
    ) {
        self.scheduler.kill(id);
    }

    /// Compile `source` and run its main block. Spawned processes are left
    /// in the scheduler for the host to tick.
    pub fn execute_source(
        &mut self,
        source: &str,
    ) -> Result<(), ScriptError> {
        let program = Compiler::new().compile(source)?;
        self.run_program(&program)?;
        Ok(())
    }

    /// Register the program's declarations, then run its main block in the
    /// global scope
    pub fn run_program(
        &mut self,
        program: &Stmt,
    ) -> Result<(), RuntimeError> {
        let StmtKind::Program(p) = &program.kind else {
            self.execute(program)?;
            return Ok(());
        };
        debug!("Running program '{}'", p.name);

        // routines first, so global initializers may call any of them
        let (routines, variables): (Vec<&StmtRef>, Vec<&StmtRef>) = p
            .declarations
            .iter()
            .partition(|decl| !matches!(decl.kind, StmtKind::VarDecl { .. }));
        let globals = self.globals.clone();
        for decl in routines.into_iter().chain(variables) {
            self.execute_in(std::slice::from_ref(decl), &globals)?;
        }

        let flow = match &p.body.kind {
            StmtKind::Block(stmts) => self.execute_in(stmts, &globals)?,
            _ => self.execute_in(std::slice::from_ref(&p.body), &globals)?,
        };
        if !flow.is_normal() {
            debug!("Main block of '{}' ended with {:?}", p.name, flow);
        }
        Ok(())
    }

    /// Run `stmts` with `env` as the active scope, restoring the previous
    /// scope afterwards. Stops at the first non-normal flow.
    pub fn execute_in(
        &mut self,
        stmts: &[StmtRef],
        env: &Environment,
    ) -> ExecResult {
        let previous = std::mem::replace(&mut self.env, env.clone());
        let result = self.execute_statements(stmts);
        self.env = previous;
        result
    }

    fn execute_statements(
        &mut self,
        stmts: &[StmtRef],
    ) -> ExecResult {
        for stmt in stmts {
            let flow = self.execute(stmt)?;
            if !flow.is_normal() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Step every live process once.
    ///
    /// Processes spawned during the sweep join afterwards; finished and
    /// killed processes are dropped at the end of the tick.
    pub fn tick(&mut self) -> Result<SchedulerStats, RuntimeError> {
        let mut live = self.scheduler.begin_tick();
        let mut failure = None;

        for process in live.iter_mut() {
            if process.is_done() {
                continue;
            }
            let previous = self.current.replace(process.handle());
            let result = process.step(self);
            self.current = previous;

            if let Err(e) = result {
                failure = Some(e);
                break;
            }
        }

        self.scheduler.end_tick(live);
        match failure {
            Some(e) => Err(e),
            None => Ok(self.scheduler.stats()),
        }
    }

    /// Tick until no process is left or `max_ticks` ticks have run.
    /// Returns the number of ticks run.
    pub fn run_until_idle(
        &mut self,
        max_ticks: u64,
    ) -> Result<u64, RuntimeError> {
        let mut ticks = 0;
        while ticks < max_ticks && !self.scheduler.is_idle() {
            self.tick()?;
            ticks += 1;
        }
        if !self.scheduler.is_idle() {
            warn!(
                "Stopped after {} ticks with {} processes still alive",
                ticks,
                self.scheduler.process_count()
            );
        }
        Ok(ticks)
    }

    /// Seconds since the interpreter was created
    pub(crate) fn now(&self) -> Literal {
        Literal::Float(self.started.elapsed().as_secs_f64())
    }

    pub(crate) fn print(
        &mut self,
        value: &Literal,
    ) {
        let text = value.to_string();
        if let Err(e) = writeln!(self.output, "{}", text) {
            warn!("print failed: {}", e);
        }
        if self.echo_prints {
            info!("{}", text);
        }
    }
}

impl Visitor for Interpreter {
    type ExprOutput = EvalResult;
    type StmtOutput = ExecResult;

    fn visit_expr(
        &mut self,
        expr: &Expr,
    ) -> EvalResult {
        self.evaluate(expr)
    }

    fn visit_stmt(
        &mut self,
        stmt: &Stmt,
    ) -> ExecResult {
        self.execute(stmt)
    }
}

#[cfg(test)]
mod tests;
