//! Runtime system
//!
//! Values, scopes, the tree-walking interpreter, native functions and the
//! cooperative process scheduler.

pub mod environment;
pub mod errors;
pub mod interpreter;
pub mod literal;
pub mod native;
pub mod scheduler;

pub use environment::Environment;
pub use errors::{Flow, RuntimeError, ScriptError};
pub use interpreter::{Interpreter, SharedBuffer};
pub use literal::{Literal, LiteralKind};
pub use native::{ExecutionContext, NativeFn, NativeRegistry};
pub use scheduler::{ProcessId, ProcessState, Scheduler, SchedulerStats};
