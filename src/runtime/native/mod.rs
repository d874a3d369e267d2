//! Native function registry
//!
//! Host functions callable from scripts by name. A native receives an
//! [`ExecutionContext`] giving typed access to its arguments, the diagnostic
//! sink, the interpreter's random source and the process being stepped.

pub mod stdlib;

use crate::runtime::literal::{Literal, LiteralKind};
use crate::runtime::scheduler::{ProcessHandle, ProcessId};
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::Rng;
use smallvec::SmallVec;
use tracing::{error, info, warn};

/// Most arguments a native call can receive
pub const MAX_NATIVE_ARGS: usize = 16;

/// Argument buffer of a native call
pub type NativeArgs = SmallVec<[Literal; MAX_NATIVE_ARGS]>;

/// Native entry point: context and argument count
pub type NativeFn = fn(&mut ExecutionContext<'_>, usize) -> Literal;

/// A registered native
#[derive(Debug, Clone)]
pub struct NativeFunction {
    pub name: String,
    pub func: NativeFn,
    /// Exact argument count, when the native declares one
    pub arity: Option<usize>,
}

/// Built-in natives, shared by every registry created with the stdlib
static STDLIB: Lazy<NativeRegistry> = Lazy::new(|| {
    let mut registry = NativeRegistry::new();
    stdlib::register_all(&mut registry);
    registry
});

/// Name to native function table
#[derive(Debug, Clone, Default)]
pub struct NativeRegistry {
    functions: HashMap<String, NativeFunction>,
}

impl NativeRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in natives
    pub fn with_stdlib() -> Self {
        STDLIB.clone()
    }

    /// Register a native accepting any number of arguments
    pub fn register(
        &mut self,
        name: &str,
        func: NativeFn,
    ) {
        self.insert(NativeFunction {
            name: name.to_string(),
            func,
            arity: None,
        });
    }

    /// Register a native that must be called with exactly `arity` arguments
    pub fn register_with_arity(
        &mut self,
        name: &str,
        arity: usize,
        func: NativeFn,
    ) {
        self.insert(NativeFunction {
            name: name.to_string(),
            func,
            arity: Some(arity),
        });
    }

    fn insert(
        &mut self,
        native: NativeFunction,
    ) {
        if let Some(previous) = self.functions.insert(native.name.clone(), native) {
            warn!("Native '{}' re-registered; previous definition replaced", previous.name);
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Everything a native may touch during one call
pub struct ExecutionContext<'a> {
    name: &'a str,
    line: usize,
    args: &'a [Literal],
    rng: &'a mut StdRng,
    process: Option<&'a ProcessHandle>,
    kills: &'a mut Vec<ProcessId>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        name: &'a str,
        line: usize,
        args: &'a [Literal],
        rng: &'a mut StdRng,
        process: Option<&'a ProcessHandle>,
        kills: &'a mut Vec<ProcessId>,
    ) -> Self {
        Self {
            name,
            line,
            args,
            rng,
            process,
            kills,
        }
    }

    /// Name the native was called by
    pub fn name(&self) -> &str {
        self.name
    }

    /// Source line of the call
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn arg(
        &self,
        index: usize,
    ) -> Option<&Literal> {
        self.args.get(index)
    }

    fn coerce(
        &self,
        index: usize,
        kind: LiteralKind,
    ) -> Literal {
        match self.args.get(index) {
            Some(value) => value.convert(kind).unwrap_or_else(|| {
                self.warn(&format!(
                    "argument {} ({}) is not convertible to {}",
                    index,
                    value.describe(),
                    kind
                ));
                Literal::default_for(kind)
            }),
            None => Literal::default_for(kind),
        }
    }

    /// Argument as INT; missing or unconvertible arguments give 0
    pub fn get_int(
        &self,
        index: usize,
    ) -> i64 {
        self.coerce(index, LiteralKind::Int).as_i64().unwrap_or_default()
    }

    /// Argument as FLOAT; missing or unconvertible arguments give 0.0
    pub fn get_float(
        &self,
        index: usize,
    ) -> f64 {
        self.coerce(index, LiteralKind::Float).as_f64().unwrap_or_default()
    }

    /// Argument as BYTE; missing or unconvertible arguments give 0
    pub fn get_byte(
        &self,
        index: usize,
    ) -> u8 {
        self.coerce(index, LiteralKind::Byte).as_u8().unwrap_or_default()
    }

    /// Argument as text. Any literal renders through its display form.
    pub fn get_string(
        &self,
        index: usize,
    ) -> String {
        self.args
            .get(index)
            .map(|value| value.to_string())
            .unwrap_or_default()
    }

    /// Argument truthiness; missing arguments are false
    pub fn get_bool(
        &self,
        index: usize,
    ) -> bool {
        self.args.get(index).is_some_and(Literal::is_truthy)
    }

    pub fn as_int(
        &self,
        value: i64,
    ) -> Literal {
        Literal::Int(value)
    }

    pub fn as_float(
        &self,
        value: f64,
    ) -> Literal {
        Literal::Float(value)
    }

    pub fn as_byte(
        &self,
        value: u8,
    ) -> Literal {
        Literal::Byte(value)
    }

    pub fn as_string(
        &self,
        value: impl Into<String>,
    ) -> Literal {
        Literal::Str(value.into())
    }

    pub fn as_bool(
        &self,
        value: bool,
    ) -> Literal {
        Literal::Bool(value)
    }

    pub fn info(
        &self,
        message: &str,
    ) {
        info!("{}: {}", self.name, message);
    }

    pub fn warn(
        &self,
        message: &str,
    ) {
        warn!("{}: {} at line: {}", self.name, message, self.line);
    }

    pub fn error(
        &self,
        message: &str,
    ) {
        error!("{}: {} at line: {}", self.name, message, self.line);
    }

    /// The process being stepped, if the call happens inside one
    pub fn current_process(&self) -> Option<&ProcessHandle> {
        self.process
    }

    /// Uniform integer in `[low, high]`; the bounds may come in either order
    pub fn random_range(
        &mut self,
        low: i64,
        high: i64,
    ) -> i64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.rng.random_range(low..=high)
    }

    /// Uniform float in `[low, high)`; returns `low` for an empty range.
    /// Non-finite bounds or spans warn and return `low` (0.0 for NaN).
    pub fn random_float(
        &mut self,
        low: f64,
        high: f64,
    ) -> f64 {
        if low.is_nan() || high.is_nan() {
            self.warn("random range bound is NaN");
            return 0.0;
        }
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if !low.is_finite() || !high.is_finite() || !(high - low).is_finite() {
            self.warn(&format!("random range [{}, {}) is not finite", low, high));
            return low;
        }
        if low == high {
            return low;
        }
        self.rng.random_range(low..high)
    }

    /// Request that a process stop at the next tick boundary
    pub fn kill(
        &mut self,
        id: ProcessId,
    ) {
        self.kills.push(id);
    }
}

#[cfg(test)]
mod tests;
