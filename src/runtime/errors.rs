//! Runtime errors and control flow signals

use crate::frontend::core::lexer::LexError;
use crate::frontend::core::parser::ParseError;
use crate::frontend::CompileError;
use crate::runtime::literal::Literal;
use thiserror::Error;

/// Fatal runtime errors. Each one unwinds the whole run.
///
/// Recoverable evaluation problems (type mismatches, division by zero,
/// undefined variables) are logged and never reach this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("Undefined procedure, function or native '{name}' at line: {line}")]
    UndefinedCallee { name: String, line: usize },

    #[error("'{name}' expects {expected} arguments but got {found} at line: {line}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        line: usize,
    },

    #[error("Variable '{name}' already defined in this scope at line: {line}")]
    Redefinition { name: String, line: usize },

    #[error("'{name}' is already declared at line: {line}")]
    DuplicateDeclaration { name: String, line: usize },

    #[error("Invalid target for '{op}' at line: {line}")]
    InvalidTarget { op: &'static str, line: usize },

    #[error("Native '{name}' called with {found} arguments, at most {max} supported at line: {line}")]
    TooManyArguments {
        name: String,
        found: usize,
        max: usize,
        line: usize,
    },

    #[error("Call depth limit of {limit} exceeded calling '{name}' at line: {line}")]
    CallDepthExceeded {
        name: String,
        limit: usize,
        line: usize,
    },
}

impl RuntimeError {
    pub fn line(&self) -> usize {
        match self {
            RuntimeError::UndefinedCallee { line, .. }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::Redefinition { line, .. }
            | RuntimeError::DuplicateDeclaration { line, .. }
            | RuntimeError::InvalidTarget { line, .. }
            | RuntimeError::TooManyArguments { line, .. }
            | RuntimeError::CallDepthExceeded { line, .. } => *line,
        }
    }
}

/// How a statement finished.
///
/// Loops consume `Break` and `Continue`; call frames and process steps
/// consume `Return`. Everything else passes the signal outward unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Flow {
    #[default]
    Normal,
    Return(Option<Literal>),
    Break,
    Continue,
}

impl Flow {
    pub fn is_normal(&self) -> bool {
        matches!(self, Flow::Normal)
    }
}

pub type ExecResult = Result<Flow, RuntimeError>;
pub type EvalResult = Result<Literal, RuntimeError>;

/// Any error that ends a script run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl From<CompileError> for ScriptError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Lex(e) => ScriptError::Lex(e),
            CompileError::Parse(e) => ScriptError::Parse(e),
        }
    }
}

impl ScriptError {
    /// Source line the error was reported at (0 when unknown)
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Lex(e) => e.line(),
            ScriptError::Parse(e) => e.line(),
            ScriptError::Runtime(e) => e.line(),
        }
    }
}
