//! Frontend compilation pipeline
//!
//! This module contains the lexer and the parser.
//! The frontend turns source text into a `Program` statement ready to execute.

use thiserror::Error;
use tracing::debug;

pub mod core;

pub use self::core::{lexer, parser};

use self::core::lexer::LexError;
use self::core::parser::{ParseError, Stmt, StmtKind};

/// Compiler context
#[derive(Debug, Default)]
pub struct Compiler {
    /// Token count of the last successful compile
    last_token_count: usize,
}

impl Compiler {
    /// Create a new compiler
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex and parse source code into a program statement
    pub fn compile(
        &mut self,
        source: &str,
    ) -> Result<Stmt, CompileError> {
        debug!("Compiling source code ({} bytes)", source.len());
        // Lexical analysis
        let tokens = lexer::tokenize(source)?;
        debug!("Tokenized into {} tokens", tokens.len());
        self.last_token_count = tokens.len();

        // Parsing
        debug!("Starting parsing...");
        let program = parser::parse(&tokens)?;
        if let StmtKind::Program(p) = &program.kind {
            debug!(
                "Parsing successful: program '{}' with {} declarations",
                p.name,
                p.declarations.len()
            );
        }

        Ok(program)
    }

    pub fn last_token_count(&self) -> usize {
        self.last_token_count
    }
}

/// Compilation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl CompileError {
    /// Source line the error was reported at
    pub fn line(&self) -> usize {
        match self {
            CompileError::Lex(e) => e.line(),
            CompileError::Parse(e) => e.line(),
        }
    }
}
