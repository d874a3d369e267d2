//! Core algorithm layer
//! Lexer and parser for the scripting language

pub mod lexer;
pub mod parser;

pub use crate::frontend::core::parser::*;

// Re-export commonly used items
pub use lexer::tokenize;
