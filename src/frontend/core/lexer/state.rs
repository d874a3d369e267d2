//! Lexer state management
//! Keyword recognition, declaration context and delimiter balance

use crate::frontend::core::lexer::symbols::SymbolKind;
use crate::frontend::core::lexer::tokens::{LexError, TokenKind};

/// Running depth of each delimiter pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance {
    pub blocks: i64,
    pub parens: i64,
    pub brackets: i64,
    pub braces: i64,
}

impl Balance {
    /// All pairs closed
    pub fn is_balanced(&self) -> bool {
        self.blocks == 0 && self.parens == 0 && self.brackets == 0 && self.braces == 0
    }

    /// First unbalanced pair, as an error
    pub fn check(&self) -> Result<(), LexError> {
        let pairs = [
            ("begin/end", self.blocks),
            ("parentheses", self.parens),
            ("brackets", self.brackets),
            ("braces", self.braces),
        ];
        match pairs.into_iter().find(|(_, depth)| *depth != 0) {
            Some((what, depth)) => Err(LexError::Unbalanced { what, depth }),
            None => Ok(()),
        }
    }

    fn track(
        &mut self,
        kind: &TokenKind,
    ) {
        match kind {
            TokenKind::KwBegin => self.blocks += 1,
            TokenKind::KwEnd => self.blocks -= 1,
            TokenKind::LParen => self.parens += 1,
            TokenKind::RParen => self.parens -= 1,
            TokenKind::LBracket => self.brackets += 1,
            TokenKind::RBracket => self.brackets -= 1,
            TokenKind::LBrace => self.braces += 1,
            TokenKind::RBrace => self.braces -= 1,
            _ => {}
        }
    }
}

/// Lexer state management
#[derive(Debug, Default)]
pub struct LexerState {
    /// Declaration keyword waiting for its name
    pending_declaration: Option<SymbolKind>,
    balance: Balance,
}

impl LexerState {
    /// Create new lexer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a word to its keyword token. Matching is case-insensitive.
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        let kind = match s.to_ascii_lowercase().as_str() {
            // Program structure
            "program" => TokenKind::KwProgram,
            "begin" => TokenKind::KwBegin,
            "end" => TokenKind::KwEnd,

            // Control flow
            "if" => TokenKind::KwIf,
            "elif" => TokenKind::KwElif,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            "repeat" => TokenKind::KwRepeat,
            "until" => TokenKind::KwUntil,
            "loop" => TokenKind::KwLoop,
            "for" => TokenKind::KwFor,
            "switch" => TokenKind::KwSwitch,
            "case" => TokenKind::KwCase,
            "default" => TokenKind::KwDefault,
            "break" => TokenKind::KwBreak,
            "continue" => TokenKind::KwContinue,
            "return" => TokenKind::KwReturn,

            // Declarations
            "function" => TokenKind::KwFunction,
            "procedure" => TokenKind::KwProcedure,
            "process" => TokenKind::KwProcess,

            // Built-ins
            "print" => TokenKind::KwPrint,
            "now" => TokenKind::KwNow,

            // Word operators
            "and" => TokenKind::KwAnd,
            "or" => TokenKind::KwOr,
            "xor" => TokenKind::KwXor,
            "not" => TokenKind::KwNot,

            // Types
            "int" => TokenKind::KwInt,
            "float" => TokenKind::KwFloat,
            "byte" => TokenKind::KwByte,
            "string" => TokenKind::KwString,
            "bool" => TokenKind::KwBool,

            // Boolean literals
            "true" => TokenKind::BoolLiteral(true),
            "false" => TokenKind::BoolLiteral(false),

            _ => return None,
        };
        Some(kind)
    }

    /// Record an emitted token: arms the declaration context after
    /// `procedure`/`function`/`process` and updates delimiter depth.
    pub fn observe(
        &mut self,
        kind: &TokenKind,
    ) {
        self.balance.track(kind);
        self.pending_declaration = match kind {
            TokenKind::KwProcedure => Some(SymbolKind::Procedure),
            TokenKind::KwFunction => Some(SymbolKind::Function),
            TokenKind::KwProcess => Some(SymbolKind::Process),
            _ => None,
        };
    }

    /// Declaration kind the next identifier belongs to, if any
    pub fn pending_declaration(&self) -> Option<SymbolKind> {
        self.pending_declaration
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }
}
