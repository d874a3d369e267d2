//! Token types

use crate::util::span::Span;
use serde::Serialize;
use std::fmt;

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string at line: {line}")]
    UnterminatedString { line: usize },
    #[error("Unterminated block comment at line: {line}")]
    UnterminatedComment { line: usize },
    #[error("Unexpected character '{ch}' at line: {line}")]
    UnexpectedChar { ch: char, line: usize },
    #[error("Invalid number literal '{text}' at line: {line}")]
    InvalidNumber { text: String, line: usize },
    #[error("Unbalanced {what} at end of input (depth {depth})")]
    Unbalanced { what: &'static str, depth: i64 },
}

impl LexError {
    /// Line the error was raised on (0 for end-of-input errors)
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedString { line }
            | LexError::UnterminatedComment { line }
            | LexError::UnexpectedChar { line, .. }
            | LexError::InvalidNumber { line, .. } => *line,
            LexError::Unbalanced { .. } => 0,
        }
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenKind {
    // Keywords
    KwProgram,
    KwBegin,
    KwEnd,
    KwIf,
    KwElif,
    KwElse,
    KwWhile,
    KwRepeat,
    KwUntil,
    KwLoop,
    KwFor,
    KwSwitch,
    KwCase,
    KwDefault,
    KwBreak,
    KwContinue,
    KwReturn,
    KwFunction,
    KwProcedure,
    KwProcess,
    KwPrint,
    KwNow,
    KwAnd,
    KwOr,
    KwXor,
    KwNot,

    // Type keywords
    KwInt,
    KwFloat,
    KwByte,
    KwString,
    KwBool,

    // Identifiers, plain and classified by a preceding declaration keyword
    Identifier(String),
    IdProcedure(String),
    IdFunction(String),
    IdProcess(String),

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    BoolLiteral(bool),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Bang,
    Eq,
    EqEq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,
    Colon,

    Eof,
    Error(String),
}

impl TokenKind {
    /// True for the five type keywords usable in declarations
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::KwInt
                | TokenKind::KwFloat
                | TokenKind::KwByte
                | TokenKind::KwString
                | TokenKind::KwBool
        )
    }

    /// Name carried by identifier-like tokens
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            TokenKind::Identifier(name)
            | TokenKind::IdProcedure(name)
            | TokenKind::IdFunction(name)
            | TokenKind::IdProcess(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier(name)
            | TokenKind::IdProcedure(name)
            | TokenKind::IdFunction(name)
            | TokenKind::IdProcess(name) => return write!(f, "'{}'", name),
            TokenKind::IntLiteral(n) => return write!(f, "{}", n),
            TokenKind::FloatLiteral(n) => return write!(f, "{}", n),
            TokenKind::StringLiteral(s) => return write!(f, "\"{}\"", s),
            TokenKind::BoolLiteral(b) => return write!(f, "{}", b),
            TokenKind::Error(msg) => return write!(f, "error({})", msg),
            TokenKind::KwProgram => "program",
            TokenKind::KwBegin => "begin",
            TokenKind::KwEnd => "end",
            TokenKind::KwIf => "if",
            TokenKind::KwElif => "elif",
            TokenKind::KwElse => "else",
            TokenKind::KwWhile => "while",
            TokenKind::KwRepeat => "repeat",
            TokenKind::KwUntil => "until",
            TokenKind::KwLoop => "loop",
            TokenKind::KwFor => "for",
            TokenKind::KwSwitch => "switch",
            TokenKind::KwCase => "case",
            TokenKind::KwDefault => "default",
            TokenKind::KwBreak => "break",
            TokenKind::KwContinue => "continue",
            TokenKind::KwReturn => "return",
            TokenKind::KwFunction => "function",
            TokenKind::KwProcedure => "procedure",
            TokenKind::KwProcess => "process",
            TokenKind::KwPrint => "print",
            TokenKind::KwNow => "now",
            TokenKind::KwAnd => "and",
            TokenKind::KwOr => "or",
            TokenKind::KwXor => "xor",
            TokenKind::KwNot => "not",
            TokenKind::KwInt => "int",
            TokenKind::KwFloat => "float",
            TokenKind::KwByte => "byte",
            TokenKind::KwString => "string",
            TokenKind::KwBool => "bool",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Eof => "end of input",
        };
        write!(f, "'{}'", text)
    }
}

/// Token with location info
///
/// `lexeme` is the raw source text; `literal` is the payload text of string
/// and number literals (the string without its quotes, the digits of a
/// number) and `None` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<String>,
    pub span: Span,
}

impl Token {
    /// Source line of the token
    pub fn line(&self) -> usize {
        self.span.line()
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            lexeme: String::new(),
            kind,
            literal: None,
            span: Span::dummy(),
        }
    }
}
