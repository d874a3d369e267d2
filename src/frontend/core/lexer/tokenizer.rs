//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::literals::{is_digit, is_identifier_char, is_identifier_start, scan_number, scan_string};
use super::state::{Balance, LexerState};
use super::symbols::SymbolTable;
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::iter::Peekable;
use std::str::Chars;

/// Main lexer structure
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    /// First lexical error; scanning stops once it is set
    pub error: Option<LexError>,
    state: LexerState,
    symbols: SymbolTable,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            error: None,
            state: LexerState::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Get start line for error reporting
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Delimiter depth seen so far
    pub fn balance(&self) -> Balance {
        self.state.balance()
    }

    /// True when every `begin/end`, `()`, `[]` and `{}` pair is closed.
    /// Callers should check this before handing tokens to the parser.
    pub fn is_ready(&self) -> bool {
        self.state.balance().is_balanced()
    }

    /// Declared procedure/function/process names seen so far
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Skip whitespace and comments. An unclosed block comment is fatal.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        while let Some(&c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(&c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    let line = self.line;
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some(&'/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(LexError::UnterminatedComment { line }),
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Generate next token. Returns `None` at end of input and after the
    /// error token that ends a failed scan.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        if let Err(err) = self.skip_whitespace_and_comments() {
            return self.fail(err);
        }

        // Check if at end of file
        self.peek()?;

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = self.advance()?;

        let token = match c {
            c if is_identifier_start(c) => self.scan_identifier(),
            c if is_digit(c) => return scan_number(self, c).map(|t| self.record(t)),
            '"' => return scan_string(self).map(|t| self.record(t)),
            '+' => self.one_of(&[('+', TokenKind::PlusPlus), ('=', TokenKind::PlusEq)], TokenKind::Plus),
            '-' => self.one_of(
                &[('-', TokenKind::MinusMinus), ('=', TokenKind::MinusEq)],
                TokenKind::Minus,
            ),
            '*' => self.one_of(&[('=', TokenKind::StarEq)], TokenKind::Star),
            '/' => self.one_of(&[('=', TokenKind::SlashEq)], TokenKind::Slash),
            '=' => self.one_of(&[('=', TokenKind::EqEq)], TokenKind::Eq),
            '!' => self.one_of(&[('=', TokenKind::Neq)], TokenKind::Bang),
            '<' => self.one_of(&[('=', TokenKind::Le)], TokenKind::Lt),
            '>' => self.one_of(&[('=', TokenKind::Ge)], TokenKind::Gt),
            '%' => self.make_token(TokenKind::Percent),
            '^' => self.make_token(TokenKind::Caret),
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '[' => self.make_token(TokenKind::LBracket),
            ']' => self.make_token(TokenKind::RBracket),
            '{' => self.make_token(TokenKind::LBrace),
            '}' => self.make_token(TokenKind::RBrace),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            ';' => self.make_token(TokenKind::Semicolon),
            ':' => self.make_token(TokenKind::Colon),
            c => {
                return self.fail(LexError::UnexpectedChar {
                    ch: c,
                    line: self.start_line,
                })
            }
        };

        Some(self.record(token))
    }

    /// Two-character operator if the next char matches, else `single`
    fn one_of(
        &mut self,
        pairs: &[(char, TokenKind)],
        single: TokenKind,
    ) -> Token {
        let next = self.peek().copied();
        for (second, kind) in pairs {
            if next == Some(*second) {
                self.advance();
                return self.make_token(kind.clone());
            }
        }
        self.make_token(single)
    }

    /// Scan identifier token; the first char is already consumed
    fn scan_identifier(&mut self) -> Token {
        while let Some(&c) = self.peek() {
            if !is_identifier_char(c) {
                break;
            }
            self.advance();
        }

        let word = self.lexeme().to_string();
        if let Some(kind) = self.state.keyword_from_str(&word) {
            return self.make_token(kind);
        }

        let kind = if let Some(declared) = self.state.pending_declaration() {
            self.symbols.insert(&word, declared);
            declared.token_kind(word)
        } else if let Some(known) = self.symbols.lookup(&word) {
            known.token_kind(word)
        } else {
            TokenKind::Identifier(word)
        };
        self.make_token(kind)
    }

    /// Stop scanning and emit the single error token
    pub fn fail(
        &mut self,
        error: LexError,
    ) -> Option<Token> {
        let token = self.make_token(TokenKind::Error(error.to_string()));
        self.error = Some(error);
        Some(token)
    }

    fn record(
        &mut self,
        token: Token,
    ) -> Token {
        self.state.observe(&token.kind);
        token
    }

    fn lexeme(&self) -> &'a str {
        self.source
            .get(self.start_offset..self.offset)
            .unwrap_or_default()
    }

    /// Create token with current span and lexeme
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        Token {
            kind,
            lexeme: self.lexeme().to_string(),
            literal: None,
            span: self.span(),
        }
    }

    /// Create a literal token carrying its payload text
    pub fn make_literal_token(
        &self,
        kind: TokenKind,
        payload: String,
    ) -> Token {
        Token {
            literal: Some(payload),
            ..self.make_token(kind)
        }
    }
}
