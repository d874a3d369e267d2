//! Parser state and error handling

use crate::frontend::core::lexer::tokens::*;
use crate::util::span::Span;

/// Parse error types. Every variant carries the source line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Expected a specific token
    #[error("Expected {expected}, found {found} at line: {line}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: usize,
    },
    /// Unexpected token encountered
    #[error("Unexpected token {found} at line: {line}")]
    UnexpectedToken { found: TokenKind, line: usize },
    /// Generic parse error with message
    #[error("{message} at line: {line}")]
    Message { message: String, line: usize },
}

impl ParseError {
    pub fn message(
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        ParseError::Message {
            message: message.into(),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::ExpectedToken { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::Message { line, .. } => *line,
        }
    }
}

static EOF: TokenKind = TokenKind::Eof;

/// Result type of every parsing routine
pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over the token stream plus collected errors
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'a> ParserState<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
            || matches!(self.current().map(|t| &t.kind), Some(TokenKind::Eof))
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the current token (`Eof` past the end)
    pub fn kind(&self) -> &TokenKind {
        self.current().map(|t| &t.kind).unwrap_or(&EOF)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    pub fn span(&self) -> Span {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or(Span::dummy())
    }

    /// Line of the current token, for error reporting
    pub fn line(&self) -> usize {
        self.span().line()
    }

    /// Span of the most recently consumed token
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or_else(|| self.span())
    }

    pub fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.kind() == kind
    }

    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `ExpectedToken`
    pub fn expect(
        &mut self,
        kind: &TokenKind,
    ) -> ParseResult<Token> {
        if self.at(kind) {
            if let Some(token) = self.bump() {
                return Ok(token);
            }
        }
        Err(ParseError::ExpectedToken {
            expected: kind.clone(),
            found: self.kind().clone(),
            line: self.line(),
        })
    }

    /// Consume any identifier-like token and return its name
    pub fn expect_name(
        &mut self,
        what: &str,
    ) -> ParseResult<String> {
        match self.kind().identifier_name() {
            Some(name) => {
                let name = name.to_string();
                self.bump();
                Ok(name)
            }
            None => Err(ParseError::message(
                format!("Expected {}, found {}", what, self.kind()),
                self.line(),
            )),
        }
    }

    /// Error for the current token not fitting the grammar
    pub fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.kind().clone(),
            line: self.line(),
        }
    }

    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    /// Save current position for backtracking
    pub fn save_position(&self) -> usize {
        self.pos
    }

    /// Restore a previously saved position
    pub fn restore_position(
        &mut self,
        pos: usize,
    ) {
        self.pos = pos;
    }

    /// Synchronize parser after error (skip past the next `;`)
    pub fn synchronize(&mut self) {
        while !self.at_end() {
            if self.skip(&TokenKind::Semicolon) {
                break;
            }
            self.bump();
        }
    }
}
