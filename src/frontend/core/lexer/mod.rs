//! Lexer module
//! Single-pass scanner split into token types, tokenizer, keyword/balance
//! state, declaration symbol tables and literal scanning.

pub mod literals;
pub mod state;
pub mod symbols;
pub mod tokenizer;
pub mod tokens;

#[cfg(test)]
mod tests;

// Re-export types
pub use symbols::{SymbolKind, SymbolTable};
pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

/// Tokenize source code.
///
/// Fails on the first lexical error, and when the delimiters are not
/// balanced at end of input. The returned stream always ends with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!("lexing {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token() {
        if !matches!(token.kind, TokenKind::Error(_)) {
            tracing::debug!("token {} at line {}", token.kind, token.line());
        }
        tokens.push(token);
    }

    if let Some(err) = lexer.error.take() {
        return Err(err);
    }
    lexer.balance().check()?;

    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        literal: None,
        span: crate::util::span::Span::new(lexer.position(), lexer.position()),
    });
    tracing::debug!("lexing produced {} tokens", tokens.len());
    Ok(tokens)
}
