//! Literal scanning implementations
//! Handles number and string literals

use crate::frontend::core::lexer::tokens::*;

/// Scan a decimal number literal. A `.` only continues the number when a
/// digit follows it, so `end.` and `3.` keep their dot as punctuation.
pub fn scan_number(
    lexer: &mut super::tokenizer::Lexer<'_>,
    first_char: char,
) -> Option<Token> {
    let mut value = String::new();
    value.push(first_char);
    consume_digits(lexer, &mut value);

    let is_float = lexer.peek() == Some(&'.') && lexer.peek_next().is_some_and(is_digit);
    if is_float {
        value.push('.');
        lexer.advance();
        consume_digits(lexer, &mut value);

        return match value.parse::<f64>() {
            Ok(n) => Some(lexer.make_literal_token(TokenKind::FloatLiteral(n), value)),
            Err(_) => lexer.fail(LexError::InvalidNumber {
                line: lexer.start_line(),
                text: value,
            }),
        };
    }

    match value.parse::<i64>() {
        Ok(n) => Some(lexer.make_literal_token(TokenKind::IntLiteral(n), value)),
        Err(_) => lexer.fail(LexError::InvalidNumber {
            line: lexer.start_line(),
            text: value,
        }),
    }
}

fn consume_digits(
    lexer: &mut super::tokenizer::Lexer<'_>,
    value: &mut String,
) {
    while let Some(&c) = lexer.peek() {
        if !is_digit(c) {
            break;
        }
        value.push(c);
        lexer.advance();
    }
}

/// Scan a string literal; the opening quote is already consumed.
/// There are no escape sequences and strings may span lines.
pub fn scan_string(lexer: &mut super::tokenizer::Lexer<'_>) -> Option<Token> {
    let mut value = String::new();

    loop {
        match lexer.advance() {
            Some('"') => break,
            Some(c) => value.push(c),
            None => {
                return lexer.fail(LexError::UnterminatedString {
                    line: lexer.start_line(),
                })
            }
        }
    }

    Some(lexer.make_literal_token(TokenKind::StringLiteral(value.clone()), value))
}

/// Check if character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if character can continue an identifier
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if character is a decimal digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
