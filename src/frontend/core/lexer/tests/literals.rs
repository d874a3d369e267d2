//! Literal tests

use super::kinds;
use crate::frontend::core::lexer::{tokenize, TokenKind};

#[cfg(test)]
mod lexer_literal_tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert_eq!(kinds("42"), vec![TokenKind::IntLiteral(42)]);
    }

    #[test]
    fn test_float() {
        assert_eq!(kinds("2.5"), vec![TokenKind::FloatLiteral(2.5)]);
    }

    #[test]
    fn test_dot_without_digit_is_punctuation() {
        assert_eq!(kinds("3."), vec![TokenKind::IntLiteral(3), TokenKind::Dot]);
    }

    #[test]
    fn test_literal_payload_text() {
        let tokens = tokenize("007 1.50 \"hi\"").unwrap();
        assert_eq!(tokens[0].literal.as_deref(), Some("007"));
        assert_eq!(tokens[1].literal.as_deref(), Some("1.50"));
        assert_eq!(tokens[2].literal.as_deref(), Some("hi"));
        assert_eq!(tokens[2].lexeme, "\"hi\"");
    }

    #[test]
    fn test_string() {
        assert_eq!(
            kinds("\"hello world\""),
            vec![TokenKind::StringLiteral("hello world".into())]
        );
    }

    #[test]
    fn test_string_has_no_escapes() {
        assert_eq!(kinds(r#""a\n""#), vec![TokenKind::StringLiteral(r"a\n".into())]);
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let tokens = tokenize("\"a\nb\" x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral("a\nb".into()));
        assert_eq!(tokens[1].line(), 2);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(
            kinds("true FALSE"),
            vec![TokenKind::BoolLiteral(true), TokenKind::BoolLiteral(false)]
        );
    }

    #[test]
    fn test_negative_number_is_two_tokens() {
        assert_eq!(kinds("-1"), vec![TokenKind::Minus, TokenKind::IntLiteral(1)]);
    }
}
