//! Contextual identifier classification tests

use super::kinds;
use crate::frontend::core::lexer::{Lexer, SymbolKind, TokenKind};

#[cfg(test)]
mod lexer_classification_tests {
    use super::*;

    #[test]
    fn test_declared_names_are_tagged() {
        let all = kinds("procedure draw function area process ship");
        assert_eq!(all[1], TokenKind::IdProcedure("draw".into()));
        assert_eq!(all[3], TokenKind::IdFunction("area".into()));
        assert_eq!(all[5], TokenKind::IdProcess("ship".into()));
    }

    #[test]
    fn test_later_occurrences_are_retagged() {
        let all = kinds("function area() : int begin end area(1); area");
        let tagged = all
            .iter()
            .filter(|k| **k == TokenKind::IdFunction("area".into()))
            .count();
        assert_eq!(tagged, 3);
    }

    #[test]
    fn test_use_before_declaration_is_plain() {
        let all = kinds("ship process ship");
        assert_eq!(all[0], TokenKind::Identifier("ship".into()));
        assert_eq!(all[2], TokenKind::IdProcess("ship".into()));
    }

    #[test]
    fn test_context_only_applies_to_next_token() {
        let all = kinds("process ( enemy )");
        assert_eq!(all[2], TokenKind::Identifier("enemy".into()));
    }

    #[test]
    fn test_symbol_table_is_exposed() {
        let mut lexer = Lexer::new("process a process b procedure c");
        while lexer.next_token().is_some() {}
        let processes: Vec<_> = lexer.symbols().names(SymbolKind::Process).collect();
        assert_eq!(processes, vec!["a", "b"]);
        assert_eq!(lexer.symbols().lookup("c"), Some(SymbolKind::Procedure));
    }
}
