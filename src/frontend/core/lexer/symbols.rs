//! Symbol tables for contextual identifier classification
//!
//! Every name that follows `procedure`, `function` or `process` is recorded
//! here, so later occurrences of the same name lex as a call target instead
//! of a plain identifier.

use crate::frontend::core::lexer::tokens::TokenKind;
use indexmap::IndexSet;

/// Kind of declared callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Procedure,
    Function,
    Process,
}

impl SymbolKind {
    /// Token kind used for identifiers of this kind
    pub fn token_kind(
        self,
        name: String,
    ) -> TokenKind {
        match self {
            SymbolKind::Procedure => TokenKind::IdProcedure(name),
            SymbolKind::Function => TokenKind::IdFunction(name),
            SymbolKind::Process => TokenKind::IdProcess(name),
        }
    }
}

/// One table per declaration kind, in declaration order
#[derive(Debug, Default)]
pub struct SymbolTable {
    procedures: IndexSet<String>,
    functions: IndexSet<String>,
    processes: IndexSet<String>,
}

impl SymbolTable {
    /// Create new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    fn table_mut(
        &mut self,
        kind: SymbolKind,
    ) -> &mut IndexSet<String> {
        match kind {
            SymbolKind::Procedure => &mut self.procedures,
            SymbolKind::Function => &mut self.functions,
            SymbolKind::Process => &mut self.processes,
        }
    }

    /// Record a declared name. Returns false if it was already in that table.
    pub fn insert(
        &mut self,
        name: &str,
        kind: SymbolKind,
    ) -> bool {
        self.table_mut(kind).insert(name.to_string())
    }

    /// Classify a previously declared name
    pub fn lookup(
        &self,
        name: &str,
    ) -> Option<SymbolKind> {
        if self.procedures.contains(name) {
            Some(SymbolKind::Procedure)
        } else if self.functions.contains(name) {
            Some(SymbolKind::Function)
        } else if self.processes.contains(name) {
            Some(SymbolKind::Process)
        } else {
            None
        }
    }

    /// Names of one kind in declaration order
    pub fn names(
        &self,
        kind: SymbolKind,
    ) -> impl Iterator<Item = &str> {
        let table = match kind {
            SymbolKind::Procedure => &self.procedures,
            SymbolKind::Function => &self.functions,
            SymbolKind::Process => &self.processes,
        };
        table.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.procedures.len() + self.functions.len() + self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = SymbolTable::new();
        assert!(table.insert("draw", SymbolKind::Procedure));
        assert!(table.insert("square", SymbolKind::Function));
        assert!(!table.insert("draw", SymbolKind::Procedure));

        assert_eq!(table.lookup("draw"), Some(SymbolKind::Procedure));
        assert_eq!(table.lookup("square"), Some(SymbolKind::Function));
        assert_eq!(table.lookup("ship"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_names_keep_declaration_order() {
        let mut table = SymbolTable::new();
        table.insert("enemy", SymbolKind::Process);
        table.insert("bullet", SymbolKind::Process);
        let names: Vec<_> = table.names(SymbolKind::Process).collect();
        assert_eq!(names, vec!["enemy", "bullet"]);
    }

    #[test]
    fn test_token_kind_mapping() {
        assert_eq!(
            SymbolKind::Function.token_kind("f".into()),
            TokenKind::IdFunction("f".into())
        );
    }
}
