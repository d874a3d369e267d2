//! Lexical scopes
//!
//! An [`Environment`] is a shared handle to one scope. Scopes hold strong
//! references to their parent, so a call frame or a process scope keeps the
//! global scope alive for as long as it needs it. Each variable lives in its
//! own cell: reads clone the literal, `++`/`--` and assignment mutate the
//! cell in place.

use crate::runtime::literal::Literal;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable variable slot
pub type ValueRef = Rc<RefCell<Literal>>;

#[derive(Default)]
struct Scope {
    values: IndexMap<String, ValueRef>,
    parent: Option<Environment>,
}

/// Handle to a scope; cloning shares the scope
#[derive(Clone, Default)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
}

impl Environment {
    /// New root scope
    pub fn new() -> Self {
        Self::default()
    }

    /// New scope enclosed by `parent`
    pub fn with_parent(parent: &Environment) -> Self {
        Self {
            scope: Rc::new(RefCell::new(Scope {
                values: IndexMap::new(),
                parent: Some(parent.clone()),
            })),
        }
    }

    pub fn parent(&self) -> Option<Environment> {
        self.scope.borrow().parent.clone()
    }

    /// Bind `name` in this scope. Returns false, binding nothing, if the
    /// name already exists in this same scope. Shadowing an outer binding is
    /// allowed.
    pub fn define(
        &self,
        name: &str,
        value: Literal,
    ) -> bool {
        let mut scope = self.scope.borrow_mut();
        if scope.values.contains_key(name) {
            return false;
        }
        scope
            .values
            .insert(name.to_string(), Rc::new(RefCell::new(value)));
        true
    }

    /// Cell of the nearest binding of `name`
    pub fn get_ref(
        &self,
        name: &str,
    ) -> Option<ValueRef> {
        let mut current = self.clone();
        loop {
            let next = {
                let scope = current.scope.borrow();
                if let Some(value) = scope.values.get(name) {
                    return Some(Rc::clone(value));
                }
                scope.parent.clone()
            };
            current = next?;
        }
    }

    /// Value of the nearest binding of `name`
    pub fn get(
        &self,
        name: &str,
    ) -> Option<Literal> {
        self.get_ref(name).map(|cell| cell.borrow().clone())
    }

    /// Overwrite the nearest binding of `name`. Returns false if unbound.
    pub fn assign(
        &self,
        name: &str,
        value: Literal,
    ) -> bool {
        match self.get_ref(name) {
            Some(cell) => {
                *cell.borrow_mut() = value;
                true
            }
            None => false,
        }
    }

    /// Whether `name` is bound here or in any enclosing scope
    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.get_ref(name).is_some()
    }

    /// Whether `name` is bound in this scope itself
    pub fn contains_local(
        &self,
        name: &str,
    ) -> bool {
        self.scope.borrow().values.contains_key(name)
    }

    /// Number of enclosing scopes (0 for a root scope)
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        depth
    }

    /// Names bound in this scope, in definition order
    pub fn local_names(&self) -> Vec<String> {
        self.scope.borrow().values.keys().cloned().collect()
    }

    /// Whether both handles point at the same scope
    pub fn same_scope(
        &self,
        other: &Environment,
    ) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }
}

impl fmt::Debug for Environment {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let scope = self.scope.borrow();
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("values", &scope.values.keys().collect::<Vec<_>>())
            .finish()
    }
}
