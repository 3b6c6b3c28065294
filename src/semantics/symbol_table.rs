//! Lexically scoped symbol table
//!
//! A [`ScopeStack`] is a stack of name→[`Symbol`] maps. Scope 0 is the
//! global scope and lives for the whole analysis; a new scope is pushed for
//! every function body, `if` branch, and `while` body and popped on leaving
//! it. Lookup walks innermost→outermost, so shadowing works the usual way.

use crate::parser::ast::TypeTag;
use log::debug;
use rustc_hash::FxHashMap;

/// What kind of declaration produced a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolCategory {
    Variable,
    Parameter,
    Function,
}

/// Compile-time record of a declared name
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub declared_type: TypeTag,
    pub category: SymbolCategory,
    pub scope_level: usize,
}

/// Stack of lexical scopes, innermost last
pub struct ScopeStack {
    scopes: Vec<FxHashMap<String, Symbol>>,
}

impl ScopeStack {
    /// Create a scope stack holding only the global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Number of live scopes (always at least 1)
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push a fresh innermost scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
        debug!("entered scope, depth now {}", self.depth());
    }

    /// Pop the innermost scope. The global scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            debug!("exited scope, depth now {}", self.depth());
        }
    }

    /// Insert a symbol into the innermost scope. Returns `false` if the name
    /// already exists in that exact scope; the original symbol is kept and
    /// the new one discarded. Redeclaring a name from an enclosing scope is
    /// legal shadowing and succeeds.
    pub fn declare(&mut self, name: &str, declared_type: TypeTag, category: SymbolCategory) -> bool {
        let scope_level = self.scopes.len() - 1;
        // unwrap is safe: the global scope always exists
        let scope = self.scopes.last_mut().unwrap();

        if scope.contains_key(name) {
            return false;
        }

        debug!(
            "declared {:?} '{}' of type {} at level {}",
            category, name, declared_type, scope_level
        );
        scope.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                declared_type,
                category,
                scope_level,
            },
        );
        true
    }

    /// Look up a name, searching from the innermost scope outward
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_resolve() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.declare("x", TypeTag::Int, SymbolCategory::Variable));

        let sym = scopes.resolve("x").unwrap();
        assert_eq!(sym.declared_type, TypeTag::Int);
        assert_eq!(sym.category, SymbolCategory::Variable);
        assert_eq!(sym.scope_level, 0);
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.declare("x", TypeTag::Int, SymbolCategory::Variable));
        assert!(!scopes.declare("x", TypeTag::Float, SymbolCategory::Variable));

        // the first declaration stays authoritative
        assert_eq!(scopes.resolve("x").unwrap().declared_type, TypeTag::Int);
    }

    #[test]
    fn test_shadowing_resolves_innermost() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", TypeTag::Int, SymbolCategory::Variable);

        scopes.enter_scope();
        assert!(scopes.declare("x", TypeTag::Float, SymbolCategory::Variable));
        assert_eq!(scopes.resolve("x").unwrap().declared_type, TypeTag::Float);
        assert_eq!(scopes.resolve("x").unwrap().scope_level, 1);

        scopes.exit_scope();
        assert_eq!(scopes.resolve("x").unwrap().declared_type, TypeTag::Int);
    }

    #[test]
    fn test_resolve_walks_outward() {
        let mut scopes = ScopeStack::new();
        scopes.declare("g", TypeTag::Float, SymbolCategory::Variable);
        scopes.enter_scope();
        scopes.enter_scope();

        assert_eq!(scopes.resolve("g").unwrap().declared_type, TypeTag::Float);
        assert!(scopes.resolve("missing").is_none());
    }

    #[test]
    fn test_exit_scope_guarded_at_global() {
        let mut scopes = ScopeStack::new();
        scopes.declare("x", TypeTag::Int, SymbolCategory::Variable);

        scopes.exit_scope();
        scopes.exit_scope();

        // global scope survives any number of pops
        assert_eq!(scopes.depth(), 1);
        assert!(scopes.resolve("x").is_some());
    }
}
