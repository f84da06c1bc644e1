use std::collections::{HashMap, HashSet};
use log::trace;
use crate::language::error::Result;
use crate::language::value::Value;
use crate::runtime_error;

/// Index of a scope inside an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    bindings: HashMap<String, Value>,
    constants: HashSet<String>,
}

/// A chain of lexical scopes kept in one arena.
///
/// Scopes are pushed and popped in strict nesting order, so a parent always
/// outlives its children and parent links are plain indices. Name resolution
/// starts at the current scope and walks outward.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// A fresh environment holding only the global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
            current: ScopeId(0),
        }
    }

    pub fn global_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Opens a child of the current scope and makes it current.
    pub fn push_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            parent: Some(self.current),
            ..Scope::default()
        });
        self.current = id;
        trace!("Entered scope {} (depth {})", id.0, self.depth());
        id
    }

    /// Drops the current scope and its bindings. The global scope is never popped.
    pub fn pop_scope(&mut self) -> bool {
        if self.scopes.len() <= 1 {
            return false;
        }
        if let Some(scope) = self.scopes.pop() {
            self.current = scope.parent.unwrap_or(ScopeId(0));
        }
        trace!("Left scope, back in {} (depth {})", self.current.0, self.depth());
        true
    }

    fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    /// Innermost scope, starting from the current one, that binds `name`.
    pub fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = self.scope(id);
            if scope.bindings.contains_key(name) {
                return Some(id);
            }
            cursor = scope.parent;
        }
        None
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.resolve(name)
            .is_some_and(|id| self.scope(id).constants.contains(name))
    }

    /// Binds `name` in the current scope. Shadowing an outer binding is allowed,
    /// redeclaring within the same scope is not.
    pub fn declare(&mut self, name: &str, value: Value, constant: bool) -> Result<Value> {
        let id = self.current;
        let scope = self.scope_mut(id);
        if scope.bindings.contains_key(name) {
            return runtime_error!(
                DuplicateDeclaration,
                format!("Cannot declare variable '{}' as it is already defined in this scope", name)
            );
        }

        scope.bindings.insert(name.to_string(), value.clone());
        if constant {
            scope.constants.insert(name.to_string());
        }
        trace!("Declared {}'{}' in scope {}", if constant { "constant " } else { "" }, name, id.0);

        Ok(value)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value> {
        let Some(id) = self.resolve(name) else {
            return runtime_error!(
                UndefinedVariable,
                format!("Cannot assign to '{}' as it does not exist", name)
            );
        };

        let scope = self.scope_mut(id);
        if scope.constants.contains(name) {
            return runtime_error!(
                ConstReassignment,
                format!("Cannot reassign variable '{}' as it was declared constant", name)
            );
        }

        scope.bindings.insert(name.to_string(), value.clone());
        Ok(value)
    }

    pub fn lookup(&self, name: &str) -> Result<Value> {
        match self.resolve(name) {
            Some(id) => Ok(self.scope(id).bindings[name].clone()),
            None => runtime_error!(
                UndefinedVariable,
                format!("Cannot resolve '{}' as it does not exist", name)
            ),
        }
    }

    /// Names bound directly in the current scope, sorted.
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.scope(self.current).bindings.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::error::ErrorKind;

    #[test]
    fn declare_then_lookup() {
        let mut env = Environment::new();
        assert_eq!(env.declare("x", Value::Number(15.0), false).unwrap(), Value::Number(15.0));
        assert_eq!(env.lookup("x").unwrap(), Value::Number(15.0));
    }

    #[test]
    fn duplicate_declaration_in_one_scope_fails() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1.0), false).unwrap();
        let error = env.declare("x", Value::Number(2.0), false).unwrap_err();
        assert_eq!(error.kind, ErrorKind::DuplicateDeclaration);
        assert_eq!(env.lookup("x").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn nested_scope_may_shadow() {
        let mut env = Environment::new();
        env.declare("x", Value::Number(1.0), true).unwrap();

        env.push_scope();
        env.declare("x", Value::Number(2.0), false).unwrap();
        assert_eq!(env.lookup("x").unwrap(), Value::Number(2.0));
        env.assign("x", Value::Number(3.0)).unwrap();
        assert_eq!(env.lookup("x").unwrap(), Value::Number(3.0));

        assert!(env.pop_scope());
        assert_eq!(env.lookup("x").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn constants_cannot_be_reassigned() {
        let mut env = Environment::new();
        env.declare("y", Value::Number(1.0), true).unwrap();
        let error = env.assign("y", Value::Number(2.0)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::ConstReassignment);
        assert_eq!(env.lookup("y").unwrap(), Value::Number(1.0));

        env.push_scope();
        let error = env.assign("y", Value::Number(2.0)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::ConstReassignment);
        assert!(env.is_constant("y"));
    }

    #[test]
    fn let_bindings_can_be_reassigned_from_inner_scopes() {
        let mut env = Environment::new();
        env.declare("y", Value::Number(1.0), false).unwrap();
        env.push_scope();
        env.assign("y", Value::Number(2.0)).unwrap();
        env.pop_scope();
        assert_eq!(env.lookup("y").unwrap(), Value::Number(2.0));
        assert!(!env.is_constant("y"));
    }

    #[test]
    fn unknown_names_fail() {
        let mut env = Environment::new();
        assert_eq!(env.lookup("nope").unwrap_err().kind, ErrorKind::UndefinedVariable);
        assert_eq!(
            env.assign("nope", Value::Null).unwrap_err().kind,
            ErrorKind::UndefinedVariable
        );
    }

    #[test]
    fn inner_bindings_vanish_with_their_scope() {
        let mut env = Environment::new();
        let inner = env.push_scope();
        assert_eq!(env.current_scope(), inner);
        env.declare("tmp", Value::Boolean(true), false).unwrap();
        assert_eq!(env.local_names(), vec!["tmp".to_string()]);
        env.pop_scope();
        assert_eq!(env.current_scope(), env.global_scope());
        assert!(env.lookup("tmp").is_err());
        assert!(!env.pop_scope());
        assert_eq!(env.depth(), 1);
    }
}
