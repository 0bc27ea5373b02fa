//! Lexically-nested name-to-value bindings.
//!
//! An [`Environment`] is a `(store, outer?)` chain. Lookup walks outward
//! through `outer` links; writes always land in the local `store`, so
//! assigning a name never mutates a binding in an enclosing scope. A new
//! `Environment` is created at program start and again on every function
//! call, with its `outer` set to the environment captured at the function's
//! definition site - this is what makes closures work.
//!
//! # See Also
//!
//! * [`crate::object::Value::Function`] - carries a reference to the
//!   environment in force at its definition point
//! * [`crate::evaluator`] - creates a fresh `Environment` per call

use crate::object::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A lexical scope: a local name table plus an optional link to the
/// enclosing scope.
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a fresh, top-level environment with no enclosing scope.
    pub fn new() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: None,
        }))
    }

    /// Creates a new environment enclosed by `outer`, as when entering a
    /// function call or a closure's captured scope.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Looks up `name`, walking outward through enclosing scopes on a
    /// local miss. Does not consult the builtin table; that happens one
    /// level up, in [`crate::evaluator`].
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref()?.borrow().get(name)
    }

    /// Binds `name` to `value` in this environment's local store. Never
    /// reaches into an enclosing scope, even if `name` shadows a binding
    /// there.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_returns_none() {
        let env = Environment::new();
        assert!(env.borrow().get("x").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let env = Environment::new();
        env.borrow_mut().set("x", Value::Integer(5));
        match env.borrow().get("x") {
            Some(Value::Integer(5)) => {}
            other => panic!("expected Integer(5), got {other:?}"),
        }
    }

    #[test]
    fn test_enclosed_sees_outer_binding() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Integer(1));
        let inner = Environment::new_enclosed(outer);
        match inner.borrow().get("x") {
            Some(Value::Integer(1)) => {}
            other => panic!("expected Integer(1), got {other:?}"),
        }
    }

    #[test]
    fn test_write_in_inner_does_not_mutate_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("x", Value::Integer(1));
        let inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.borrow_mut().set("x", Value::Integer(2));

        match inner.borrow().get("x") {
            Some(Value::Integer(2)) => {}
            other => panic!("expected inner Integer(2), got {other:?}"),
        }
        match outer.borrow().get("x") {
            Some(Value::Integer(1)) => {}
            other => panic!("expected outer untouched Integer(1), got {other:?}"),
        }
    }

    #[test]
    fn test_outer_binding_created_after_closure_is_still_visible() {
        // Demonstrates the capture-by-reference semantics a closure relies on:
        // the inner scope sees updates made to `outer` after the link was formed.
        let outer = Environment::new();
        let inner = Environment::new_enclosed(Rc::clone(&outer));
        outer.borrow_mut().set("x", Value::Integer(99));
        match inner.borrow().get("x") {
            Some(Value::Integer(99)) => {}
            other => panic!("expected Integer(99), got {other:?}"),
        }
    }
}
