//! Lexical environments for evaluation.

use std::collections::HashMap;

use crate::value::Value;

/// A parent-linked scope holding local bindings (function parameters and
/// `let`s). Module-level bindings live outside the chain and are checked
/// by the interpreter after the chain is exhausted.
#[derive(Debug, Default)]
pub struct Env<'a> {
    locals: HashMap<String, Value>,
    parent: Option<&'a Env<'a>>,
}

impl<'a> Env<'a> {
    /// Root scope with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Child scope that resolves through `self` on a miss.
    pub fn child(&self) -> Env<'_> {
        Env {
            locals: HashMap::new(),
            parent: Some(self),
        }
    }

    pub fn define(&mut self, name: String, value: Value) {
        self.locals.insert(name, value);
    }

    /// Resolve a name through the scope chain.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.locals.get(name) {
            Some(value) => Some(value),
            None => self.parent.and_then(|p| p.get(name)),
        }
    }
}
