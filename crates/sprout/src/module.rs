//! Evaluated sprout modules.

use std::collections::HashMap;

use crate::ast::{FnDef, Item};
use crate::env::Env;
use crate::error::EvalError;
use crate::interp::Interp;
use crate::parser::parse_module;
use crate::value::Value;

/// A named, fully evaluated module: its top-level bindings and its
/// function table. Once built, a module is immutable and `Send + Sync`,
/// so calls can come from any thread.
#[derive(Debug)]
pub struct Module {
    name: String,
    globals: HashMap<String, Value>,
    functions: HashMap<String, FnDef>,
}

impl Module {
    /// Parse `source` and evaluate its top-level `let` bindings in order.
    /// Bindings may reference earlier bindings and any function in the
    /// module.
    pub fn eval(name: &str, source: &str) -> Result<Self, EvalError> {
        let items = parse_module(source)?;

        // Functions are collected first so top-level lets can call them.
        let mut functions = HashMap::new();
        for item in &items {
            if let Item::Fn(def) = item {
                if functions.insert(def.name.clone(), def.clone()).is_some() {
                    return Err(EvalError::DuplicateDefinition(def.name.clone()));
                }
            }
        }

        let mut globals = HashMap::new();
        for item in &items {
            if let Item::Let { name, value } = item {
                if globals.contains_key(name) {
                    return Err(EvalError::DuplicateDefinition(name.clone()));
                }
                let value = Interp::new(&functions, &globals).eval_expr(value, &Env::new())?;
                globals.insert(name.clone(), value);
            }
        }

        Ok(Self {
            name: name.to_string(),
            globals,
            functions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_function(&self, function: &str) -> bool {
        self.functions.contains_key(function)
    }

    /// Look up a top-level `let` binding.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Call a function defined in this module.
    ///
    /// Fails with `EvalError::UndefinedFunction` when the function does
    /// not exist, `EvalError::WrongArgCount` on an arity mismatch, and
    /// whatever the body raises otherwise.
    pub fn call(&self, function: &str, args: &[Value]) -> Result<Value, EvalError> {
        let def = self
            .functions
            .get(function)
            .ok_or_else(|| EvalError::UndefinedFunction(function.to_string()))?;
        Interp::new(&self.functions, &self.globals).call_function(def, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_lets_see_earlier_bindings_and_functions() {
        let module = Module::eval(
            "m",
            "fn double(a) { a * 2 }\nlet base = 10;\nlet result = double(base) + 1;",
        )
        .unwrap();
        assert_eq!(module.global("result"), Some(&Value::Int(21)));
        assert_eq!(module.call("double", &[Value::Int(3)]).unwrap(), Value::Int(6));
        assert!(module.has_function("double"));
        assert!(!module.has_function("missing"));
    }

    #[test]
    fn duplicate_function_is_rejected() {
        let err = Module::eval("m", "fn f() { 1 }\nfn f() { 2 }").unwrap_err();
        assert_eq!(err, EvalError::DuplicateDefinition("f".to_string()));
    }

    #[test]
    fn duplicate_let_is_rejected() {
        let err = Module::eval("m", "let x = 1;\nlet x = 2;").unwrap_err();
        assert_eq!(err, EvalError::DuplicateDefinition("x".to_string()));
    }

    #[test]
    fn missing_function_is_undefined() {
        let module = Module::eval("m", "fn f() { 1 }").unwrap();
        let err = module.call("g", &[]).unwrap_err();
        assert_eq!(err, EvalError::UndefinedFunction("g".to_string()));
    }
}
