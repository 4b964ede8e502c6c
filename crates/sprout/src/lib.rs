//! Sprout: a small embeddable scripting language.
//!
//! A sprout module is a source file containing top-level `let` bindings
//! and `fn` definitions. The host evaluates a module once and then calls
//! its functions by name:
//!
//! ```
//! use sprout::Module;
//!
//! let module = Module::eval("greeter", "fn hello() { \"hi\" }").unwrap();
//! let value = module.call("hello", &[]).unwrap();
//! assert_eq!(value.to_string(), "hi");
//! ```
//!
//! The language is expression-based and deterministic: no I/O, no
//! mutation after binding, no loops (recursion suffices). That keeps an
//! embedded call a pure function of the module source and its arguments.

pub mod ast;
pub mod env;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod module;
pub mod parser;
pub mod token;
pub mod value;

pub use error::{EvalError, ParseError};
pub use module::Module;
pub use value::Value;
