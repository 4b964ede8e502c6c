//! Parse and evaluation errors.

use thiserror::Error;

/// Error produced while lexing or parsing sprout source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at line {line}, column {col}")]
    UnexpectedChar { ch: char, line: u32, col: u32 },

    #[error("unterminated string literal starting at line {line}")]
    UnterminatedString { line: u32 },

    #[error("invalid number literal `{text}` at line {line}")]
    InvalidNumber { text: String, line: u32 },

    #[error("unexpected {found} at line {line}, column {col}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        line: u32,
        col: u32,
    },
}

/// Error produced while evaluating a module or calling one of its
/// functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("undefined function: {0}")]
    UndefinedFunction(String),

    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("{function} expects {expected} arguments, got {actual}")]
    WrongArgCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("call depth limit of {0} exceeded")]
    RecursionLimit(usize),

    /// Raised from script code via the `fail` builtin.
    #[error("{0}")]
    Script(String),
}
