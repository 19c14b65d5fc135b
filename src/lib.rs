//! Lisplet - a small Lisp-like language
//!
//! This crate implements a compact tree-walking interpreter: a reader that
//! turns s-expression text into a nested form, chained mutable environments
//! with nearest-scope assignment, and a recursive evaluator with closures,
//! conditionals, sequencing, and quotation.
//!
//! ## The language
//!
//! ```scheme
//! ; comment lines are dropped before parsing
//! (set! x 3)                          ; assign-or-define
//! (set! double (lambda (n) (* n 2)))  ; closures capture their scope
//! (if (< x 10) (double x) 0)          ; only #f selects the else branch
//! (begin (displayln "hi") (+ 1 2))    ; sequencing, value of the last form
//! (quote (a b c))                     ; data, unevaluated
//! ```
//!
//! Top-level source is implicitly wrapped in one `(begin ...)`, so a file of
//! expressions evaluates in order as a single program.
//!
//! ## Semantics worth knowing
//!
//! - `set!` mutates the nearest enclosing scope that already binds the name
//!   and defines in the current scope otherwise. It is the only binding
//!   construct; there is no separate `define`.
//! - Exactly one value is false: `#f`. Zero, empty lists, and strings are
//!   all true in conditions.
//! - Evaluation is plain recursion without tail-call elimination, so
//!   interpreted recursion depth is bounded by the native stack.
//!
//! ## Modules
//!
//! - `reader`: s-expression parsing from text
//! - `env`: chained scopes with nearest-scope assignment
//! - `evaluator`: the recursive evaluation engine
//! - `builtinops`: primitive operators installed into the root scope
//! - `ast`: the Value type shared by all of the above

use std::fmt;

/// Error types for the interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed input: unterminated lists or string literals, and special
    /// forms missing required positions
    Syntax(String),
    /// Symbol lookup missed in every scope up the chain
    UnknownIdentifier(String),
    /// A closure was invoked with fewer arguments than declared parameters
    MissingParameter { expected: usize, got: usize },
    /// The head of an application evaluated to something that is not callable
    NotInvocable(String),
    /// A primitive operator was applied to operands of the wrong kind or count
    Type(String),
    /// Integer overflow, or division/modulo by zero
    Arithmetic(String),
}

impl Error {
    /// Create a Syntax error from any message-like value
    pub fn syntax(message: impl Into<String>) -> Self {
        Error::Syntax(message.into())
    }

    /// Create a Type error from any message-like value
    pub fn type_error(message: impl Into<String>) -> Self {
        Error::Type(message.into())
    }

    /// Create an Arithmetic error from any message-like value
    pub fn arithmetic(message: impl Into<String>) -> Self {
        Error::Arithmetic(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Syntax(msg) => write!(f, "SyntaxError: {msg}"),
            Error::UnknownIdentifier(name) => write!(f, "Unknown identifier: {name}"),
            Error::MissingParameter { expected, got } => write!(
                f,
                "MissingParameter: function takes {expected} parameters but was given {got}"
            ),
            Error::NotInvocable(what) => write!(f, "Cannot apply non-function value: {what}"),
            Error::Type(msg) => write!(f, "Type error: {msg}"),
            Error::Arithmetic(msg) => write!(f, "Arithmetic error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub mod ast;
pub mod builtinops;
pub mod env;
pub mod evaluator;
pub mod reader;
