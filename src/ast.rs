//! This module defines the core syntax-tree types and helper functions for
//! representing values in the interpreter. The main enum, [`Value`], covers
//! every kind the language knows: integers, floats, strings, booleans,
//! symbols, lists, closures, registered primitives, and the unspecified
//! result. The same tree serves as both parsed program text (a form) and as
//! runtime data; the reader only ever produces the atom and list variants.
//! Ergonomic helper functions such as [`val`], [`sym`], and [`nil`] are
//! provided for convenient tree construction in tests, alongside conversion
//! traits from common Rust types. Equality and display logic are customized:
//! closures compare by captured scope identity, and display output matches
//! what the REPL echoes.

use std::rc::Rc;

use crate::builtinops::Primitive;
use crate::env::Environment;

/// Core value type in the interpreter
///
/// Lists are used uniformly as data and as executable code: the evaluator
/// treats a list as a special form or an application, while `quote` hands
/// the same list back as data.
///
/// To build a tree, use the ergonomic helper functions:
/// - `val(42)` for values, `sym("name")` for symbols, `nil()` for empty lists
/// - `val([1, 2, 3])` for homogeneous lists
/// - `val(vec![sym("op"), val(42)])` for mixed lists
#[derive(Clone)]
pub enum Value {
    /// Integer literals and integer arithmetic results
    Integer(i64),
    /// Float literals and float arithmetic results
    Float(f64),
    /// String literals (no escape sequences; see the reader)
    String(String),
    /// Boolean values; source text reaches these through the `#t`/`#f`
    /// bindings in the root scope, not through a literal syntax
    Bool(bool),
    /// Symbols (identifiers resolved against the scope chain)
    Symbol(String),
    /// Lists (the empty list is a value, not an error)
    List(Vec<Value>),
    /// Registered primitive operators, installed into the root scope
    Builtin(&'static Primitive),
    /// User-defined functions: parameter names, body form, defining scope
    Closure {
        params: Vec<String>,
        body: Box<Value>,
        env: Rc<Environment>,
    },
    /// The explicit "no value" result of `set!` and of an empty `begin`
    Unspecified,
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "Integer({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::String(s) => write!(f, "String(\"{s}\")"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Symbol(s) => write!(f, "Symbol({s})"),
            Value::List(list) => {
                write!(f, "List(")?;
                for (i, v) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v:?}")?;
                }
                write!(f, ")")
            }
            Value::Builtin(p) => write!(f, "Builtin({})", p.name),
            // The captured scope is skipped: environments can reach closures
            // that reach this same environment again.
            Value::Closure { params, body, .. } => {
                write!(f, "Closure(params={params:?}, body={body:?})")
            }
            Value::Unspecified => write!(f, "Unspecified"),
        }
    }
}

// From trait implementations for Value - enables .into() conversion
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

macro_rules! impl_from_integer {
    ($int_type:ty) => {
        impl From<$int_type> for Value {
            fn from(n: $int_type) -> Self {
                Value::Integer(n as i64)
            }
        }
    };
}

// Generate From implementations for all integer types
impl_from_integer!(i8);
impl_from_integer!(i16);
impl_from_integer!(i32);
impl_from_integer!(i64); // Special case - no casting
impl_from_integer!(u8);
impl_from_integer!(u16);
impl_from_integer!(u32);

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(arr: [T; N]) -> Self {
        Value::List(arr.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(slice: &[T]) -> Self {
        Value::List(slice.iter().cloned().map(|x| x.into()).collect())
    }
}

/// Helper function for creating symbols - works great in mixed lists!
/// Accepts both &str and String
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn sym<S: AsRef<str>>(name: S) -> Value {
    Value::Symbol(name.as_ref().to_owned())
}

/// Helper function for creating Values - works great in mixed lists!
/// Accepts any type that can be converted to Value
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn val<T: Into<Value>>(value: T) -> Value {
    value.into()
}

/// Helper function for creating empty lists (nil)
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn nil() -> Value {
    Value::List(vec![])
}

impl Value {
    /// Short tag for error messages
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Symbol(_) => "symbol",
            Value::List(_) => "list",
            Value::Builtin(_) => "builtin",
            Value::Closure { .. } => "closure",
            Value::Unspecified => "unspecified",
        }
    }

    /// The language's one truthiness rule: `#f` is false, everything else
    /// (zero, empty lists, the unspecified value) is true.
    pub(crate) fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    /// Numeric view with integer-to-float promotion, for the primitives
    /// that accept either numeric kind.
    pub(crate) fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            // Integral floats keep their point so 2.0 never prints as 2
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            // String contents print bare; `display` and the REPL echo both
            // want the text, not a re-quotable literal
            Value::String(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Symbol(s) => write!(f, "{s}"),
            Value::List(elements) => {
                write!(f, "(")?;
                for (i, elem) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, ")")
            }
            Value::Builtin(p) => write!(f, "#<builtin:{}>", p.name),
            Value::Closure { params, .. } => {
                write!(f, "#<lambda (")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ")>")
            }
            Value::Unspecified => write!(f, "#<unspecified>"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Compare primitives by registry name, not function pointer
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (
                Value::Closure {
                    params: p1,
                    body: b1,
                    env: e1,
                },
                Value::Closure {
                    params: p2,
                    body: b2,
                    env: e2,
                },
            ) => p1 == p2 && b1 == b2 && Rc::ptr_eq(e1, e2),
            (Value::Unspecified, Value::Unspecified) => true,
            _ => false, // Different variants are never equal
        }
    }
}


#[cfg(test)]
mod display_tests {
    use super::*;

    #[test]
    fn test_display_data_driven() {
        let test_cases = vec![
            (val(42), "42"),
            (val(-7), "-7"),
            (val(2.5), "2.5"),
            // Integral floats keep their decimal point
            (val(2.0), "2.0"),
            (val(-0.0), "-0.0"),
            // Strings print their bare content
            (val("hello world"), "hello world"),
            (val(""), ""),
            (val(true), "#t"),
            (val(false), "#f"),
            (sym("adder"), "adder"),
            (nil(), "()"),
            (val([1, 2, 3]), "(1 2 3)"),
            (
                val(vec![val(1), val(vec![val(2), val(3)])]),
                "(1 (2 3))",
            ),
            (
                val(vec![sym("a"), val("b c"), val(1.5)]),
                "(a b c 1.5)",
            ),
            (Value::Unspecified, "#<unspecified>"),
        ];

        for (value, expected) in test_cases {
            assert_eq!(value.to_string(), expected, "display of {value:?}");
        }
    }
}
