//! Built-in operator registry.
//!
//! This module provides the static table of primitive operations installed
//! into the root scope, each a typed Rust function over already-evaluated
//! values.
//!
//! ```scheme
//! (+ 1 2)            ; arithmetic, integer result
//! (+ 1 2.5)          ; any float operand promotes the result to float
//! (/ 3 2)            ; true division, always a float: 1.5
//! (< "ant" "bee")    ; comparisons also order strings
//! (and 0 5)          ; returns an operand: 5, since 0 is true here
//! (car (quote (1 2)))
//! (displayln "hi")
//! ```
//!
//! ## Functions, not special forms
//!
//! Everything in this registry receives its arguments fully evaluated.
//! `and` and `or` are ordinary binary functions here - both operands are
//! evaluated before the call, and the result is one of the operands chosen
//! by the single truthiness rule (`#f` is the only false value). The
//! constructs that control evaluation of their arguments (`set!`, `lambda`,
//! `quote`, `begin`, `if`) are recognized by the evaluator and are not in
//! this table.
//!
//! ## Numeric behavior
//!
//! - Integer-integer arithmetic stays integer and is overflow-checked;
//!   any float operand promotes the operation to floats.
//! - `/` is true division and always yields a float; dividing by zero is
//!   an error rather than an infinity.
//! - `%` takes the sign of its divisor, and an integer pair stays integer.
//!
//! ## Adding a new operator
//!
//! 1. Implement a typed function matching one of the [`PrimitiveImpl`]
//!    shapes.
//! 2. Add an entry to `PRIMITIVES` with its name and declared arity.
//! 3. Add cases to the table-driven tests below.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::Error;
use crate::ast::Value;

/// Expected number of arguments for a primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arity {
    /// Exactly this many arguments
    Exact(usize),
    /// Any number of arguments
    Any,
}

/// Implementation of a primitive, typed by operand shape
#[derive(Clone, Copy)]
pub enum PrimitiveImpl {
    Unary(fn(&Value) -> Result<Value, Error>),
    Binary(fn(&Value, &Value) -> Result<Value, Error>),
    Variadic(fn(&[Value]) -> Result<Value, Error>),
}

impl std::fmt::Debug for PrimitiveImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveImpl::Unary(_) => write!(f, "Unary(<fn>)"),
            PrimitiveImpl::Binary(_) => write!(f, "Binary(<fn>)"),
            PrimitiveImpl::Variadic(_) => write!(f, "Variadic(<fn>)"),
        }
    }
}

/// Definition of a primitive operator
#[derive(Debug)]
pub struct Primitive {
    /// The name this operator is bound to in the root scope
    pub name: &'static str,
    /// Expected number of arguments, validated before the implementation runs
    pub arity: Arity,
    imp: PrimitiveImpl,
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Self) -> bool {
        // Compare operators by name, which uniquely identifies them
        self.name == other.name
    }
}

impl Primitive {
    /// Check the argument count against the declared arity
    pub(crate) fn validate_arity(&self, got: usize) -> Result<(), Error> {
        match self.arity {
            Arity::Exact(expected) if got != expected => Err(Error::type_error(format!(
                "{} expects {} argument(s), got {}",
                self.name, expected, got
            ))),
            _ => Ok(()),
        }
    }

    /// Validate arity, then dispatch to the typed implementation
    pub fn invoke(&self, args: &[Value]) -> Result<Value, Error> {
        self.validate_arity(args.len())?;
        match (self.imp, args) {
            (PrimitiveImpl::Unary(f), [a]) => f(a),
            (PrimitiveImpl::Binary(f), [a, b]) => f(a, b),
            (PrimitiveImpl::Variadic(f), _) => f(args),
            // Arity validation keeps the fixed shapes exhaustive
            _ => Err(Error::type_error(format!(
                "{} applied to a mismatched argument list",
                self.name
            ))),
        }
    }
}

//
// Primitive implementations
//

/// Integer pairs stay integer (checked); any float operand promotes both
/// sides and the result to float.
fn arith(
    name: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => int_op(*x, *y)
            .map(Value::Integer)
            .ok_or_else(|| Error::arithmetic(format!("integer overflow in {name}"))),
        _ => match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => Ok(Value::Float(float_op(x, y))),
            _ => Err(Error::type_error(format!(
                "{} expects numbers, got {} and {}",
                name,
                a.type_name(),
                b.type_name()
            ))),
        },
    }
}

fn builtin_add(a: &Value, b: &Value) -> Result<Value, Error> {
    arith("+", a, b, i64::checked_add, |x, y| x + y)
}

fn builtin_sub(a: &Value, b: &Value) -> Result<Value, Error> {
    arith("-", a, b, i64::checked_sub, |x, y| x - y)
}

fn builtin_mul(a: &Value, b: &Value) -> Result<Value, Error> {
    arith("*", a, b, i64::checked_mul, |x, y| x * y)
}

/// True division: the result is always a float, even for two integers.
/// A zero divisor is an error for both numeric kinds.
fn builtin_div(a: &Value, b: &Value) -> Result<Value, Error> {
    match (a.as_float(), b.as_float()) {
        (Some(_), Some(y)) if y == 0.0 => Err(Error::arithmetic("division by zero")),
        (Some(x), Some(y)) => Ok(Value::Float(x / y)),
        _ => Err(Error::type_error(format!(
            "/ expects numbers, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// Modulo with the divisor's sign: (% -7 3) is 2 and (% 7 -3) is -2.
fn builtin_mod(a: &Value, b: &Value) -> Result<Value, Error> {
    match (a, b) {
        (Value::Integer(_), Value::Integer(0)) => Err(Error::arithmetic("modulo by zero")),
        // x % -1 is always 0, and sidesteps the i64::MIN remainder overflow
        (Value::Integer(_), Value::Integer(-1)) => Ok(Value::Integer(0)),
        (Value::Integer(x), Value::Integer(y)) => {
            let r = x % y;
            let m = if r != 0 && (r < 0) != (*y < 0) { r + y } else { r };
            Ok(Value::Integer(m))
        }
        _ => match (a.as_float(), b.as_float()) {
            (Some(_), Some(y)) if y == 0.0 => Err(Error::arithmetic("modulo by zero")),
            (Some(x), Some(y)) => {
                let r = x % y;
                let m = if r != 0.0 && (r < 0.0) != (y < 0.0) {
                    r + y
                } else {
                    r
                };
                Ok(Value::Float(m))
            }
            _ => Err(Error::type_error(format!(
                "% expects numbers, got {} and {}",
                a.type_name(),
                b.type_name()
            ))),
        },
    }
}

// Macro to generate the ordered-comparison functions. Integer pairs compare
// exactly, mixed numeric pairs promote to float, and string pairs compare
// lexicographically.
macro_rules! numeric_comparison {
    ($name:ident, $op:tt, $op_str:expr) => {
        fn $name(a: &Value, b: &Value) -> Result<Value, Error> {
            match (a, b) {
                (Value::Integer(x), Value::Integer(y)) => Ok(Value::Bool(x $op y)),
                (Value::String(x), Value::String(y)) => Ok(Value::Bool(x $op y)),
                _ => match (a.as_float(), b.as_float()) {
                    (Some(x), Some(y)) => Ok(Value::Bool(x $op y)),
                    _ => Err(Error::type_error(format!(
                        "{} expects two numbers or two strings, got {} and {}",
                        $op_str,
                        a.type_name(),
                        b.type_name()
                    ))),
                },
            }
        }
    };
}

numeric_comparison!(builtin_lt, <, "<");
numeric_comparison!(builtin_gt, >, ">");
numeric_comparison!(builtin_le, <=, "<=");
numeric_comparison!(builtin_ge, >=, ">=");

/// Equality across kinds: numeric operands compare by value (so 3 equals
/// 3.0), everything else compares structurally. Mismatched kinds are just
/// unequal, never an error.
fn builtin_equal(a: &Value, b: &Value) -> Result<Value, Error> {
    let eq = match (a, b) {
        (Value::Integer(x), Value::Float(y)) | (Value::Float(y), Value::Integer(x)) => {
            (*x as f64) == *y
        }
        _ => a == b,
    };
    Ok(Value::Bool(eq))
}

// and/or receive evaluated operands (no short-circuiting) and return one of
// them: the language treats them as plain binary functions.
fn builtin_and(a: &Value, b: &Value) -> Result<Value, Error> {
    Ok(if a.is_truthy() { b.clone() } else { a.clone() })
}

fn builtin_or(a: &Value, b: &Value) -> Result<Value, Error> {
    Ok(if a.is_truthy() { a.clone() } else { b.clone() })
}

fn builtin_not(a: &Value) -> Result<Value, Error> {
    Ok(Value::Bool(!a.is_truthy()))
}

fn builtin_list(args: &[Value]) -> Result<Value, Error> {
    Ok(Value::List(args.to_vec()))
}

fn builtin_car(a: &Value) -> Result<Value, Error> {
    match a {
        Value::List(list) => match list.first() {
            Some(first) => Ok(first.clone()),
            None => Err(Error::type_error("car of empty list")),
        },
        _ => Err(Error::type_error(format!(
            "car expects a list, got {}",
            a.type_name()
        ))),
    }
}

/// Everything after the first element; the cdr of an empty list is the
/// empty list, not an error.
fn builtin_cdr(a: &Value) -> Result<Value, Error> {
    match a {
        Value::List(list) => {
            let rest: Vec<Value> = list.iter().skip(1).cloned().collect();
            Ok(Value::List(rest))
        }
        _ => Err(Error::type_error(format!(
            "cdr expects a list, got {}",
            a.type_name()
        ))),
    }
}

/// Element count of a list, or character count of a string.
fn builtin_len(a: &Value) -> Result<Value, Error> {
    match a {
        Value::List(list) => Ok(Value::Integer(list.len() as i64)),
        Value::String(s) => Ok(Value::Integer(s.chars().count() as i64)),
        _ => Err(Error::type_error(format!(
            "len expects a list or string, got {}",
            a.type_name()
        ))),
    }
}

fn builtin_display(a: &Value) -> Result<Value, Error> {
    print!("{a}");
    Ok(Value::Unspecified)
}

fn builtin_displayln(a: &Value) -> Result<Value, Error> {
    println!("{a}");
    Ok(Value::Unspecified)
}

/// Global registry of all primitive operators.
///
/// One contiguous collection for ease of auditing; the root scope is
/// populated by iterating this table once. Initialized on first use via a
/// `LazyLock`.
static PRIMITIVES_TABLE: LazyLock<Vec<Primitive>> = LazyLock::new(|| {
    vec![
        // Arithmetic
        Primitive {
            name: "+",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_add),
        },
        Primitive {
            name: "-",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_sub),
        },
        Primitive {
            name: "*",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_mul),
        },
        Primitive {
            name: "/",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_div),
        },
        Primitive {
            name: "%",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_mod),
        },
        // Comparison
        Primitive {
            name: "<",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_lt),
        },
        Primitive {
            name: ">",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_gt),
        },
        Primitive {
            name: "<=",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_le),
        },
        Primitive {
            name: ">=",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_ge),
        },
        Primitive {
            name: "=",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_equal),
        },
        // Logical
        Primitive {
            name: "and",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_and),
        },
        Primitive {
            name: "or",
            arity: Arity::Exact(2),
            imp: PrimitiveImpl::Binary(builtin_or),
        },
        Primitive {
            name: "not",
            arity: Arity::Exact(1),
            imp: PrimitiveImpl::Unary(builtin_not),
        },
        // Lists and strings
        Primitive {
            name: "list",
            arity: Arity::Any,
            imp: PrimitiveImpl::Variadic(builtin_list),
        },
        Primitive {
            name: "car",
            arity: Arity::Exact(1),
            imp: PrimitiveImpl::Unary(builtin_car),
        },
        Primitive {
            name: "cdr",
            arity: Arity::Exact(1),
            imp: PrimitiveImpl::Unary(builtin_cdr),
        },
        Primitive {
            name: "len",
            arity: Arity::Exact(1),
            imp: PrimitiveImpl::Unary(builtin_len),
        },
        // IO
        Primitive {
            name: "display",
            arity: Arity::Exact(1),
            imp: PrimitiveImpl::Unary(builtin_display),
        },
        Primitive {
            name: "displayln",
            arity: Arity::Exact(1),
            imp: PrimitiveImpl::Unary(builtin_displayln),
        },
    ]
});

/// Lazy static map from name to Primitive (private - use find_primitive)
static PRIMITIVES_BY_NAME: LazyLock<HashMap<&'static str, &'static Primitive>> =
    LazyLock::new(|| {
        let table: &'static [Primitive] = PRIMITIVES_TABLE.as_slice();
        table.iter().map(|p| (p.name, p)).collect()
    });

/// All registered primitives, for populating the root scope
pub(crate) fn all_primitives() -> &'static [Primitive] {
    PRIMITIVES_TABLE.as_slice()
}

/// Find a primitive operator by its bound name
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn find_primitive(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES_BY_NAME.get(name).copied()
}
