//! Chained mutable scopes. An [`Environment`] maps symbol names to values
//! and optionally points at a parent scope; lookup walks the chain outward,
//! and assignment mutates the nearest scope that already binds the name,
//! defining in the current scope only when no enclosing scope does. Scopes
//! are shared (`Rc`) because a closure's captured defining scope must stay
//! alive after the call that created it returns, and because `set!` effects
//! must be visible through every alias of a scope.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Error;
use crate::ast::Value;
use crate::builtinops::all_primitives;

/// One scope in the chain: local bindings plus an optional parent.
///
/// All mutation goes through interior mutability so that scopes can be
/// aliased by closures while still being updated in place.
pub struct Environment {
    parent: Option<Rc<Environment>>,
    bindings: RefCell<HashMap<String, Value>>,
}

impl Environment {
    /// Create an empty scope with no parent.
    pub fn root() -> Rc<Environment> {
        Rc::new(Environment {
            parent: None,
            bindings: RefCell::new(HashMap::new()),
        })
    }

    /// Create a new scope extending `self`.
    pub fn child(self: &Rc<Self>) -> Rc<Environment> {
        Rc::new(Environment {
            parent: Some(Rc::clone(self)),
            bindings: RefCell::new(HashMap::new()),
        })
    }

    /// Insert directly into this scope, without consulting the chain.
    /// This is how call scopes bind parameters and how the root scope is
    /// populated; `set` is the chained variant.
    pub(crate) fn bind(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Look a name up through the scope chain.
    pub fn get(&self, name: &str) -> Result<Value, Error> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => Err(Error::UnknownIdentifier(name.to_owned())),
        }
    }

    /// Return the nearest scope (starting from `self`) that binds `name`.
    pub fn find(self: &Rc<Self>, name: &str) -> Option<Rc<Environment>> {
        if self.bindings.borrow().contains_key(name) {
            Some(Rc::clone(self))
        } else {
            self.parent.as_ref().and_then(|parent| parent.find(name))
        }
    }

    /// Assign-or-define: mutate the nearest scope already binding `name`,
    /// or define `name` here if no scope in the chain has it. Never fails.
    pub fn set(self: &Rc<Self>, name: &str, value: Value) {
        match self.find(name) {
            Some(owner) => owner.bind(name, value),
            None => self.bind(name, value),
        }
    }
}

/// Build the outermost scope: every registered primitive under its name,
/// plus the boolean constants. `#t` and `#f` are ordinary bindings, which
/// is why they resolve through symbol lookup like anything else.
pub fn create_root_env() -> Rc<Environment> {
    let env = Environment::root();
    for primitive in all_primitives() {
        env.bind(primitive.name, Value::Builtin(primitive));
    }
    env.bind("#t", Value::Bool(true));
    env.bind("#f", Value::Bool(false));
    env
}
