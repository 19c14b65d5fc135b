use crate::Error;
use crate::ast::Value;
use crate::env::Environment;
use std::rc::Rc;

/// Evaluate a single form against a scope chain (public API)
///
/// Atoms other than symbols evaluate to themselves. Symbols are resolved
/// through the scope chain. Lists are special forms or applications; see
/// [`evaluate_list`] for the dispatch order.
pub fn evaluate(expr: &Value, env: &Rc<Environment>) -> Result<Value, Error> {
    match expr {
        // Self-evaluating forms (empty lists are NOT self-evaluating)
        Value::Integer(_)
        | Value::Float(_)
        | Value::String(_)
        | Value::Bool(_)
        | Value::Builtin(_)
        | Value::Closure { .. }
        | Value::Unspecified => Ok(expr.clone()),

        // Identifier lookup walks the scope chain outward
        Value::Symbol(name) => env.get(name),

        // Special forms and applications
        Value::List(forms) => evaluate_list(forms, env),
    }
}

/// Evaluate a complete program form, separating "no value" from a value
///
/// The reader wraps source text in a single `(begin ...)`, so the result is
/// the value of the last form. Programs whose last form produces no value
/// (a trailing `set!`, an empty or comment-only source) yield `None`.
pub fn run(program: &Value, env: &Rc<Environment>) -> Result<Option<Value>, Error> {
    match evaluate(program, env)? {
        Value::Unspecified => Ok(None),
        value => Ok(Some(value)),
    }
}

/// Evaluate argument forms left to right
fn evaluate_arguments(forms: &[Value], env: &Rc<Environment>) -> Result<Vec<Value>, Error> {
    forms.iter().map(|form| evaluate(form, env)).collect()
}

/// Evaluate a compound form: special forms first, then application
///
/// Special forms dispatch on the head symbol before anything is evaluated,
/// so `if` can skip a branch and `quote` can suppress evaluation entirely.
/// The head position is matched textually; rebinding a name like `begin`
/// does not disable the form. Each form reads its leading positions and
/// ignores trailing forms beyond them; missing positions are a Syntax
/// error. Every other list is an application: the head is evaluated, then
/// the arguments left to right, and the resulting value is applied.
fn evaluate_list(forms: &[Value], env: &Rc<Environment>) -> Result<Value, Error> {
    if let Some(Value::Symbol(head)) = forms.first() {
        let rest = &forms[1..];
        match head.as_str() {
            "set!" => return eval_set(rest, env),
            "lambda" => return eval_lambda(rest, env),
            "quote" => return eval_quote(rest),
            "begin" => return eval_begin(rest, env),
            "if" => return eval_if(rest, env),
            _ => {}
        }
    }

    match forms {
        [] => Err(Error::syntax("cannot evaluate an empty list")),

        [head, arg_forms @ ..] => {
            let target = evaluate(head, env)?;
            let args = evaluate_arguments(arg_forms, env)?;

            match target {
                Value::Builtin(primitive) => primitive.invoke(&args),

                Value::Closure {
                    params,
                    body,
                    env: defining_env,
                } => {
                    // The shortfall check comes before any binding or body
                    // evaluation; surplus arguments are dropped.
                    if args.len() < params.len() {
                        return Err(Error::MissingParameter {
                            expected: params.len(),
                            got: args.len(),
                        });
                    }

                    // The call scope extends the scope the closure was
                    // created in, not the scope of the call site.
                    let call_env = defining_env.child();
                    for (param, arg) in params.iter().zip(args) {
                        call_env.bind(param.as_str(), arg);
                    }

                    evaluate(&body, &call_env)
                }

                other => Err(Error::NotInvocable(other.to_string())),
            }
        }
    }
}

/// `(set! name expr)`: evaluate the expression, then assign through the
/// scope chain (nearest owning scope, else define here). Produces no value.
fn eval_set(args: &[Value], env: &Rc<Environment>) -> Result<Value, Error> {
    match args {
        [Value::Symbol(name), expr, ..] => {
            let value = evaluate(expr, env)?;
            env.set(name, value);
            Ok(Value::Unspecified)
        }
        [other, _, ..] => Err(Error::syntax(format!(
            "set! requires a symbol to assign, got {other}"
        ))),
        _ => Err(Error::syntax(format!(
            "set! takes a name and one expression, got {} forms",
            args.len()
        ))),
    }
}

/// `(lambda (params...) body)`: build a closure over the defining scope
fn eval_lambda(args: &[Value], env: &Rc<Environment>) -> Result<Value, Error> {
    match args {
        [Value::List(param_forms), body, ..] => {
            let mut params = Vec::with_capacity(param_forms.len());
            for form in param_forms {
                match form {
                    // Duplicate names are allowed; binding order at the call
                    // makes the rightmost one win.
                    Value::Symbol(name) => params.push(name.clone()),
                    other => {
                        return Err(Error::syntax(format!(
                            "lambda parameter names must be symbols, got {other}"
                        )));
                    }
                }
            }
            Ok(Value::Closure {
                params,
                body: Box::new(body.clone()),
                env: Rc::clone(env),
            })
        }
        [other, _, ..] => Err(Error::syntax(format!(
            "lambda parameters must be a list, got {other}"
        ))),
        _ => Err(Error::syntax(format!(
            "lambda takes a parameter list and one body form, got {} forms",
            args.len()
        ))),
    }
}

/// `(quote form)`: hand the form back unevaluated
fn eval_quote(args: &[Value]) -> Result<Value, Error> {
    match args {
        [form, ..] => Ok(form.clone()),
        [] => Err(Error::syntax("quote takes one form, got none")),
    }
}

/// `(begin forms...)`: evaluate in order, producing the last value
fn eval_begin(args: &[Value], env: &Rc<Environment>) -> Result<Value, Error> {
    let mut result = Value::Unspecified;
    for form in args {
        result = evaluate(form, env)?;
    }
    Ok(result)
}

/// `(if condition then else)`: evaluate the condition, then exactly one branch
fn eval_if(args: &[Value], env: &Rc<Environment>) -> Result<Value, Error> {
    match args {
        [condition, when_true, when_false, ..] => {
            if evaluate(condition, env)?.is_truthy() {
                evaluate(when_true, env)
            } else {
                evaluate(when_false, env)
            }
        }
        _ => Err(Error::syntax(format!(
            "if takes a condition and two branches, got {} forms",
            args.len()
        ))),
    }
}
