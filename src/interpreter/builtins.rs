//! Built-in functions for the jaba interpreter.
//!
//! The registry is fixed at compile time. Every builtin checks its own
//! arity and argument types; `puts` is the only one that accepts any
//! number of arguments.

use super::error::RuntimeError;
use crate::value::{Builtin, Value};
use std::rc::Rc;

const BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: builtin_len },
    Builtin { name: "first", func: builtin_first },
    Builtin { name: "last", func: builtin_last },
    Builtin { name: "rest", func: builtin_rest },
    Builtin { name: "push", func: builtin_push },
    Builtin { name: "puts", func: builtin_puts },
];

/// Looks a builtin up by name; consulted after the environment chain.
pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.name == name)
        .copied()
        .map(Value::Builtin)
}

macro_rules! require_arity {
    ($args:expr, $want:expr) => {
        if $args.len() != $want {
            return Err(RuntimeError::wrong_argument_count($args.len(), $want));
        }
    };
}

fn builtin_len(args: &[Value]) -> Result<Value, RuntimeError> {
    require_arity!(args, 1);
    match &args[0] {
        Value::Str(value) => Ok(Value::Integer(value.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(RuntimeError::bad_argument(
            "len",
            "not supported",
            other.kind(),
        )),
    }
}

fn builtin_first(args: &[Value]) -> Result<Value, RuntimeError> {
    require_arity!(args, 1);
    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::bad_argument(
            "first",
            "must be an array",
            other.kind(),
        )),
    }
}

fn builtin_last(args: &[Value]) -> Result<Value, RuntimeError> {
    require_arity!(args, 1);
    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::bad_argument(
            "last",
            "must be an array",
            other.kind(),
        )),
    }
}

fn builtin_rest(args: &[Value]) -> Result<Value, RuntimeError> {
    require_arity!(args, 1);
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::Array(Rc::new(elements[1..].to_vec())))
            }
        }
        other => Err(RuntimeError::bad_argument(
            "rest",
            "must be an array",
            other.kind(),
        )),
    }
}

// push copies: the argument array is a value and stays untouched.
fn builtin_push(args: &[Value]) -> Result<Value, RuntimeError> {
    require_arity!(args, 2);
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend(elements.iter().cloned());
            extended.push(args[1].clone());
            Ok(Value::Array(Rc::new(extended)))
        }
        other => Err(RuntimeError::bad_argument(
            "push",
            "must be an array",
            other.kind(),
        )),
    }
}

fn builtin_puts(args: &[Value]) -> Result<Value, RuntimeError> {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Ok(Value::Null)
}
