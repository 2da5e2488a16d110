//! Tree-walking evaluation of parsed programs.
//!
//! Early `return`s and runtime failures travel the same out-of-band
//! channel (`Interrupt`), which keeps every expression signature a plain
//! `Result<Value, Interrupt>`: `?` propagates both, function calls unwrap
//! one layer of `Return`, and `eval_program` converts whatever is left
//! into the public result. Neither interrupt kind can escape it.

use std::rc::Rc;

use indexmap::IndexMap;

use super::builtins;
use super::environment::Environment;
use super::error::RuntimeError;
use crate::ast::{Block, Expr, InfixOp, PrefixOp, Program, Stmt};
use crate::value::{Function, HashPair, Value};

#[derive(Debug)]
pub enum Interrupt {
    Return(Value),
    Failure(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Interrupt::Failure(error)
    }
}

/// Evaluates a program against `env`. `Ok(None)` means the final
/// statement produced nothing user-visible (a `let`, or an empty
/// program).
pub fn eval_program(program: &Program, env: &Environment) -> Result<Option<Value>, RuntimeError> {
    let mut result = None;
    for statement in &program.statements {
        match eval_statement(statement, env) {
            Ok(value) => result = value,
            Err(Interrupt::Return(value)) => return Ok(Some(value)),
            Err(Interrupt::Failure(error)) => return Err(error),
        }
    }
    Ok(result)
}

fn eval_statement(statement: &Stmt, env: &Environment) -> Result<Option<Value>, Interrupt> {
    match statement {
        Stmt::Let { name, value } => {
            let value = eval_expression(value, env)?;
            env.set(name.clone(), value);
            Ok(None)
        }
        Stmt::Return(expression) => {
            let value = eval_expression(expression, env)?;
            Err(Interrupt::Return(value))
        }
        Stmt::Expr(expression) => Ok(Some(eval_expression(expression, env)?)),
    }
}

// Unlike eval_program this leaves a Return interrupt wrapped, so it
// unwinds through nested blocks until a function call catches it.
fn eval_block(block: &Block, env: &Environment) -> Result<Value, Interrupt> {
    let mut result = None;
    for statement in &block.statements {
        result = eval_statement(statement, env)?;
    }
    Ok(result.unwrap_or(Value::Null))
}

fn eval_expression(expression: &Expr, env: &Environment) -> Result<Value, Interrupt> {
    match expression {
        Expr::IntegerLiteral(value) => Ok(Value::Integer(*value)),
        Expr::BooleanLiteral(value) => Ok(Value::Boolean(*value)),
        Expr::StringLiteral(value) => Ok(Value::Str(value.clone())),
        Expr::Identifier(name) => eval_identifier(name, env),
        Expr::Prefix { op, right } => {
            let right = eval_expression(right, env)?;
            eval_prefix(*op, right)
        }
        Expr::Infix { op, left, right } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            eval_infix(*op, left, right)
        }
        Expr::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env)?;
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(Value::Null)
            }
        }
        Expr::FunctionLiteral { parameters, body } => Ok(Value::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        }))),
        Expr::Call {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, env)?;
            let arguments = eval_expressions(arguments, env)?;
            apply_function(callee, &arguments)
        }
        Expr::ArrayLiteral(elements) => {
            Ok(Value::Array(Rc::new(eval_expressions(elements, env)?)))
        }
        Expr::HashLiteral(entries) => eval_hash_literal(entries, env),
        Expr::Index { left, index } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            eval_index(left, index)
        }
    }
}

fn eval_identifier(name: &str, env: &Environment) -> Result<Value, Interrupt> {
    if let Some(value) = env.get(name) {
        return Ok(value);
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Ok(builtin);
    }
    Err(RuntimeError::identifier_not_found(name).into())
}

// Arguments evaluate left to right; the first failure stops evaluation of
// the rest.
fn eval_expressions(expressions: &[Expr], env: &Environment) -> Result<Vec<Value>, Interrupt> {
    let mut values = Vec::with_capacity(expressions.len());
    for expression in expressions {
        values.push(eval_expression(expression, env)?);
    }
    Ok(values)
}

fn eval_prefix(op: PrefixOp, right: Value) -> Result<Value, Interrupt> {
    match op {
        PrefixOp::Not => Ok(Value::Boolean(!right.is_truthy())),
        PrefixOp::Neg => match right {
            Value::Integer(value) => Ok(Value::Integer(-value)),
            other => Err(RuntimeError::unknown_prefix_operation(op, other.kind()).into()),
        },
    }
}

// Branch order matters: the integer and string tables win over generic
// equality, so `1 == 2` compares values while `[] == []` compares
// identity.
fn eval_infix(op: InfixOp, left: Value, right: Value) -> Result<Value, Interrupt> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(op, l, r),
        _ => match op {
            InfixOp::Eq => Ok(Value::Boolean(left == right)),
            InfixOp::NotEq => Ok(Value::Boolean(left != right)),
            _ if left.kind() != right.kind() => {
                Err(RuntimeError::type_mismatch(left.kind(), op, right.kind()).into())
            }
            _ => Err(RuntimeError::unknown_infix_operation(left.kind(), op, right.kind()).into()),
        },
    }
}

fn eval_integer_infix(op: InfixOp, left: i64, right: i64) -> Result<Value, Interrupt> {
    let value = match op {
        InfixOp::Add => Value::Integer(left + right),
        InfixOp::Sub => Value::Integer(left - right),
        InfixOp::Mul => Value::Integer(left * right),
        InfixOp::Div => {
            if right == 0 {
                return Err(RuntimeError::DivideByZero.into());
            }
            Value::Integer(left / right)
        }
        InfixOp::Lt => Value::Boolean(left < right),
        InfixOp::Gt => Value::Boolean(left > right),
        InfixOp::Eq => Value::Boolean(left == right),
        InfixOp::NotEq => Value::Boolean(left != right),
    };
    Ok(value)
}

fn eval_string_infix(op: InfixOp, left: &Rc<str>, right: &Rc<str>) -> Result<Value, Interrupt> {
    match op {
        InfixOp::Add => Ok(Value::Str(Rc::from(format!("{}{}", left, right)))),
        _ => Err(RuntimeError::unknown_infix_operation(
            crate::value::ValueKind::Str,
            op,
            crate::value::ValueKind::Str,
        )
        .into()),
    }
}

fn apply_function(callee: Value, arguments: &[Value]) -> Result<Value, Interrupt> {
    match callee {
        Value::Function(function) => {
            if arguments.len() != function.parameters.len() {
                return Err(RuntimeError::wrong_argument_count(
                    arguments.len(),
                    function.parameters.len(),
                )
                .into());
            }

            // The call frame extends the closure's captured environment,
            // not the caller's.
            let env = Environment::enclosing(&function.env);
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                env.set(parameter.clone(), argument.clone());
            }

            match eval_block(&function.body, &env) {
                Err(Interrupt::Return(value)) => Ok(value),
                other => other,
            }
        }
        Value::Builtin(builtin) => (builtin.func)(arguments).map_err(Interrupt::Failure),
        other => Err(RuntimeError::not_a_function(other.kind()).into()),
    }
}

fn eval_hash_literal(
    entries: &[(Expr, Expr)],
    env: &Environment,
) -> Result<Value, Interrupt> {
    let mut pairs = IndexMap::new();
    for (key_expression, value_expression) in entries {
        let key = eval_expression(key_expression, env)?;
        let hash_key = key
            .hash_key()
            .ok_or_else(|| RuntimeError::unusable_hash_key(key.kind()))?;
        let value = eval_expression(value_expression, env)?;
        pairs.insert(hash_key, HashPair { key, value });
    }
    Ok(Value::Hash(Rc::new(pairs)))
}

fn eval_index(left: Value, index: Value) -> Result<Value, Interrupt> {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            // Out-of-range reads (including negative) are null, not errors.
            let value = usize::try_from(*i)
                .ok()
                .and_then(|i| elements.get(i).cloned())
                .unwrap_or(Value::Null);
            Ok(value)
        }
        (Value::Hash(pairs), _) => match index.hash_key() {
            Some(key) => Ok(pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Value::Null)),
            None => Err(RuntimeError::unusable_hash_key(index.kind()).into()),
        },
        _ => Err(RuntimeError::index_not_supported(left.kind()).into()),
    }
}
