use std::fmt;

use crate::ast::{InfixOp, PrefixOp};
use crate::value::ValueKind;

/// Runtime failure raised during evaluation. The `Display` form is the
/// user-visible message; the REPL prefixes it with `ERROR: `.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    IdentifierNotFound { name: String },
    NotAFunction { kind: ValueKind },
    TypeMismatch { left: ValueKind, op: InfixOp, right: ValueKind },
    UnknownPrefixOperation { op: PrefixOp, right: ValueKind },
    UnknownInfixOperation { left: ValueKind, op: InfixOp, right: ValueKind },
    DivideByZero,
    IndexNotSupported { kind: ValueKind },
    UnusableHashKey { kind: ValueKind },
    WrongArgumentCount { got: usize, want: usize },
    BadArgument { name: &'static str, constraint: &'static str, got: ValueKind },
}

impl RuntimeError {
    pub fn identifier_not_found(name: impl Into<String>) -> Self {
        Self::IdentifierNotFound { name: name.into() }
    }

    pub fn not_a_function(kind: ValueKind) -> Self {
        Self::NotAFunction { kind }
    }

    pub fn type_mismatch(left: ValueKind, op: InfixOp, right: ValueKind) -> Self {
        Self::TypeMismatch { left, op, right }
    }

    pub fn unknown_prefix_operation(op: PrefixOp, right: ValueKind) -> Self {
        Self::UnknownPrefixOperation { op, right }
    }

    pub fn unknown_infix_operation(left: ValueKind, op: InfixOp, right: ValueKind) -> Self {
        Self::UnknownInfixOperation { left, op, right }
    }

    pub fn index_not_supported(kind: ValueKind) -> Self {
        Self::IndexNotSupported { kind }
    }

    pub fn unusable_hash_key(kind: ValueKind) -> Self {
        Self::UnusableHashKey { kind }
    }

    pub fn wrong_argument_count(got: usize, want: usize) -> Self {
        Self::WrongArgumentCount { got, want }
    }

    pub fn bad_argument(name: &'static str, constraint: &'static str, got: ValueKind) -> Self {
        Self::BadArgument { name, constraint, got }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::IdentifierNotFound { name } => {
                write!(f, "identifier not found: {}", name)
            }
            RuntimeError::NotAFunction { kind } => write!(f, "not a function: {}", kind),
            RuntimeError::TypeMismatch { left, op, right } => {
                write!(f, "type mismatch: {} {} {}", left, op, right)
            }
            RuntimeError::UnknownPrefixOperation { op, right } => {
                write!(f, "unknown operation: {}{}", op, right)
            }
            RuntimeError::UnknownInfixOperation { left, op, right } => {
                write!(f, "unknown operation: {} {} {}", left, op, right)
            }
            RuntimeError::DivideByZero => f.write_str("divide by zero"),
            RuntimeError::IndexNotSupported { kind } => {
                write!(f, "index operator not supported: {}", kind)
            }
            RuntimeError::UnusableHashKey { kind } => {
                write!(f, "unusable as hash key: {}", kind)
            }
            RuntimeError::WrongArgumentCount { got, want } => {
                write!(f, "wrong number of arguments. got: {} want: {}", got, want)
            }
            RuntimeError::BadArgument { name, constraint, got } => {
                write!(f, "argument to {} {}, got: {}", name, constraint, got)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Failure of the combined parse-then-evaluate entry point. Parser errors
/// keep their own channel (a list of accumulated messages) as the parser
/// does not abort on the first problem.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    Parse(Vec<String>),
    Runtime(RuntimeError),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Parse(errors) => {
                write!(f, "parser errors: {}", errors.join("; "))
            }
            EvalError::Runtime(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<RuntimeError> for EvalError {
    fn from(error: RuntimeError) -> Self {
        EvalError::Runtime(error)
    }
}
