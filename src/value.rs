use std::fmt;
use std::hash::Hasher;
use std::rc::Rc;

use fnv::FnvHasher;
use indexmap::IndexMap;

use crate::ast::Block;
use crate::interpreter::environment::Environment;
use crate::interpreter::error::RuntimeError;

pub type BuiltinFn = fn(&[Value]) -> Result<Value, RuntimeError>;

/// Runtime value produced by evaluation.
///
/// Compound values hang off `Rc` handles: cloning a value is cheap, and
/// `==` on arrays, hashes and functions compares identity rather than
/// structure.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    Null,
    Array(Rc<Vec<Value>>),
    Hash(Rc<IndexMap<HashKey, HashPair>>),
    Function(Rc<Function>),
    Builtin(Builtin),
}

/// Tag used in error messages and hash keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Boolean,
    Str,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::Boolean => "BOOLEAN",
            ValueKind::Str => "STRING",
            ValueKind::Null => "NULL",
            ValueKind::Array => "ARRAY",
            ValueKind::Hash => "HASH",
            ValueKind::Function => "FUNCTION",
            ValueKind::Builtin => "BUILTIN",
        };
        f.write_str(name)
    }
}

/// Key identity for hash values: the value kind plus a 64-bit digest.
/// The kind tag keeps equal digests from different domains apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: ValueKind,
    pub digest: u64,
}

/// Stored entry of a hash: the original key value is retained so the pair
/// can be rendered back to the user.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Value,
    pub value: Value,
}

/// A user-defined function together with the environment in force at its
/// definition site.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Rc<str>>,
    pub body: Block,
    pub env: Environment,
}

// The captured environment may transitively contain this function again,
// so the derived Debug would recurse; render the signature instead.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function(fn({}))", self.parameters.join(", "))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Str(_) => ValueKind::Str,
            Value::Null => ValueKind::Null,
            Value::Array(_) => ValueKind::Array,
            Value::Hash(_) => ValueKind::Hash,
            Value::Function(_) => ValueKind::Function,
            Value::Builtin(_) => ValueKind::Builtin,
        }
    }

    /// Only `false` and `null` are falsey; `0`, `""` and `[]` are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(value) => *value,
            Value::Null => false,
            _ => true,
        }
    }

    /// Key identity for hashable values; `None` for everything else.
    /// Integers map to their own bits, booleans to 1/0, strings to an
    /// FNV-1a digest of their bytes.
    pub fn hash_key(&self) -> Option<HashKey> {
        let digest = match self {
            Value::Integer(value) => *value as u64,
            Value::Boolean(value) => *value as u64,
            Value::Str(value) => {
                let mut hasher = FnvHasher::default();
                hasher.write(value.as_bytes());
                hasher.finish()
            }
            _ => return None,
        };
        Some(HashKey {
            kind: self.kind(),
            digest,
        })
    }

    /// The user-facing rendering used by the REPL and by `puts`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(left), Value::Integer(right)) => left == right,
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::Str(left), Value::Str(right)) => left == right,
            (Value::Null, Value::Null) => true,
            (Value::Array(left), Value::Array(right)) => Rc::ptr_eq(left, right),
            (Value::Hash(left), Value::Hash(right)) => Rc::ptr_eq(left, right),
            (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
            (Value::Builtin(left), Value::Builtin(right)) => left.name == right.name,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Str(value) => f.write_str(value),
            Value::Null => f.write_str("null"),
            Value::Array(elements) => {
                let rendered: Vec<String> = elements.iter().map(Value::inspect).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Hash(pairs) => {
                let rendered: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key.inspect(), pair.value.inspect()))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Value::Function(function) => {
                write!(
                    f,
                    "fn({}) {{\n{}\n}}",
                    function.parameters.join(", "),
                    function.body
                )
            }
            Value::Builtin(_) => f.write_str("builtin function"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, InfixOp, Stmt};

    #[test]
    fn test_string_hash_keys_are_content_based() {
        let hello1 = Value::Str(Rc::from("Hello World"));
        let hello2 = Value::Str(Rc::from("Hello World"));
        let diff = Value::Str(Rc::from("My name is johnny"));

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_ne!(hello1.hash_key(), diff.hash_key());
    }

    #[test]
    fn test_hash_keys_are_kind_tagged() {
        let one = Value::Integer(1);
        let truthy = Value::Boolean(true);
        assert_eq!(one.hash_key().unwrap().digest, 1);
        assert_eq!(truthy.hash_key().unwrap().digest, 1);
        assert_ne!(one.hash_key(), truthy.hash_key());
    }

    #[test]
    fn test_unhashable_values() {
        assert!(Value::Null.hash_key().is_none());
        assert!(Value::Array(Rc::new(Vec::new())).hash_key().is_none());
    }

    #[test]
    fn test_scalar_inspect() {
        assert_eq!(Value::Integer(-7).inspect(), "-7");
        assert_eq!(Value::Boolean(true).inspect(), "true");
        assert_eq!(Value::Null.inspect(), "null");
        assert_eq!(Value::Str(Rc::from("hello")).inspect(), "hello");
    }

    #[test]
    fn test_array_inspect() {
        let array = Value::Array(Rc::new(vec![
            Value::Integer(1),
            Value::Str(Rc::from("two")),
            Value::Boolean(false),
        ]));
        assert_eq!(array.inspect(), "[1, two, false]");
    }

    #[test]
    fn test_hash_inspect_preserves_insertion_order() {
        let mut pairs = IndexMap::new();
        for (key, value) in [("b", 2), ("a", 1)] {
            let key = Value::Str(Rc::from(key));
            pairs.insert(
                key.hash_key().unwrap(),
                HashPair {
                    key,
                    value: Value::Integer(value),
                },
            );
        }
        assert_eq!(Value::Hash(Rc::new(pairs)).inspect(), "{b: 2, a: 1}");
    }

    #[test]
    fn test_function_inspect() {
        let function = Function {
            parameters: vec![Rc::from("x")],
            body: crate::ast::Block {
                statements: vec![Stmt::Expr(Expr::Infix {
                    op: InfixOp::Add,
                    left: Box::new(Expr::Identifier(Rc::from("x"))),
                    right: Box::new(Expr::IntegerLiteral(2)),
                })],
            },
            env: Environment::new(),
        };
        assert_eq!(
            Value::Function(Rc::new(function)).inspect(),
            "fn(x) {\n(x + 2);\n}"
        );
    }

    #[test]
    fn test_truthiness_quirk() {
        assert!(Value::Integer(0).is_truthy());
        assert!(Value::Str(Rc::from("")).is_truthy());
        assert!(Value::Array(Rc::new(Vec::new())).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn test_compound_equality_is_identity() {
        let array = Rc::new(vec![Value::Integer(1)]);
        let same = Value::Array(array.clone());
        let other = Value::Array(Rc::new(vec![Value::Integer(1)]));
        assert_eq!(Value::Array(array), same);
        assert_ne!(same, other);
    }
}
