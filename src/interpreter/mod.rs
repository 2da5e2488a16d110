pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;

pub use environment::Environment;
pub use error::{EvalError, RuntimeError};
pub use evaluator::eval_program;
pub use parser::Parser;

use crate::ast::Program;
use crate::lexer::Lexer;
use crate::value::Value;

/// Parses `source`, surfacing the accumulated parser error messages when
/// there are any.
pub fn parse(source: &str) -> Result<Program, Vec<String>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if parser.errors().is_empty() {
        Ok(program)
    } else {
        Err(parser.errors().to_vec())
    }
}

/// Parses and evaluates `source` against a persistent environment. This
/// is the entry point the REPL drives once per input line.
pub fn evaluate(source: &str, env: &Environment) -> Result<Option<Value>, EvalError> {
    let program = parse(source).map_err(EvalError::Parse)?;
    eval_program(&program, env).map_err(EvalError::Runtime)
}
