//! Conditional and early-return tests

use jaba::interpreter::{evaluate, Environment};
use jaba::Value;

fn run(source: &str) -> Value {
    let env = Environment::new();
    evaluate(source, &env)
        .expect("evaluation failed")
        .expect("program produced no value")
}

// =============================================================================
// IF EXPRESSIONS
// =============================================================================

#[test]
fn test_if_else_expressions() {
    let cases = [
        ("if (true) { 10 }", Value::Integer(10)),
        ("if (false) { 10 }", Value::Null),
        ("if (1) { 10 }", Value::Integer(10)),
        ("if (1 < 2) { 10 }", Value::Integer(10)),
        ("if (1 > 2) { 10 }", Value::Null),
        ("if (1 > 2) { 10 } else { 20 }", Value::Integer(20)),
        ("if (1 < 2) { 10 } else { 20 }", Value::Integer(10)),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), expected, "source: {:?}", source);
    }
}

#[test]
fn test_if_is_an_expression() {
    assert_eq!(
        run("let x = if (2 > 1) { 99 } else { 0 }; x;"),
        Value::Integer(99)
    );
    assert_eq!(
        run("if (1 < 2) { 1 } else { 2 } + 10"),
        Value::Integer(11)
    );
}

#[test]
fn test_nested_if() {
    assert_eq!(
        run("if (true) { if (false) { 1 } else { 2 } } else { 3 }"),
        Value::Integer(2)
    );
}

#[test]
fn test_if_condition_with_null() {
    assert_eq!(
        run("if (if (false) { 1 }) { 10 } else { 20 }"),
        Value::Integer(20)
    );
}

// =============================================================================
// RETURN STATEMENTS
// =============================================================================

#[test]
fn test_return_statements() {
    let cases = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
    ];
    for (source, expected) in cases {
        assert_eq!(run(source), Value::Integer(expected), "source: {:?}", source);
    }
}

#[test]
fn test_return_unwinds_nested_blocks() {
    let source = "
if (10 > 1) {
    if (10 > 1) {
        return 10;
    }
    return 1;
}";
    assert_eq!(run(source), Value::Integer(10));
}

#[test]
fn test_return_stops_at_the_enclosing_function() {
    let source = "
let f = fn() {
    if (true) {
        return 1;
    }
    return 2;
};
f() + 10";
    assert_eq!(run(source), Value::Integer(11));
}
