//! Odd corners that the straightforward suites do not reach

use jaba::interpreter::{evaluate, Environment};
use jaba::Value;

fn run(source: &str) -> Value {
    let env = Environment::new();
    evaluate(source, &env)
        .expect("evaluation failed")
        .expect("program produced no value")
}

#[test]
fn test_let_can_shadow_a_builtin() {
    assert_eq!(run("let len = 5; len"), Value::Integer(5));
}

#[test]
fn test_shadowed_builtin_is_no_longer_callable() {
    let env = Environment::new();
    let result = evaluate(r#"let len = 5; len("abc")"#, &env);
    assert_eq!(
        result.unwrap_err().to_string(),
        "not a function: INTEGER"
    );
}

#[test]
fn test_builtin_shadowing_is_per_environment() {
    let env = Environment::new();
    assert_eq!(evaluate("let first = 1;", &env), Ok(None));
    assert_eq!(evaluate("first", &env), Ok(Some(Value::Integer(1))));
    let fresh = Environment::new();
    assert_eq!(
        evaluate("first([9, 8])", &fresh),
        Ok(Some(Value::Integer(9)))
    );
}

#[test]
fn test_len_counts_bytes_not_characters() {
    // "é" is two bytes in UTF-8
    assert_eq!(run(r#"len("héllo")"#), Value::Integer(6));
}

#[test]
fn test_string_literals_keep_arbitrary_interior_bytes() {
    assert_eq!(run(r#""tabs	and spaces""#).inspect(), "tabs\tand spaces");
}

#[test]
fn test_deeply_nested_grouping() {
    assert_eq!(run("((((((1 + 2))))))"), Value::Integer(3));
}

#[test]
fn test_long_left_associative_chain() {
    let source = (0..200).map(|_| "1").collect::<Vec<_>>().join(" + ");
    assert_eq!(run(&source), Value::Integer(200));
}

#[test]
fn test_recursion_depth_of_one_hundred() {
    assert_eq!(
        run("let down = fn(n) { if (n == 0) { 0 } else { down(n - 1) } }; down(100);"),
        Value::Integer(0)
    );
}

#[test]
fn test_array_of_functions() {
    assert_eq!(
        run("let fns = [fn(x) { x + 1 }, fn(x) { x * 2 }]; fns[0](10) + fns[1](10)"),
        Value::Integer(31)
    );
}

#[test]
fn test_hash_of_hashes() {
    assert_eq!(
        run(r#"let h = {"inner": {"k": 7}}; h["inner"]["k"]"#),
        Value::Integer(7)
    );
}

#[test]
fn test_function_returning_hash() {
    assert_eq!(
        run(r#"let make = fn(v) { {"v": v} }; make(3)["v"]"#),
        Value::Integer(3)
    );
}

#[test]
fn test_call_on_grouped_function_literal() {
    assert_eq!(run("(fn(x) { x })(5)"), Value::Integer(5));
}

#[test]
fn test_semicolons_are_optional_between_lines() {
    assert_eq!(run("let a = 1\nlet b = 2\na + b"), Value::Integer(3));
}

#[test]
fn test_index_result_is_callable() {
    assert_eq!(
        run("let pick = [fn() { 42 }]; pick[0]()"),
        Value::Integer(42)
    );
}

#[test]
fn test_if_blocks_share_the_enclosing_scope() {
    // Blocks are not call frames; a let inside an if is visible after it.
    assert_eq!(
        run("if (true) { let leaked = 9; }; leaked"),
        Value::Integer(9)
    );
}
