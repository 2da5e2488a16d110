//! REPL contract tests driven through in-memory readers and writers

use jaba::config::AppConfig;
use jaba::repl;
use std::io::Cursor;

fn run_session(input: &str) -> String {
    let config = AppConfig {
        color_enabled: false,
        quiet: true,
    };
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    repl::run(&mut reader, &mut output, &config).expect("repl io failed");
    String::from_utf8(output).expect("repl wrote invalid utf-8")
}

#[test]
fn test_prompt_and_value_printing() {
    assert_eq!(run_session("5 + 5\n"), ">>10\n>>");
}

#[test]
fn test_terminates_on_end_of_input() {
    assert_eq!(run_session(""), ">>");
}

#[test]
fn test_let_prints_nothing() {
    assert_eq!(run_session("let a = 1;\n"), ">>>>");
}

#[test]
fn test_blank_line_prints_nothing() {
    assert_eq!(run_session("\n"), ">>>>");
}

#[test]
fn test_environment_persists_across_lines() {
    assert_eq!(run_session("let a = 2;\na + 3\n"), ">>>>5\n>>");
}

#[test]
fn test_closures_survive_across_lines() {
    let output = run_session("let newAdder = fn(x) { fn(y) { x + y } };\nlet addTwo = newAdder(2);\naddTwo(40)\n");
    assert!(output.ends_with("42\n>>"), "output: {:?}", output);
}

#[test]
fn test_values_print_in_inspect_form() {
    assert_eq!(run_session("[1, 2, 3]\n"), ">>[1, 2, 3]\n>>");
    assert_eq!(run_session(r#"{"a": 1}"#), ">>{a: 1}\n>>");
    assert_eq!(run_session(r#""raw text""#), ">>raw text\n>>");
}

#[test]
fn test_runtime_errors_are_prefixed() {
    assert_eq!(
        run_session("foobar\n"),
        ">>ERROR: identifier not found: foobar\n>>"
    );
}

#[test]
fn test_parser_errors_print_the_banner_and_continue() {
    let output = run_session("let x 5;\n1 + 1\n");
    assert!(
        output.contains("Woops! We ran into some jaba stories here!"),
        "output: {:?}",
        output
    );
    assert!(output.contains("parser errors: \n"), "output: {:?}", output);
    assert!(
        output.contains("\texpected next token to be =, got INTEGER\n"),
        "output: {:?}",
        output
    );
    // the loop keeps going after a bad line
    assert!(output.ends_with("2\n>>"), "output: {:?}", output);
}
