//! Line-oriented read-eval-print loop.
//!
//! One environment persists across iterations; each line of input runs
//! through the full pipeline and the resulting value is printed in its
//! `inspect` form. Parser errors get the banner treatment and the loop
//! carries on with the next line.

use crate::config::AppConfig;
use crate::interpreter::{self, Environment, EvalError};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = ">>";

const BANNER: &str = r#"
____
/oo  \
|   __/
/    _ |
|     \ \
\___  \ \__
|     \___\
"#;

pub fn run(
    input: &mut impl BufRead,
    output: &mut impl Write,
    config: &AppConfig,
) -> io::Result<()> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        match interpreter::evaluate(&line, &env) {
            Ok(Some(value)) => writeln!(output, "{}", value.inspect())?,
            Ok(None) => {}
            Err(EvalError::Parse(errors)) => print_parser_errors(output, &errors)?,
            Err(EvalError::Runtime(error)) => {
                let message = format!("ERROR: {}", error);
                if config.color_enabled {
                    writeln!(output, "{}", message.red())?;
                } else {
                    writeln!(output, "{}", message)?;
                }
            }
        }
    }
}

fn print_parser_errors(output: &mut impl Write, errors: &[String]) -> io::Result<()> {
    write!(output, "{}", BANNER)?;
    writeln!(output, "Woops! We ran into some jaba stories here!")?;
    writeln!(output, "parser errors: ")?;
    for message in errors {
        writeln!(output, "\t{}", message)?;
    }
    Ok(())
}
