use clap::Parser;
use jaba::cli::{generate_completions, Args, Commands};
use jaba::config::AppConfig;
use jaba::repl;
use std::io;

fn main() {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = args.command {
        generate_completions(shell);
        return;
    }

    let config = AppConfig::from_args(&args);

    if !config.quiet {
        let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
        println!("Hi {}! Welcome to jaba programming language", user);
        println!("Enter the jaba program below:");
    }

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    if let Err(error) = repl::run(&mut input, &mut output, &config) {
        eprintln!("jaba: {}", error);
        std::process::exit(1);
    }
}
