//! The `lantern` interpreter CLI.
//!
//! This is the entry point for `lantern`. With no subcommand it starts the
//! REPL; `lantern run <file>` lexes, parses, and evaluates a source file
//! and prints the final value.
//!
//! # Usage
//!
//! ```text
//! lantern
//! lantern run hello.l
//! ```
//!
//! # Error Reporting
//!
//! Parse and runtime errors are reported with
//! [ariadne](https://docs.rs/ariadne) for source-anchored, colorful error
//! messages, via [`lantern::diagnostics`].

mod cli;
mod repl;

use clap::Parser as _;
use cli::{Cli, Commands};
use lantern::environment::Environment;
use lantern::object::Value;
use lantern::{diagnostics, evaluator, parser};
use log::info;

fn main() {
    let cli = Cli::init();

    simple_logger::init_with_level((&cli.verbosity).into()).unwrap();

    let use_color = !cli.no_color;

    match cli.command {
        Some(Commands::Run { file }) => {
            let path = file.display().to_string();
            if let Err(()) = run_file(&path, use_color) {
                std::process::exit(1);
            }
        }
        None => {
            info!("starting REPL");
            repl::run(use_color);
        }
    }
}

fn run_file(path: &str, use_color: bool) -> Result<(), ()> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read '{path}': {e}");
    })?;

    let mut p = parser::Parser::new(&source);
    let program = p.parse_program();

    if !p.errors.is_empty() {
        diagnostics::report_parse_errors(path, &source, &p.errors, use_color);
        return Err(());
    }

    let env = Environment::new();
    let result = evaluator::evaluate(&program, &env);

    match result {
        Value::Error { code, message } => {
            diagnostics::report_runtime_error(path, &source, code, &message, use_color);
            Err(())
        }
        other => {
            println!("{}", other.inspect());
            Ok(())
        }
    }
}
