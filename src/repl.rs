//! The interactive read-eval-print loop.
//!
//! The REPL is deliberately simple: it never holds parser or evaluator
//! state of its own beyond a single accumulating source buffer and one
//! persistent [`Environment`]. Every line appends to the buffer and the
//! *whole* buffer is re-lexed and re-parsed, so a definition spanning
//! several lines (an open `{` at end of input, say) keeps working without
//! the REPL needing to track bracket depth itself.

use colored::Colorize;
use lantern::environment::Environment;
use lantern::evaluator::evaluate;
use lantern::object::Value;
use lantern::parser::Parser;
use log::debug;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

const PROMPT: &str = ">> ";

/// Runs the REPL against stdin/stdout until `exit()` or EOF.
pub fn run(use_color: bool) {
    let env = Environment::new();
    let mut buffer = String::new();
    let stdin = io::stdin();

    print_banner(use_color);

    loop {
        print_prompt(use_color);

        let mut line = String::new();
        let bytes_read = stdin.lock().read_line(&mut line).unwrap_or(0);
        if bytes_read == 0 {
            println!();
            break;
        }

        let trimmed = line.trim();
        match trimmed {
            "exit()" => break,
            "clear()" => {
                clear_screen();
                buffer.clear();
                continue;
            }
            _ => {}
        }

        buffer.push_str(&line);
        run_buffer(&buffer, &env, use_color);
    }
}

fn run_buffer(buffer: &str, env: &Rc<RefCell<Environment>>, use_color: bool) {
    let mut parser = Parser::new(buffer);
    let program = parser.parse_program();

    if !parser.errors.is_empty() {
        debug!("{} parse error(s) on current buffer", parser.errors.len());
        for error in &parser.errors {
            print_line(error, use_color, true);
        }
        return;
    }

    let result = evaluate(&program, env);
    match &result {
        Value::Error { .. } => print_line(&result.inspect(), use_color, true),
        _ => print_line(&result.inspect(), use_color, false),
    }
}

fn print_banner(use_color: bool) {
    let banner = "L interpreter - type exit() to quit, clear() to reset the screen.";
    if use_color {
        println!("{}", banner.cyan());
    } else {
        println!("{banner}");
    }
}

fn print_prompt(use_color: bool) {
    if use_color {
        print!("{}", PROMPT.green());
    } else {
        print!("{PROMPT}");
    }
    let _ = io::stdout().flush();
}

fn print_line(text: &str, use_color: bool, is_error: bool) {
    if use_color && is_error {
        println!("{}", text.red());
    } else {
        println!("{text}");
    }
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_buffer_evaluates_and_does_not_panic() {
        let env = Environment::new();
        run_buffer("5 + 5;", &env, false);
    }

    #[test]
    fn test_run_buffer_reports_parse_errors_without_panicking() {
        let env = Environment::new();
        run_buffer("var = 5;", &env, false);
    }

    #[test]
    fn test_run_buffer_preserves_environment_across_calls() {
        let env = Environment::new();
        run_buffer("var x = 5;", &env, false);
        assert!(env.borrow().get("x").is_some());
    }
}
