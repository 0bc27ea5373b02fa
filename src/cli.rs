//! Command-line argument parsing for the `lantern` binary.
//!
//! The shape of this module - a top-level [`Cli`] carrying a `--verbosity`
//! flag alongside a [`Commands`] subcommand - mirrors Why's own
//! `why::cli` module, including the `LogLevel` enum used to initialize
//! [`simple_logger`].

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line configuration for `lantern`.
#[derive(Parser, Debug)]
#[command(name = "lantern")]
#[command(author, version, about = "An interpreter for the L expression language")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level for the interpreter's own diagnostics.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,

    /// Disable ANSI color in REPL and error output.
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Subcommands. With none given, `lantern` starts the REPL.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a source file and print its final value.
    Run {
        /// Path to the `.l` source file to run.
        file: PathBuf,
    },
}

/// Maps onto [`log::Level`]; `Error` is the default so a plain `lantern`
/// invocation stays quiet unless something goes wrong.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    #[default]
    #[value(alias("0"))]
    Error,
    #[value(alias("1"))]
    Warn,
    #[value(alias("2"))]
    Info,
    #[value(alias("3"))]
    Debug,
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
