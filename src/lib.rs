//! A small interactive shell with pipe-separated built-in commands.
//!
//! An input line is split on `|` into independent segments that run left to
//! right. Each segment is tokenized (double or single quotes group words),
//! may send its output to a file with `> path`, and is dispatched by name to
//! one of the built-in commands: `exit`, `clear`, `echo`, `pwd`, `cd`, `ls`,
//! `mkdir`, `touch` and `rm`. Nothing flows between segments; `|` is a
//! sequencing separator, not a pipe.
//!
//! The main entry point is [`Interpreter`]. It runs over a [`Console`], so the
//! same code drives the terminal and in-memory streams in tests. The public
//! modules [`command`] and [`env`] expose the traits and state needed to plug
//! in further commands.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod input;
mod interpreter;
pub mod io_adapters;
pub mod logging;
pub mod pipeline;
pub mod redirect;
pub mod session;
pub mod tokenizer;

#[cfg(test)]
mod test_support;

/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::{Interpreter, builtin_commands};

pub use config::Config;
pub use input::LineEditor;
pub use io_adapters::{Captured, Console};
pub use session::Session;
