use crate::command::{COMMAND_NOT_FOUND, CommandFactory, ExitCode};
use crate::config::{Limits, PromptColor};
use crate::env::Environment;
use crate::input::LineEditor;
use crate::io_adapters::Console;
use crate::pipeline;
use crate::redirect::{self, OutputSink};
use crate::session::Session;
use crate::tokenizer::{self, ArgumentList};
use anyhow::Result;
use log::{debug, trace, warn};
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports the built-in commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// The built-in command set: `exit`, `clear`, `echo`, `pwd`, `cd`, `ls`,
/// `mkdir`, `touch` and `rm`.
pub fn builtin_commands() -> Vec<Box<dyn CommandFactory>> {
    use crate::builtin::*;
    vec![
        Box::new(Factory::<Exit>::default()),
        Box::new(Factory::<Clear>::default()),
        Box::new(Factory::<Echo>::default()),
        Box::new(Factory::<Pwd>::default()),
        Box::new(Factory::<Cd>::default()),
        Box::new(Factory::<Ls>::default()),
        Box::new(Factory::<Mkdir>::default()),
        Box::new(Factory::<Touch>::default()),
        Box::new(Factory::<Rm>::default()),
    ]
}

/// Interprets input lines against a set of commands.
///
/// A line is split on `|` into segments that run one after another, left to
/// right. Each segment is tokenized into its own [`ArgumentList`], may
/// redirect its output to a file with `>`, and is dispatched by name to the
/// first [`CommandFactory`] that recognizes it. No data flows between
/// segments.
///
/// Example
/// ```
/// use pipesh::{Console, Interpreter};
/// use pipesh::config::Limits;
///
/// let (console, captured) = Console::capture("");
/// let mut sh = Interpreter::new(console, Limits::default());
/// sh.execute_line("echo hello | echo world").unwrap();
/// assert_eq!(captured.output(), "hello\nworld\n");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
    console: Console,
    limits: Limits,
    last_status: ExitCode,
}

impl Interpreter {
    /// Interpreter with the built-in command set.
    pub fn new(console: Console, limits: Limits) -> Self {
        Self::with_commands(builtin_commands(), console, limits)
    }

    /// Create a new interpreter with a custom set of command factories.
    pub fn with_commands(
        commands: Vec<Box<dyn CommandFactory>>,
        console: Console,
        limits: Limits,
    ) -> Self {
        Self {
            env: Environment::new(),
            commands,
            console,
            limits,
            last_status: 0,
        }
    }

    /// Replace the environment, e.g. to protect a different shell name.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Status of the last command that ran.
    pub fn last_status(&self) -> ExitCode {
        self.last_status
    }

    /// Interpret one input line.
    ///
    /// Failures of individual commands are reported on the console error
    /// stream and do not stop the line; `exit` does. The returned error is
    /// reserved for the console itself failing.
    pub fn execute_line(&mut self, line: &str) -> Result<ExitCode> {
        for segment in pipeline::split(line, self.limits.max_segments) {
            let mut args = tokenizer::tokenize(segment, self.limits.max_args);
            if args.is_empty() {
                trace!("skipping empty segment");
                continue;
            }

            let mut sink = match redirect::resolve(&mut args) {
                Ok(sink) => sink,
                Err(err) => {
                    warn!("{err}");
                    writeln!(self.console.error, "{err}")?;
                    OutputSink::Default
                }
            };

            let status = self.run(&args, &mut sink);
            if let Err(e) = sink.close() {
                writeln!(self.console.error, "error closing output file: {e}")?;
            }
            self.last_status = status?;

            if self.env.should_exit {
                debug!("exit requested, dropping the rest of the line");
                break;
            }
        }
        self.console.flush()?;
        Ok(self.last_status)
    }

    /// Run a single parsed command, writing its output to `sink`.
    ///
    /// An empty argument list (as left by `> file`) is a no-op. Unknown
    /// names are reported and yield [`COMMAND_NOT_FOUND`].
    pub fn run(&mut self, args: &ArgumentList, sink: &mut OutputSink) -> Result<ExitCode> {
        let Some(name) = args.name() else {
            return Ok(0);
        };
        let operands: Vec<&str> = args.operands().iter().map(String::as_str).collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, name, &operands) {
                debug!("running `{args}`");
                return cmd.execute(sink, &mut self.console, &mut self.env);
            }
        }

        debug!("no command named {name:?}");
        writeln!(self.console.error, "unknown command: {name}")?;
        Ok(COMMAND_NOT_FOUND)
    }

    /// Read-process loop: prompt, read a line, interpret it, until `exit`.
    ///
    /// Returns `Ok` once `exit` ran. Failing to determine the working
    /// directory or to read input ends the loop with an error.
    pub fn repl(
        &mut self,
        editor: &mut LineEditor,
        session: &Session,
        color: PromptColor,
    ) -> Result<()> {
        while !self.env.should_exit {
            let prompt = session.prompt(color)?;
            let line = editor.read_line(&prompt, &mut self.console, self.limits.max_input_bytes)?;
            self.execute_line(&line)?;
        }
        Ok(())
    }
}

impl Default for Interpreter {
    /// Built-in commands on the process's standard streams.
    fn default() -> Self {
        Self::new(Console::stdio(), Limits::default())
    }
}
