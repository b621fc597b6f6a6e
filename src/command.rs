use crate::env::Environment;
use crate::io_adapters::Console;
use crate::redirect::OutputSink;
use anyhow::Result;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Status recorded when no command matches the requested name.
pub const COMMAND_NOT_FOUND: ExitCode = 127;

/// Object-safe trait for any command that can be executed by the shell.
pub trait ExecutableCommand {
    /// Executes the command.
    ///
    /// Regular output goes to `sink`, which is either a redirection file or
    /// the console's output. Prompts, answers and failures use `console`.
    fn execute(
        self: Box<Self>,
        sink: &mut OutputSink,
        console: &mut Console,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. Names are
/// matched case-sensitively.
pub trait CommandFactory {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(
        &self,
        env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>>;
}
