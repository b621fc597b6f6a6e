use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::interpreter::Factory;
use crate::io_adapters::Console;
use crate::redirect::OutputSink;
use anyhow::{Context, Result, anyhow, bail};
use argh::{EarlyExit, FromArgs};
use log::{debug, warn};
use std::env;
use std::fs;
use std::io::Write;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Mode for directories created by `mkdir`, before the umask.
const MKDIR_MODE: u32 = 0o777;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are built through the [`argh`] crate's `FromArgs` trait, keeping every
/// operand as written, and executed directly in-process without spawning a child
/// process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name() -> &'static str;

    /// Executes the command.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    /// An `Err` is a recoverable failure; its message is shown on one line.
    fn execute(
        self,
        sink: &mut OutputSink,
        console: &mut Console,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        sink: &mut OutputSink,
        console: &mut Console,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match <T as BuiltinCommand>::execute(*self, sink, console, env) {
            Ok(x) => Ok(x),
            Err(e) => {
                debug!("{} failed: {e:#}", T::name());
                writeln!(console.error, "{e:#}")?;
                Ok(1)
            }
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            match T::from_args(&[name], args) {
                Ok(cmd) => Some(Box::new(cmd)),
                Err(EarlyExit { output, .. }) => {
                    warn!("{name}: {output}");
                    None
                }
            }
        } else {
            None
        }
    }
}

/// Implement `FromArgs` by taking every operand as written.
///
/// The commands act on argument 1 verbatim, so names such as `-x` or `help`
/// are operands here rather than flags.
macro_rules! verbatim_operands {
    ($($cmd:ident => $field:ident),* $(,)?) => {$(
        impl FromArgs for $cmd {
            fn from_args(_command_name: &[&str], args: &[&str]) -> Result<Self, EarlyExit> {
                Ok($cmd {
                    $field: args.iter().map(|arg| arg.to_string()).collect(),
                })
            }
        }
    )*};
}

verbatim_operands!(
    Exit => _args,
    Clear => _args,
    Echo => args,
    Pwd => _args,
    Cd => operands,
    Ls => _args,
    Mkdir => operands,
    Touch => operands,
    Rm => operands,
);

/// First operand, or `message` as the failure when it is missing.
fn operand(operands: Vec<String>, message: &str) -> Result<String> {
    operands
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("{message}"))
}

/// Leave the shell.
pub struct Exit {
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _sink: &mut OutputSink,
        console: &mut Console,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(console.output, "Exiting the terminal")?;
        env.should_exit = true;
        Ok(0)
    }
}

/// Clear the terminal screen.
pub struct Clear {
    pub _args: Vec<String>,
}

impl BuiltinCommand for Clear {
    fn name() -> &'static str {
        "clear"
    }

    // The escape sequence always goes to the terminal, even when redirected.
    fn execute(
        self,
        _sink: &mut OutputSink,
        console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        console.output.write_all(CLEAR_SCREEN.as_bytes())?;
        console.output.flush()?;
        Ok(0)
    }
}

/// Write the arguments to the output, separated by spaces, followed by a newline.
///
pub struct Echo {
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(
        self,
        sink: &mut OutputSink,
        console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(sink.writer(&mut *console.output), "{}", self.args.join(" "))?;
        Ok(0)
    }
}

/// Print the current working directory.
pub struct Pwd {
    pub _args: Vec<String>,
}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(
        self,
        sink: &mut OutputSink,
        console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let dir = env::current_dir().context("error getting working directory")?;
        writeln!(sink.writer(&mut *console.output), "{}", dir.display())?;
        Ok(0)
    }
}

/// Change the current working directory.
pub struct Cd {
    pub operands: Vec<String>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn execute(
        self,
        _sink: &mut OutputSink,
        _console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let target = operand(self.operands, "invalid directory")?;
        if let Err(e) = env::set_current_dir(&target) {
            debug!("cd {target}: {e}");
            bail!("invalid directory");
        }
        Ok(0)
    }
}

/// List the entries of the current directory, skipping hidden ones.
pub struct Ls {
    pub _args: Vec<String>,
}

impl BuiltinCommand for Ls {
    fn name() -> &'static str {
        "ls"
    }

    fn execute(
        self,
        sink: &mut OutputSink,
        console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let entries = fs::read_dir(".").context("error opening directory")?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("error reading directory")?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();

        let out = sink.writer(&mut *console.output);
        for name in &names {
            write!(out, "{name}  ")?;
        }
        writeln!(out)?;
        Ok(0)
    }
}

/// Create a directory.
pub struct Mkdir {
    pub operands: Vec<String>,
}

impl BuiltinCommand for Mkdir {
    fn name() -> &'static str {
        "mkdir"
    }

    fn execute(
        self,
        _sink: &mut OutputSink,
        _console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let name = operand(self.operands, "error creating directory: no name given")?;
        fs::DirBuilder::new()
            .mode(MKDIR_MODE)
            .create(&name)
            .with_context(|| format!("error creating directory {name}"))?;
        Ok(0)
    }
}

/// Create an empty file, truncating it if it exists.
pub struct Touch {
    pub operands: Vec<String>,
}

impl BuiltinCommand for Touch {
    fn name() -> &'static str {
        "touch"
    }

    fn execute(
        self,
        _sink: &mut OutputSink,
        _console: &mut Console,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        let name = operand(self.operands, "error opening file: no name given")?;
        fs::File::create(&name).with_context(|| format!("error opening file {name}"))?;
        Ok(0)
    }
}

/// Remove a file after asking for confirmation.
pub struct Rm {
    pub operands: Vec<String>,
}

impl BuiltinCommand for Rm {
    fn name() -> &'static str {
        "rm"
    }

    fn execute(
        self,
        _sink: &mut OutputSink,
        console: &mut Console,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        let name = operand(self.operands, "file not found")?;
        if env.is_protected(&name) {
            bail!("refusing to remove protected name {name}");
        }
        let Ok(metadata) = fs::symlink_metadata(&name) else {
            bail!("file not found");
        };

        write!(
            console.output,
            "Confirm you want to remove {name} by entering y or yes: "
        )?;
        console.output.flush()?;
        let mut answer = String::new();
        console.input.read_line(&mut answer)?;
        let answer = answer.trim().to_lowercase();
        if answer != "y" && answer != "yes" {
            debug!("rm {name}: not confirmed");
            return Ok(0);
        }

        let path = Path::new(&name);
        let removed = if metadata.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };
        removed.with_context(|| format!("error removing file {name}"))?;
        Ok(0)
    }
}
