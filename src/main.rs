use anyhow::{Context, Result};
use argh::FromArgs;
use log::{debug, info};
use pipesh::env::{DEFAULT_SHELL_NAME, Environment};
use pipesh::{Config, Console, Interpreter, LineEditor, Session, logging};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Interactive shell with pipe-separated built-in commands.
#[derive(FromArgs)]
struct Args {
    /// run one line and exit with the status of its last command
    #[argh(option, short = 'c')]
    command: Option<String>,

    /// configuration file to use instead of ~/.config/pipesh/config.toml
    #[argh(option)]
    config: Option<PathBuf>,

    /// log level (off, error, warn, info, debug, trace)
    #[argh(option)]
    log_level: Option<String>,

    /// print the effective configuration and exit
    #[argh(switch)]
    dump_config: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{DEFAULT_SHELL_NAME}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = Config::load(args.config.as_deref())?;
    if args.dump_config {
        print!("{}", config.to_toml().context("cannot serialize config")?);
        return Ok(ExitCode::SUCCESS);
    }
    logging::init(&config.logging, args.log_level.as_deref())?;

    let env = Environment::with_shell_name(shell_name());
    let mut sh = Interpreter::new(Console::stdio(), config.limits).with_env(env);

    if let Some(line) = args.command {
        let status = sh.execute_line(&line)?;
        debug!("`{line}` finished with status {status}");
        return Ok(ExitCode::from(status.clamp(0, 255) as u8));
    }

    let session = Session::detect()?;
    let mut editor = LineEditor::for_stdin(&config.history)?;
    let result = sh.repl(&mut editor, &session, config.prompt.color);
    editor.save_history();
    result?;
    info!("shell exited");
    Ok(ExitCode::SUCCESS)
}

/// File name this binary was started as, protected from `rm`.
fn shell_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_SHELL_NAME.to_string())
}
