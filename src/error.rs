//! Typed errors for the failures callers need to tell apart.
//!
//! Built-ins report through `anyhow`; the enums here cover redirection, the
//! fatal session/input tier and configuration loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why an output redirection could not be applied.
///
/// Both variants are recoverable: the command still runs, writing to the
/// default output stream.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("no filename specified for redirection")]
    MissingFilename,
    #[error("error opening file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while querying the identity shown in the prompt. Always fatal.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("gethostname: {0}")]
    Hostname(#[source] nix::Error),
    #[error("unable to determine the login name")]
    Username,
    #[error("getcwd: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Failure to read the next input line. Always fatal.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("end of input")]
    Eof,
    #[error("read error: {0}")]
    Read(String),
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        InputError::Read(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
