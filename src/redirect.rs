//! Output redirection: `cmd args > file`.

use crate::error::RedirectError;
use crate::tokenizer::ArgumentList;
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Token that redirects a command's output to the file named after it.
pub const MARKER: &str = ">";

/// Where a command writes its output.
///
/// A file sink is owned by the dispatcher for exactly one command and is
/// closed when dropped. The default stream is never closed.
#[derive(Debug)]
pub enum OutputSink {
    Default,
    File { path: PathBuf, file: File },
}

impl OutputSink {
    pub fn is_default(&self) -> bool {
        matches!(self, OutputSink::Default)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputSink::Default => None,
            OutputSink::File { path, .. } => Some(path),
        }
    }

    /// The writer to use for this sink, `default` standing in for the
    /// default output stream.
    pub fn writer<'a>(&'a mut self, default: &'a mut dyn Write) -> &'a mut dyn Write {
        match self {
            OutputSink::Default => default,
            OutputSink::File { file, .. } => file,
        }
    }

    /// Flush and release the sink.
    pub fn close(self) -> io::Result<()> {
        if let OutputSink::File { path, mut file } = self {
            file.flush()?;
            debug!("closed redirection target {}", path.display());
        }
        Ok(())
    }
}

/// Look for the first unquoted `>` in `args` and open the file named after it.
///
/// Whenever a marker is found the list is cut at the marker, so neither the
/// marker nor anything after it reaches the command, even if the
/// redirection itself fails. On error the caller is expected to report it
/// and fall back to [`OutputSink::Default`].
pub fn resolve(args: &mut ArgumentList) -> Result<OutputSink, RedirectError> {
    let Some(index) = args.find_unquoted(MARKER) else {
        return Ok(OutputSink::Default);
    };

    let target = args.get(index + 1).map(PathBuf::from);
    args.truncate(index);

    let path = target.ok_or(RedirectError::MissingFilename)?;
    let file = File::create(&path).map_err(|source| RedirectError::Open {
        path: path.clone(),
        source,
    })?;
    debug!("redirecting output to {}", path.display());
    Ok(OutputSink::File { path, file })
}
