//! Identity shown in the prompt: who is logged in, on which host, and where.

use crate::config::PromptColor;
use crate::error::SessionError;
use log::debug;
use nix::unistd::{User, geteuid, gethostname};
use std::ffi::CStr;
use std::path::Path;

const COLOR_RESET: &str = "\x1b[0m";

/// Username and hostname, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    hostname: String,
}

impl Session {
    pub fn new(username: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            hostname: hostname.into(),
        }
    }

    /// Ask the OS for the host name and the login name.
    ///
    /// The login name comes from `getlogin`, falling back to the passwd
    /// entry of the effective user when there is no controlling terminal.
    pub fn detect() -> Result<Self, SessionError> {
        let hostname = gethostname()
            .map_err(SessionError::Hostname)?
            .to_string_lossy()
            .into_owned();
        let username = login_name()
            .or_else(effective_user_name)
            .ok_or(SessionError::Username)?;
        debug!("session for {username}@{hostname}");
        Ok(Self::new(username, hostname))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Prompt for the current working directory, which is re-read each time.
    pub fn prompt(&self, color: PromptColor) -> Result<String, SessionError> {
        let cwd = std::env::current_dir().map_err(SessionError::CurrentDir)?;
        Ok(self.render_prompt(&cwd, color))
    }

    /// `<color><user>@<host>:<cwd><reset>> `
    pub fn render_prompt(&self, cwd: &Path, color: PromptColor) -> String {
        let identity = format!("{}@{}:{}", self.username, self.hostname, cwd.display());
        match color.escape() {
            Some(start) => format!("{start}{identity}{COLOR_RESET}> "),
            None => format!("{identity}> "),
        }
    }
}

fn login_name() -> Option<String> {
    // SAFETY: getlogin returns null or a pointer to a NUL-terminated string
    // that stays valid until the next call; it is copied out immediately.
    let name = unsafe {
        let ptr = libc::getlogin();
        if ptr.is_null() {
            return None;
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    };
    (!name.is_empty()).then_some(name)
}

fn effective_user_name() -> Option<String> {
    User::from_uid(geteuid()).ok().flatten().map(|user| user.name)
}
