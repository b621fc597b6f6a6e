/// Name of the shell binary, protected from `rm` unless overridden.
pub const DEFAULT_SHELL_NAME: &str = env!("CARGO_PKG_NAME");

/// Mutable, user-level state of the running shell.
///
/// - `should_exit`: set by `exit`; the dispatcher stops at the current segment
///   and the read loop ends.
/// - `protected_names`: targets `rm` refuses to delete. The check compares
///   names textually, so the running binary is not protected once it is
///   renamed or reached through a different path.
#[derive(Debug, Clone)]
pub struct Environment {
    pub should_exit: bool,
    pub protected_names: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_shell_name(DEFAULT_SHELL_NAME)
    }

    /// Environment protecting `.` and `shell_name` from `rm`.
    pub fn with_shell_name(shell_name: impl Into<String>) -> Self {
        Self {
            should_exit: false,
            protected_names: vec![".".to_string(), shell_name.into()],
        }
    }

    pub fn is_protected(&self, name: &str) -> bool {
        self.protected_names.iter().any(|protected| protected == name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
