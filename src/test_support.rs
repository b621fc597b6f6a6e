//! Helpers shared by unit tests that touch the filesystem or the process cwd.

use std::env as stdenv;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Serialises tests that read or change the process-wide working directory.
pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Restores the working directory it was created in when dropped.
pub(crate) struct CwdGuard(PathBuf);

impl CwdGuard {
    pub(crate) fn new() -> Self {
        Self(stdenv::current_dir().expect("cwd"))
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = stdenv::set_current_dir(&self.0);
    }
}

pub(crate) fn make_unique_temp_dir(tag: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = stdenv::temp_dir().join(format!("pipesh_{tag}_{}_{nanos}_{seq}", std::process::id()));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}
