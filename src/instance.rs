//! Single-instance guard backed by an advisory flock on a PID file under
//! `$XDG_RUNTIME_DIR`. Whoever holds the flock is the running menu; a new
//! invocation that finds the lock taken kills the holder and yields, so
//! the next start gets a clean slate (toggle semantics).

use crate::error::{MenuError, Result};
use nix::fcntl::{Flock, FlockArg};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const LOCK_BASENAME: &str = "rcmenu.pid";

/// Outcome of an acquisition attempt.
pub enum Acquire {
    /// We hold the lock until the guard is dropped.
    Locked(InstanceLock),
    /// Another process holds it; its PID as read from the file.
    Held { pid: i32 },
}

/// Holds the flock for the lifetime of the menu and removes the PID file
/// on drop, error paths included.
pub struct InstanceLock {
    lock: Option<Flock<File>>,
    path: PathBuf,
}

/// Lock file location, `$XDG_RUNTIME_DIR/rcmenu.pid`. An unset runtime
/// directory is a startup precondition failure.
pub fn lock_path() -> Result<PathBuf> {
    let run_dir = std::env::var_os("XDG_RUNTIME_DIR").ok_or(MenuError::RuntimeDirUnset)?;
    Ok(PathBuf::from(run_dir).join(LOCK_BASENAME))
}

/// Try to take the exclusive non-blocking lock at `path`. On success the
/// file is truncated and our PID written as decimal text.
pub fn acquire(path: &Path) -> Result<Acquire> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
        Ok(mut lock) => {
            lock.set_len(0)?;
            lock.seek(SeekFrom::Start(0))?;
            write!(lock, "{}", std::process::id())?;
            lock.flush()?;
            Ok(Acquire::Locked(InstanceLock {
                lock: Some(lock),
                path: path.to_path_buf(),
            }))
        }
        Err((mut file, _errno)) => {
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            let pid = contents.trim().parse::<i32>()?;
            Ok(Acquire::Held { pid })
        }
    }
}

/// Kill the current holder and remove its PID file. A failed kill (the
/// holder already exited, leaving a stale lock) is logged and otherwise
/// ignored; the file is removed either way so the next start is clean.
pub fn preempt(path: &Path, pid: i32) {
    if let Err(err) = signal::kill(Pid::from_raw(pid), Signal::SIGKILL) {
        log::warn!("could not kill previous instance (pid {pid}): {err}");
    }
    if let Err(err) = fs::remove_file(path) {
        log::warn!("could not remove lock file {}: {err}", path.display());
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        // Unlock before unlinking so a racing starter never observes a
        // locked but already-deleted file.
        drop(self.lock.take());
        if let Err(err) = fs::remove_file(&self.path) {
            log::warn!("could not remove lock file {}: {err}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_writes_own_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCK_BASENAME);
        let lock = match acquire(&path).unwrap() {
            Acquire::Locked(lock) => lock,
            Acquire::Held { .. } => panic!("fresh lock reported as held"),
        };
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, std::process::id().to_string());
        drop(lock);
    }

    #[test]
    fn contended_lock_reports_holder_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCK_BASENAME);
        let _lock = match acquire(&path).unwrap() {
            Acquire::Locked(lock) => lock,
            Acquire::Held { .. } => panic!("fresh lock reported as held"),
        };
        // A second open file description on the same path must be denied
        // and see the first holder's PID.
        match acquire(&path).unwrap() {
            Acquire::Held { pid } => assert_eq!(pid, std::process::id() as i32),
            Acquire::Locked(_) => panic!("second acquisition succeeded"),
        }
    }

    #[test]
    fn drop_removes_lock_file_and_frees_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCK_BASENAME);
        let lock = match acquire(&path).unwrap() {
            Acquire::Locked(lock) => lock,
            Acquire::Held { .. } => panic!("fresh lock reported as held"),
        };
        drop(lock);
        assert!(!path.exists());
        assert!(matches!(acquire(&path).unwrap(), Acquire::Locked(_)));
    }

    #[test]
    fn preempt_tolerates_dead_holder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCK_BASENAME);
        fs::write(&path, "2000000000").unwrap();
        // PID is above any real pid_max, so the kill fails with ESRCH;
        // the stale file must still be removed.
        preempt(&path, 2_000_000_000);
        assert!(!path.exists());
    }
}
