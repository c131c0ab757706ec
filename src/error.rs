use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum MenuError {
    ConfigNotFound(PathBuf),
    InvalidEntry(String),
    RuntimeDirUnset,
    HomeDirUnset,
    Io(std::io::Error),
    LockPid(std::num::ParseIntError),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::ConfigNotFound(path) => write!(f, "{} not found", path.display()),
            MenuError::InvalidEntry(line) => write!(f, "invalid entry: {}", line),
            MenuError::RuntimeDirUnset => write!(f, "env variable XDG_RUNTIME_DIR not set"),
            MenuError::HomeDirUnset => write!(f, "could not resolve home directory"),
            MenuError::Io(err) => write!(f, "IO error: {}", err),
            MenuError::LockPid(err) => write!(f, "bad pid in lock file: {}", err),
        }
    }
}

impl std::error::Error for MenuError {}

impl From<std::io::Error> for MenuError {
    fn from(err: std::io::Error) -> Self {
        MenuError::Io(err)
    }
}

impl From<std::num::ParseIntError> for MenuError {
    fn from(err: std::num::ParseIntError) -> Self {
        MenuError::LockPid(err)
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
