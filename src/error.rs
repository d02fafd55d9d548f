use std::path::PathBuf;

/// Errors that end the program.
#[derive(Debug)]
pub enum GameError {
    /// Terminal I/O failed.
    Io(std::io::Error),
    /// An image could not be read or decoded.
    Asset { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, GameError>;

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Io(e) => write!(f, "terminal I/O error: {}", e),
            GameError::Asset { path, reason } => {
                write!(f, "failed to load {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Asset { .. } => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}
