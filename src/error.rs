use std::fmt;
use std::path::PathBuf;

/// Every failure the engine can report.  None of these are retried: they
/// mean the game was packaged or wired incorrectly.
#[derive(Debug)]
pub enum GameError {
    /// Asset key not present in the registry.
    MissingAsset(String),
    /// `set_next_scene` called with a key nothing was registered under.
    UnknownScene(String),
    /// A configured soundtrack could not be opened.
    Audio {
        path: PathBuf,
        source: std::io::Error,
    },
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingAsset(key) => write!(f, "no asset registered under key {key:?}"),
            GameError::UnknownScene(key) => write!(f, "no scene registered under key {key:?}"),
            GameError::Audio { path, source } => {
                write!(f, "cannot load soundtrack {}: {source}", path.display())
            }
            GameError::Io(err) => write!(f, "terminal i/o failed: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Audio { source, .. } => Some(source),
            GameError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err)
    }
}
