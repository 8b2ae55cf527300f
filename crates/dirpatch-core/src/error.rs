use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported hash algorithm: '{0}'")]
    UnsupportedAlgorithm(String),

    #[error("Cannot scan '{}': {source}", path.display())]
    Scan { path: PathBuf, source: io::Error },

    #[error("Not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot read '{}': {source}", path.display())]
    UnreadableFile { path: PathBuf, source: io::Error },

    #[error("Cannot write report '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Other(String),
}
