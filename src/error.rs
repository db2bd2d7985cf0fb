use std::path::PathBuf;

use crate::Hash;

/// error type for silt operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository not found at {0}")]
    NoRepo(PathBuf),

    #[error("repository already exists at {0}")]
    RepoExists(PathBuf),

    #[error("invalid object name: {0}")]
    InvalidHashHex(String),

    #[error("object not found: {0}")]
    ObjectNotFound(Hash),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("corrupt object {hash}: {message}")]
    CorruptObject { hash: Hash, message: String },

    #[error("malformed tree payload: {0}")]
    MalformedTree(String),

    #[error("object {0} is not a tree")]
    NotATree(Hash),

    #[error("unrecognized tree entry mode: {0}")]
    UnknownMode(String),

    #[error("invalid tree entry name: {0}")]
    InvalidEntryName(String),

    #[error("object payload of {0} bytes cannot be encoded")]
    ObjectTooLarge(usize),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
