use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid hand shape: {0:?}")]
    InvalidHandShape(String),

    #[error("Board must have 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardShape(usize),

    #[error("Cannot read {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot delete {path}: {source}")]
    PruneFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid decision book line {line}: {reason}")]
    InvalidBook { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type DigestResult<T> = Result<T, DigestError>;
