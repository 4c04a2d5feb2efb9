use std::path::PathBuf;

use crate::dictionary::LookupError;
use crate::words::DocumentId;

/// Failures reading or writing the word and document files
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed data in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failures ingesting or removing a single document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("path has no file name: {0}")]
    InvalidName(PathBuf),

    #[error("no such document: {0}")]
    UnknownId(DocumentId),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("not a word: {0:?}")]
    InvalidWord(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The definition was fetched but the lookup could not be persisted
    #[error("lookup of {word:?} not saved: {source}")]
    Unsaved {
        word: String,
        definition: String,
        #[source]
        source: StorageError,
    },
}
