//! Crate error type

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Every variant aborts the run before any output is written.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("base directory '{0}' does not exist or is not a directory")]
    MissingBaseDir(PathBuf),

    #[error("{which} root path {path:?} does not name a folder in the tree skeleton")]
    RootNotFound { which: &'static str, path: Vec<String> },

    #[error("file '{0}' is not under the base directory")]
    OutsideBasePath(PathBuf),

    #[error("cannot write manifest to '{path}': {source}")]
    WriteManifest {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}
