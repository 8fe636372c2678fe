use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the registry, template, marker and scene services.
#[derive(Error, Debug)]
pub enum Error {
    /// No template of that name exists in the templates directory.
    #[error("'{name}' is not an existing template")]
    NotFound { name: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// A template file exists but cannot be turned into a folder tree.
    #[error("'{}' is not a valid template file: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("'{}' does not exist", path.display())]
    InvalidPath { path: PathBuf },

    /// A `.luxproject` file exists but does not start with the marker header.
    #[error("the project marker in '{}' is incomplete", path.display())]
    InvalidMarker { path: PathBuf },

    /// A folder-tree edit named a node that is not in the tree.
    #[error("no folder '{path}' in the template")]
    InvalidNode { path: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Malformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
