use crate::{operation::OperationKind, pointer::PathError};

/// Invalid input, detected before anything is sent to the server.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "unsupported operation {0:?}; select one of: replace, add, remove, move, test, get"
    )]
    UnsupportedOperation(String),

    #[error("declare an absolute path, e.g. /foo/baz (got {0:?})")]
    RelativePath(String),

    #[error("the {0} operation requires a path")]
    MissingPath(OperationKind),

    #[error("the {0} operation requires a value")]
    MissingValue(OperationKind),

    #[error("the move operation requires a from path")]
    MissingFrom,

    #[error("invalid JSON pointer {path:?}: {reason}")]
    InvalidPointer { path: String, reason: String },

    #[error("the {0} operation does not produce a patch")]
    NotAPatch(OperationKind),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Errors that abort an invocation without producing an [`crate::Outcome`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("{context}: {source:#}")]
    Transport {
        context: String,
        source: anyhow::Error,
    },
}

impl From<PathError> for Error {
    fn from(e: PathError) -> Self {
        Error::Configuration(e.into())
    }
}
