use array_writer_path::PathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriterError {
    #[error(transparent)]
    MalformedPath(#[from] PathError),

    /// An ancestor is missing or not a container, or the target is absent.
    #[error("PATH_NOT_READABLE: {0:?}")]
    PathNotReadable(String),

    /// Raised by the `*_safe` operations when the destination already holds a value.
    #[error("PATH_NOT_WRITABLE: {0:?}")]
    PathNotWritable(String),

    #[error("INVALID_ARGUMENT: {0}")]
    InvalidArgument(String),

    /// One path lies inside the other, so the result would depend on ordering.
    #[error("UNSUPPORTED_OVERLAP: {from:?} and {to:?}")]
    UnsupportedOverlap { from: String, to: String },
}

pub type Result<T, E = WriterError> = std::result::Result<T, E>;
