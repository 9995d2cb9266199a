//! Error types for zosfiles.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by zosfiles operations.
///
/// Validation variants are always raised before any request reaches the
/// server. Transport variants carry what the server (or the HTTP stack)
/// reported, verbatim.
#[derive(Error, Debug)]
pub enum ZosFilesError {
    /// A creation option required in the current context was not supplied.
    #[error("If 'like' is not specified, you must specify '{0}'")]
    MissingRequiredOption(&'static str),

    /// An option value is outside its allowed set or range.
    #[error("{0}")]
    InvalidOptionValue(String),

    /// zFS `perms` outside 0..=777.
    #[error("Invalid zos-files create command 'perms' option: {0}")]
    InvalidPermsOption(i64),

    /// zFS cylinder allocation above the maximum quantity.
    #[error("Maximum allocation quantity of {max} exceeded", max = crate::constants::limits::MAX_ALLOCATION_QUANTITY)]
    MaxAllocationQuantityExceeded,

    /// Enqueue mode other than `SHRW` or `EXCLU`.
    #[error("Invalid value. Valid options are SHRW or EXCLU.")]
    InvalidValuesForEnq,

    /// Local upload source missing or not a regular file.
    #[error("File {} not found", .0.display())]
    SourceNotFound(PathBuf),

    /// The addressed USS path does not exist on the remote system.
    #[error("USS path not found: {0}")]
    RemoteResourceNotFound(String),

    /// The server answered with a status outside the operation's expected set.
    #[error("HTTP {status} (expected one of {expected:?}): {message}")]
    UnexpectedStatus {
        status: u16,
        expected: Vec<u16>,
        message: String,
    },

    /// A successful response whose body does not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The HTTP stack failed before a status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection configuration is incomplete or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ZosFilesResult<T> = Result<T, ZosFilesError>;

impl ZosFilesError {
    /// Whether the error was raised by local validation, before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ZosFilesError::MissingRequiredOption(_)
                | ZosFilesError::InvalidOptionValue(_)
                | ZosFilesError::InvalidPermsOption(_)
                | ZosFilesError::MaxAllocationQuantityExceeded
                | ZosFilesError::InvalidValuesForEnq
        )
    }
}
