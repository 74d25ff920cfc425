use std::path::PathBuf;
use thiserror::Error;

/// Failures that callers are expected to tell apart.
///
/// They travel inside [`crate::Error`] like any other error, use
/// `error.downcast_ref::<QuarryError>()` to inspect the kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuarryError {
    /// A data operation needed the process-wide transaction but none is open.
    #[error("There isn't an active transaction")]
    NoActiveTransaction,

    #[error("File not found at: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error("Invalid config file {}: {reason}", .path.display())]
    InvalidConfigFile { path: PathBuf, reason: String },

    #[error("No connection named `{0}` is configured")]
    UnknownConnection(String),

    #[error("No driver registered for `{0}`")]
    DriverNotRegistered(String),
}

impl QuarryError {
    /// Returns the kind carried by `error`, if it is one of ours.
    pub fn kind_of(error: &crate::Error) -> Option<&QuarryError> {
        error.downcast_ref::<QuarryError>()
    }
}
