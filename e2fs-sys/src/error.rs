// SPDX-License-Identifier: GPL-3.0-only

use e2fs_types::{ErrorKind, OperationError};
use thiserror::Error;

/// Error types for ext2/3/4 tool operations
///
/// The `Display` text of each variant is the message handed to the caller.
#[derive(Error, Debug)]
pub enum E2fsError {
    #[error("cannot find required program {name}")]
    ToolNotFound { name: String },

    #[error("{0}")]
    ProcessFailed(String),

    #[error("{0}")]
    MalformedOutput(String),

    #[error("{0} must not be empty")]
    InvalidArgument(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl E2fsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            Self::ProcessFailed(_) => ErrorKind::ProcessFailure,
            Self::MalformedOutput(_) => ErrorKind::MalformedOutput,
            Self::InvalidArgument(_) => ErrorKind::InvalidInput,
            Self::Config(_) => ErrorKind::Internal,
        }
    }
}

impl From<E2fsError> for OperationError {
    fn from(err: E2fsError) -> Self {
        OperationError::new(err.kind(), err.to_string())
    }
}

impl From<toml::de::Error> for E2fsError {
    fn from(err: toml::de::Error) -> Self {
        E2fsError::Config(err.to_string())
    }
}

/// Result type alias for e2fs operations
pub type Result<T> = std::result::Result<T, E2fsError>;
