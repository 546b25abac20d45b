// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification of a failed operation as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Neither the extended nor the original tool variant is executable.
    ToolNotFound,
    /// The tool ran (or failed to start) and the operation's exit policy rejected it.
    ProcessFailure,
    /// The tool succeeded but its output did not have the expected shape.
    MalformedOutput,
    /// A required parameter was empty.
    InvalidInput,
    /// The result could not be constructed.
    Internal,
}

/// Failure reply. `message` is passed through from the core unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct OperationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl OperationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
