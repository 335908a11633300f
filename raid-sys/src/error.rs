// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

use crate::megacli::FieldError;

/// Error types for adapter collection
#[derive(Error, Debug)]
pub enum SysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MegaCli binary not found: {0}")]
    ToolNotFound(String),

    #[error("MegaCli {query} returned {code}")]
    ExternalToolFailure { query: &'static str, code: String },

    #[error("MegaCli {query} output has no exit code")]
    MalformedOutput { query: &'static str },

    #[error("MegaCli {query} output could not be parsed: {source}")]
    Field {
        query: &'static str,
        #[source]
        source: FieldError,
    },

    #[error("thread pool initialization failed: {0}")]
    ThreadPoolBuild(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, SysError>;
