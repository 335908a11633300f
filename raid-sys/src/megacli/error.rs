// SPDX-License-Identifier: GPL-3.0-only

use std::num::ParseIntError;

use thiserror::Error;

/// A recognized field whose text could not be coerced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("no ':' separator in line: {0}")]
    MissingSeparator(String),

    #[error("invalid integer in line {line:?}: {source}")]
    InvalidInteger {
        line: String,
        #[source]
        source: ParseIntError,
    },

    #[error("value {value} out of range for {field}")]
    OutOfRange { field: &'static str, value: String },

    #[error("malformed field line: {0}")]
    Malformed(String),

    #[error("block is missing required field {0}")]
    MissingField(&'static str),

    #[error("field {field} expected {expected} value")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}
