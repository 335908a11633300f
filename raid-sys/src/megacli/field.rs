// SPDX-License-Identifier: GPL-3.0-only

//! Coercion of a single `Key: Value` line into a typed value.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::FieldError;
use super::grammar::CliGrammar;

static SECTOR_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[0x[0-9A-Fa-f]*\s*Sectors\]").expect("sector count pattern is valid")
});

/// Declared type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
    UInt64,
}

/// Rewrite applied before the value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransform {
    /// `4.000 TB [0x1d1c0beb0 Sectors]` → `4.000 TB`
    StripSectorCount,
    /// `Virtual Drive: 0 (Target Id: 0)` → `Virtual Drive: 0 `
    BeforeParenthesis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub transform: Option<FieldTransform>,
}

impl FieldSpec {
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            transform: None,
        }
    }

    pub const fn with(mut self, transform: FieldTransform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Parsed field value, consumed by exhaustive matching at each setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt64(u64),
}

impl FieldValue {
    pub fn into_text(self, field: &'static str) -> Result<String, FieldError> {
        match self {
            FieldValue::String(value) => Ok(value),
            FieldValue::Int(_) | FieldValue::UInt64(_) => Err(FieldError::TypeMismatch {
                field,
                expected: "string",
            }),
        }
    }

    /// Non-negative count or id that fits the record's `u32` fields.
    pub fn into_count(self, field: &'static str) -> Result<u32, FieldError> {
        let out_of_range = |value: String| FieldError::OutOfRange { field, value };
        match self {
            FieldValue::Int(value) => {
                u32::try_from(value).map_err(|_| out_of_range(value.to_string()))
            }
            FieldValue::UInt64(value) => {
                u32::try_from(value).map_err(|_| out_of_range(value.to_string()))
            }
            FieldValue::String(_) => Err(FieldError::TypeMismatch {
                field,
                expected: "integer",
            }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(value) => f.write_str(value),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::UInt64(value) => write!(f, "{value}"),
        }
    }
}

/// Parse `line` as `Key: Value` and coerce the value according to `spec`.
pub fn parse_field(
    line: &str,
    spec: FieldSpec,
    grammar: &CliGrammar,
) -> Result<FieldValue, FieldError> {
    let line = match spec.transform {
        Some(FieldTransform::BeforeParenthesis) => line
            .split_once('(')
            .map(|(head, _)| head)
            .ok_or_else(|| FieldError::Malformed(line.to_string()))?,
        _ => line,
    };

    let (_, value) = line
        .split_once(':')
        .ok_or_else(|| FieldError::MissingSeparator(line.to_string()))?;
    let mut value = value.trim().to_string();

    if spec.transform == Some(FieldTransform::StripSectorCount) {
        value = strip_sector_count(&value);
    }

    match spec.kind {
        FieldKind::String => Ok(FieldValue::String(value)),
        FieldKind::Int => {
            // Many enclosures cannot report their id and print N/A instead.
            if value == grammar.not_available {
                return Ok(FieldValue::Int(grammar.not_available_value));
            }
            value
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|source| FieldError::InvalidInteger {
                    line: line.to_string(),
                    source,
                })
        }
        FieldKind::UInt64 => value
            .parse::<u64>()
            .map(FieldValue::UInt64)
            .map_err(|source| FieldError::InvalidInteger {
                line: line.to_string(),
                source,
            }),
    }
}

fn strip_sector_count(value: &str) -> String {
    SECTOR_COUNT.replace_all(value, "").trim().to_string()
}
