// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Serialized form of a drive whose block device could not be determined.
pub const OS_PATH_UNRESOLVED: &str = "N/A";

/// Kernel block device backing a drive, when one could be found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OsPath {
    Resolved(PathBuf),
    #[default]
    Unresolved,
}

impl OsPath {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            OsPath::Resolved(path) => Some(path.as_path()),
            OsPath::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, OsPath::Resolved(_))
    }
}

impl fmt::Display for OsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsPath::Resolved(path) => write!(f, "{}", path.display()),
            OsPath::Unresolved => f.write_str(OS_PATH_UNRESOLVED),
        }
    }
}

impl From<OsPath> for String {
    fn from(value: OsPath) -> Self {
        value.to_string()
    }
}

impl From<String> for OsPath {
    fn from(value: String) -> Self {
        if value.is_empty() || value == OS_PATH_UNRESOLVED {
            OsPath::Unresolved
        } else {
            OsPath::Resolved(PathBuf::from(value))
        }
    }
}
