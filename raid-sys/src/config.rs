// SPDX-License-Identifier: GPL-3.0-only

//! Collector configuration, read from a TOML file.
//!
//! ```toml
//! binary = "/opt/MegaRAID/MegaCli/MegaCli64"
//! adapter_count = 2
//! parallel = true
//!
//! [grammar]
//! jbod_state = "JBOD"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::by_path::DEFAULT_BY_PATH_DIR;
use crate::error::{Result, SysError};
use crate::megacli::CliGrammar;
use crate::runner::DEFAULT_MEGACLI_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// MegaCli binary; PATH is searched when it does not exist
    pub binary: PathBuf,
    /// Adapters `0..adapter_count` are scanned
    pub adapter_count: u32,
    pub by_path_dir: PathBuf,
    /// Scan adapters on a thread pool instead of one after another
    pub parallel: bool,
    pub grammar: CliGrammar,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_MEGACLI_PATH),
            adapter_count: 1,
            by_path_dir: PathBuf::from(DEFAULT_BY_PATH_DIR),
            parallel: false,
            grammar: CliGrammar::default(),
        }
    }
}

impl CollectorConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SysError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SysError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.adapter_count == 0 {
            return Err(SysError::InvalidConfig(
                "adapter_count must be at least 1".to_string(),
            ));
        }

        let grammar = &self.grammar;
        let required = [
            ("exit_token", &grammar.exit_token),
            ("virtual_drive.sentinel", &grammar.virtual_drive.sentinel),
            ("physical_drive.sentinel", &grammar.physical_drive.sentinel),
            ("pci.bus_label", &grammar.pci.bus_label),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(SysError::InvalidConfig(format!("grammar.{name} is empty")));
        }

        Ok(())
    }
}
