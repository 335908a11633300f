// SPDX-License-Identifier: GPL-3.0-only

//! Text grammar of a MegaCli release.
//!
//! Every literal the parsers rely on lives here: block sentinels, the exit
//! code delimiter, the field vocabulary and the labels of the PCI listing.
//! `CliGrammar::default()` describes MegaCli/MegaCli64 8.x; a different tool
//! version can be described in the `[grammar]` table of the collector config
//! without touching the parsers.

use serde::{Deserialize, Serialize};

use super::physical_drive::PdField;
use super::virtual_drive::VdField;

/// How a vocabulary key is located in a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMatch {
    #[default]
    Prefix,
    Contains,
}

/// One entry of a vocabulary table: key literal → typed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKey<F> {
    pub key: String,
    #[serde(default)]
    pub matching: KeyMatch,
    pub field: F,
}

impl<F: Copy> FieldKey<F> {
    pub fn prefix(key: &str, field: F) -> Self {
        Self {
            key: key.to_string(),
            matching: KeyMatch::Prefix,
            field,
        }
    }

    pub fn contains(key: &str, field: F) -> Self {
        Self {
            key: key.to_string(),
            matching: KeyMatch::Contains,
            field,
        }
    }

    fn matches(&self, line: &str) -> bool {
        match self.matching {
            KeyMatch::Prefix => line.starts_with(&self.key),
            KeyMatch::Contains => line.contains(&self.key),
        }
    }
}

/// First field in `table` whose key matches `line`; `None` for unknown lines.
pub fn lookup<F: Copy>(table: &[FieldKey<F>], line: &str) -> Option<F> {
    table
        .iter()
        .find(|entry| entry.matches(line))
        .map(|entry| entry.field)
}

/// Field enum of one record kind, knowing the MegaCli layout of its block.
pub trait BlockVocabulary: Copy + Sized {
    fn default_block() -> BlockGrammar<Self>;
}

/// Delimiters and vocabulary of one repeating record kind.
///
/// Keys left out of a config table keep their MegaCli value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "F: Deserialize<'de> + BlockVocabulary"))]
pub struct BlockGrammar<F> {
    /// Opens every record, e.g. `Virtual Drive:`
    pub sentinel: String,
    /// Must appear in a fragment for it to count as a record
    pub marker: String,
    pub fields: Vec<FieldKey<F>>,
}

impl<F: BlockVocabulary> Default for BlockGrammar<F> {
    fn default() -> Self {
        F::default_block()
    }
}

/// Labels of the `-AdpGetPciInfo` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PciGrammar {
    pub domain: String,
    pub bus_label: String,
    pub device_label: String,
    pub function_label: String,
}

impl Default for PciGrammar {
    fn default() -> Self {
        Self {
            domain: "0000".to_string(),
            bus_label: "Bus Number".to_string(),
            device_label: "Device Number".to_string(),
            function_label: "Function Number".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliGrammar {
    /// Separates the listing from its result code, e.g. `Exit Code: 0x00`
    pub exit_token: String,
    pub success_code: String,
    /// Literal printed for numeric fields the hardware cannot report
    pub not_available: String,
    pub not_available_value: i64,
    /// Firmware state of a pass-through disk
    pub jbod_state: String,
    pub disk_group_label: String,
    pub arm_label: String,
    pub virtual_drive: BlockGrammar<VdField>,
    pub physical_drive: BlockGrammar<PdField>,
    pub pci: PciGrammar,
}

impl Default for CliGrammar {
    fn default() -> Self {
        Self {
            exit_token: "Exit Code:".to_string(),
            success_code: "0x00".to_string(),
            not_available: "N/A".to_string(),
            not_available_value: i64::from(raid_types::UNREPORTED_NUMBER),
            jbod_state: "JBOD".to_string(),
            disk_group_label: "DiskGroup".to_string(),
            arm_label: "Arm".to_string(),
            virtual_drive: BlockGrammar::default(),
            physical_drive: BlockGrammar::default(),
            pci: PciGrammar::default(),
        }
    }
}
