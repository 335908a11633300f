// SPDX-License-Identifier: GPL-3.0-only

//! `-LDInfo -Lall` listing → `VirtualDriveStat` records.

use raid_types::VirtualDriveStat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::FieldError;
use super::field::{FieldKind, FieldSpec, FieldTransform, FieldValue, parse_field};
use super::grammar::{BlockGrammar, BlockVocabulary, CliGrammar, FieldKey, lookup};
use super::segment::segment_blocks;

/// Fields of a virtual drive block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VdField {
    Id,
    Name,
    Size,
    State,
    NumberOfDrives,
    EncryptionType,
}

impl VdField {
    pub fn name(self) -> &'static str {
        match self {
            VdField::Id => "virtual_drive",
            VdField::Name => "name",
            VdField::Size => "size",
            VdField::State => "state",
            VdField::NumberOfDrives => "number_of_drives",
            VdField::EncryptionType => "encryption_type",
        }
    }

    pub fn spec(self) -> FieldSpec {
        match self {
            VdField::Id => FieldSpec::new(FieldKind::Int).with(FieldTransform::BeforeParenthesis),
            VdField::NumberOfDrives => FieldSpec::new(FieldKind::Int),
            VdField::Name | VdField::Size | VdField::State | VdField::EncryptionType => {
                FieldSpec::new(FieldKind::String)
            }
        }
    }

    pub fn default_table() -> Vec<FieldKey<VdField>> {
        vec![
            FieldKey::prefix("Virtual Drive:", VdField::Id),
            FieldKey::prefix("Name", VdField::Name),
            FieldKey::prefix("Size", VdField::Size),
            FieldKey::prefix("State", VdField::State),
            FieldKey::prefix("Number Of Drives", VdField::NumberOfDrives),
            FieldKey::prefix("Encryption Type", VdField::EncryptionType),
        ]
    }
}

impl BlockVocabulary for VdField {
    fn default_block() -> BlockGrammar<Self> {
        BlockGrammar {
            sentinel: "Virtual Drive:".to_string(),
            marker: "Target Id".to_string(),
            fields: Self::default_table(),
        }
    }
}

#[derive(Debug, Default)]
struct VirtualDriveDraft {
    id: Option<u32>,
    name: Option<String>,
    size: Option<String>,
    state: Option<String>,
    number_of_drives: Option<u32>,
    encryption_type: Option<String>,
}

impl VirtualDriveDraft {
    fn apply(&mut self, field: VdField, value: FieldValue) -> Result<(), FieldError> {
        let name = field.name();
        match field {
            VdField::Id => self.id = Some(value.into_count(name)?),
            VdField::Name => self.name = Some(value.into_text(name)?),
            VdField::Size => self.size = Some(value.into_text(name)?),
            VdField::State => self.state = Some(value.into_text(name)?),
            VdField::NumberOfDrives => self.number_of_drives = Some(value.into_count(name)?),
            VdField::EncryptionType => self.encryption_type = Some(value.into_text(name)?),
        }
        Ok(())
    }

    fn finish(self) -> Result<VirtualDriveStat, FieldError> {
        Ok(VirtualDriveStat {
            virtual_drive: self.id.ok_or(FieldError::MissingField(VdField::Id.name()))?,
            name: self.name.unwrap_or_default(),
            size: self.size.ok_or(FieldError::MissingField(VdField::Size.name()))?,
            state: self.state.ok_or(FieldError::MissingField(VdField::State.name()))?,
            number_of_drives: self.number_of_drives.unwrap_or_default(),
            encryption_type: self.encryption_type.unwrap_or_default(),
            os_path: Default::default(),
        })
    }
}

/// Build one record from a segmented block.
pub fn parse_virtual_drive_block(
    block: &str,
    grammar: &CliGrammar,
) -> Result<VirtualDriveStat, FieldError> {
    let mut draft = VirtualDriveDraft::default();

    for line in block.lines() {
        let line = line.trim_start().trim_end_matches('\r');
        let Some(field) = lookup(&grammar.virtual_drive.fields, line) else {
            continue;
        };
        let value = parse_field(line, field.spec(), grammar)?;
        draft.apply(field, value)?;
    }

    draft.finish()
}

/// Parse a whole virtual drive listing; any bad block fails the listing.
pub fn parse_virtual_drives(
    text: &str,
    grammar: &CliGrammar,
) -> Result<Vec<VirtualDriveStat>, FieldError> {
    let blocks = segment_blocks(
        text,
        &grammar.virtual_drive.sentinel,
        &grammar.virtual_drive.marker,
    );
    debug!("Found {} virtual drive blocks", blocks.len());

    blocks
        .iter()
        .map(|block| parse_virtual_drive_block(block, grammar))
        .collect()
}
