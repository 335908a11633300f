// SPDX-License-Identifier: GPL-3.0-only

//! `-PDList` listing → `PhysicalDriveStat` records.

use raid_types::PhysicalDriveStat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::FieldError;
use super::field::{FieldKind, FieldSpec, FieldTransform, FieldValue, parse_field};
use super::grammar::{BlockGrammar, BlockVocabulary, CliGrammar, FieldKey, lookup};
use super::inquiry::decompose_inquiry;
use super::segment::segment_blocks;

/// Fields of a physical drive block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdField {
    EnclosureDeviceId,
    DeviceId,
    SlotNumber,
    MediaErrorCount,
    OtherErrorCount,
    PredictiveFailureCount,
    MediaType,
    PdType,
    RawSize,
    FirmwareState,
    InquiryData,
    DiskGroup,
    DriveTemperature,
}

impl PdField {
    pub fn name(self) -> &'static str {
        match self {
            PdField::EnclosureDeviceId => "enclosure_device_id",
            PdField::DeviceId => "device_id",
            PdField::SlotNumber => "slot_number",
            PdField::MediaErrorCount => "media_error_count",
            PdField::OtherErrorCount => "other_error_count",
            PdField::PredictiveFailureCount => "predictive_failure_count",
            PdField::MediaType => "pd_media_type",
            PdField::PdType => "pd_type",
            PdField::RawSize => "raw_size",
            PdField::FirmwareState => "firmware_state",
            PdField::InquiryData => "inquiry_data",
            PdField::DiskGroup => "pd_disk_group",
            PdField::DriveTemperature => "drive_temperature",
        }
    }

    pub fn spec(self) -> FieldSpec {
        match self {
            PdField::EnclosureDeviceId
            | PdField::DeviceId
            | PdField::SlotNumber
            | PdField::MediaErrorCount
            | PdField::OtherErrorCount
            | PdField::PredictiveFailureCount => FieldSpec::new(FieldKind::Int),
            PdField::RawSize => {
                FieldSpec::new(FieldKind::String).with(FieldTransform::StripSectorCount)
            }
            PdField::MediaType
            | PdField::PdType
            | PdField::FirmwareState
            | PdField::InquiryData
            | PdField::DiskGroup
            | PdField::DriveTemperature => FieldSpec::new(FieldKind::String),
        }
    }

    pub fn default_table() -> Vec<FieldKey<PdField>> {
        vec![
            FieldKey::prefix("Enclosure Device ID", PdField::EnclosureDeviceId),
            FieldKey::prefix("Device Id", PdField::DeviceId),
            FieldKey::prefix("Slot Number", PdField::SlotNumber),
            FieldKey::prefix("Media Error Count", PdField::MediaErrorCount),
            FieldKey::prefix("Other Error Count", PdField::OtherErrorCount),
            FieldKey::prefix("Predictive Failure Count", PdField::PredictiveFailureCount),
            FieldKey::prefix("Media Type", PdField::MediaType),
            FieldKey::prefix("PD Type", PdField::PdType),
            FieldKey::prefix("Raw Size", PdField::RawSize),
            FieldKey::prefix("Firmware state", PdField::FirmwareState),
            FieldKey::prefix("Inquiry Data", PdField::InquiryData),
            FieldKey::contains("DiskGroup", PdField::DiskGroup),
            FieldKey::prefix("Drive Temperature", PdField::DriveTemperature),
        ]
    }
}

impl BlockVocabulary for PdField {
    fn default_block() -> BlockGrammar<Self> {
        BlockGrammar {
            sentinel: "Enclosure Device ID:".to_string(),
            marker: "Slot Number".to_string(),
            fields: Self::default_table(),
        }
    }
}

/// Whether the drive is passed through to the OS instead of backing an array.
pub fn is_jbod(pd: &PhysicalDriveStat, grammar: &CliGrammar) -> bool {
    pd.firmware_state.trim() == grammar.jbod_state
}

/// Value after `label:` in a composite line, up to the next comma.
fn labelled_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(label)?;
    let rest = rest.trim_start().strip_prefix(':')?.trim_start();
    let end = rest
        .find(|c: char| c == ',' || c.is_whitespace())
        .unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

#[derive(Debug, Default)]
struct PhysicalDriveDraft {
    enclosure_device_id: Option<u32>,
    device_id: Option<u32>,
    slot_number: Option<u32>,
    firmware_state: Option<String>,
    stat: PhysicalDriveStat,
}

impl PhysicalDriveDraft {
    fn apply(
        &mut self,
        field: PdField,
        value: FieldValue,
        line: &str,
        grammar: &CliGrammar,
    ) -> Result<(), FieldError> {
        let name = field.name();
        let stat = &mut self.stat;
        match field {
            PdField::EnclosureDeviceId => self.enclosure_device_id = Some(value.into_count(name)?),
            PdField::DeviceId => self.device_id = Some(value.into_count(name)?),
            PdField::SlotNumber => self.slot_number = Some(value.into_count(name)?),
            PdField::MediaErrorCount => stat.media_error_count = value.into_count(name)?,
            PdField::OtherErrorCount => stat.other_error_count = value.into_count(name)?,
            PdField::PredictiveFailureCount => {
                stat.predictive_failure_count = value.into_count(name)?
            }
            PdField::MediaType => stat.pd_media_type = value.into_text(name)?,
            PdField::PdType => stat.pd_type = value.into_text(name)?,
            PdField::RawSize => stat.raw_size = value.into_text(name)?,
            PdField::FirmwareState => self.firmware_state = Some(value.into_text(name)?),
            PdField::InquiryData => {
                let identity = decompose_inquiry(&value.into_text(name)?);
                stat.brand = identity.brand;
                stat.model = identity.model;
                stat.serial_number = identity.serial;
            }
            PdField::DiskGroup => {
                // DiskGroup: g, Span: s, Arm: a -- the span is not kept.
                let group = labelled_value(line, &grammar.disk_group_label)
                    .ok_or_else(|| FieldError::Malformed(line.to_string()))?;
                let arm = labelled_value(line, &grammar.arm_label)
                    .ok_or_else(|| FieldError::Malformed(line.to_string()))?;
                stat.pd_disk_group = group.to_string();
                stat.pd_arm = arm.to_string();
            }
            PdField::DriveTemperature => stat.drive_temperature = value.into_text(name)?,
        }
        Ok(())
    }

    fn finish(self) -> Result<PhysicalDriveStat, FieldError> {
        let missing = |field: PdField| FieldError::MissingField(field.name());
        Ok(PhysicalDriveStat {
            enclosure_device_id: self
                .enclosure_device_id
                .ok_or_else(|| missing(PdField::EnclosureDeviceId))?,
            device_id: self.device_id.ok_or_else(|| missing(PdField::DeviceId))?,
            slot_number: self.slot_number.ok_or_else(|| missing(PdField::SlotNumber))?,
            firmware_state: self
                .firmware_state
                .ok_or_else(|| missing(PdField::FirmwareState))?,
            ..self.stat
        })
    }
}

/// Build one record from a segmented block.
pub fn parse_physical_drive_block(
    block: &str,
    grammar: &CliGrammar,
) -> Result<PhysicalDriveStat, FieldError> {
    let mut draft = PhysicalDriveDraft::default();

    for line in block.lines() {
        let line = line.trim_start().trim_end_matches('\r');
        let Some(field) = lookup(&grammar.physical_drive.fields, line) else {
            continue;
        };
        let value = parse_field(line, field.spec(), grammar)?;
        draft.apply(field, value, line, grammar)?;
    }

    draft.finish()
}

/// Parse a whole physical drive listing; any bad block fails the listing.
pub fn parse_physical_drives(
    text: &str,
    grammar: &CliGrammar,
) -> Result<Vec<PhysicalDriveStat>, FieldError> {
    let blocks = segment_blocks(
        text,
        &grammar.physical_drive.sentinel,
        &grammar.physical_drive.marker,
    );
    debug!("Found {} physical drive blocks", blocks.len());

    blocks
        .iter()
        .map(|block| parse_physical_drive_block(block, grammar))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDLIST: &str = "\nAdapter #0\n\n\
Enclosure Device ID: 32\n\
Slot Number: 0\n\
Drive's position: DiskGroup: 0, Span: 0, Arm: 1\n\
Enclosure position: 1\n\
Device Id: 8\n\
WWN: 5000C500A1B2C3D4\n\
Sequence Number: 2\n\
Media Error Count: 0\n\
Other Error Count: 3\n\
Predictive Failure Count: 0\n\
Last Predictive Failure Event Seq Number: 0\n\
PD Type: SAS\n\n\
Raw Size: 558.911 GB [0x45dd2fb0 Sectors]\n\
Non Coerced Size: 558.411 GB [0x45cd2fb0 Sectors]\n\
Coerced Size: 558.375 GB [0x45cc0000 Sectors]\n\
Firmware state: Online, Spun Up\n\
Device Firmware Level: 0003\n\
Inquiry Data: SEAGATE ST600MM0006     0003S0M1XLWK\n\
Device Speed: 6.0Gb/s\n\
Media Type: Hard Disk Device\n\
Drive Temperature :31C (87.80 F)\n\
\n\n\
Enclosure Device ID: N/A\n\
Slot Number: 5\n\
Device Id: 12\n\
Media Error Count: 0\n\
Other Error Count: 0\n\
Predictive Failure Count: 0\n\
PD Type: SATA\n\
Raw Size: 4.000 TB [0x1d1c0beb0 Sectors]\n\
Firmware state: JBOD\n\
Inquiry Data: Z1X0ABCDST4000NM0033-9ZM170 SN03\n\
Media Type: Hard Disk Device\n\
Drive Temperature :29C (84.20 F)\n";

    #[test]
    fn parses_array_member_and_jbod() {
        let grammar = CliGrammar::default();
        let pds = parse_physical_drives(PDLIST, &grammar).expect("listing parses");
        assert_eq!(pds.len(), 2);

        let member = &pds[0];
        assert_eq!(member.enclosure_device_id, 32);
        assert_eq!(member.slot_number, 0);
        assert_eq!(member.device_id, 8);
        assert_eq!(member.other_error_count, 3);
        assert_eq!(member.pd_type, "SAS");
        assert_eq!(member.raw_size, "558.911 GB");
        assert_eq!(member.firmware_state, "Online, Spun Up");
        assert_eq!(member.pd_disk_group, "0");
        assert_eq!(member.pd_arm, "1");
        assert_eq!(member.brand, "SEAGATE");
        assert_eq!(member.serial_number, "0003S0M1XLWK");
        assert_eq!(member.pd_media_type, "Hard Disk Device");
        assert_eq!(member.drive_temperature, "31C (87.80 F)");
        assert!(!is_jbod(member, &grammar));

        let jbod = &pds[1];
        assert_eq!(jbod.enclosure_device_id, 999);
        assert_eq!(jbod.raw_size, "4.000 TB");
        assert_eq!(jbod.serial_number, "ST4000NM0033-9ZM170");
        assert!(jbod.pd_disk_group.is_empty());
        assert!(is_jbod(jbod, &grammar));
    }

    #[test]
    fn composite_disk_group_keeps_group_and_arm() {
        let block = "Enclosure Device ID: 32\nSlot Number: 4\nDevice Id: 9\n\
Disk's DiskGroup: 2, Span: 0, Arm: 3\nFirmware state: Online, Spun Up\n";
        let pd = parse_physical_drive_block(block, &CliGrammar::default()).expect("block parses");

        assert_eq!(pd.pd_disk_group, "2");
        assert_eq!(pd.pd_arm, "3");
    }

    #[test]
    fn composite_without_arm_is_malformed() {
        let block = "Enclosure Device ID: 32\nSlot Number: 4\nDevice Id: 9\n\
Drive's position: DiskGroup: 2, Span: 0\nFirmware state: Online, Spun Up\n";
        let err = parse_physical_drive_block(block, &CliGrammar::default()).unwrap_err();
        assert!(matches!(err, FieldError::Malformed(_)));
    }

    #[test]
    fn bad_slot_number_fails_the_listing() {
        let text = PDLIST.replace("Slot Number: 5", "Slot Number: five");
        assert!(parse_physical_drives(&text, &CliGrammar::default()).is_err());
    }

    #[test]
    fn inquiry_with_one_token_does_not_fail() {
        let block = "Enclosure Device ID: 32\nSlot Number: 1\nDevice Id: 10\n\
Firmware state: Unconfigured(good), Spun Up\nInquiry Data: MYSTERY\n";
        let pd = parse_physical_drive_block(block, &CliGrammar::default()).expect("block parses");
        assert_eq!(pd.serial_number, "unknown");
    }

    #[test]
    fn labelled_value_stops_at_comma() {
        let line = "Drive's position: DiskGroup: 12, Span: 1, Arm: 0";
        assert_eq!(labelled_value(line, "DiskGroup"), Some("12"));
        assert_eq!(labelled_value(line, "Span"), Some("1"));
        assert_eq!(labelled_value(line, "Arm"), Some("0"));
        assert_eq!(labelled_value(line, "Row"), None);
    }
}
