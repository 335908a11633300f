// SPDX-License-Identifier: GPL-3.0-only

//! Parsers for MegaCli text output.

pub mod error;
pub mod field;
pub mod grammar;
pub mod inquiry;
pub mod pci;
pub mod physical_drive;
pub mod segment;
pub mod virtual_drive;

pub use error::FieldError;
pub use field::{FieldKind, FieldSpec, FieldTransform, FieldValue, parse_field};
pub use grammar::{BlockGrammar, BlockVocabulary, CliGrammar, FieldKey, KeyMatch, PciGrammar};
pub use inquiry::{DriveIdentity, decompose_inquiry};
pub use pci::{PciAddress, extract_pci_address};
pub use physical_drive::{PdField, is_jbod, parse_physical_drives};
pub use segment::segment_blocks;
pub use virtual_drive::{VdField, parse_virtual_drives};
