// SPDX-License-Identifier: GPL-3.0-only

//! Virtual and physical drive records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OsPath;

/// Logical volume exported by a RAID adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDriveStat {
    /// Target id, unique within the adapter
    pub virtual_drive: u32,
    pub name: String,
    /// Human readable capacity, e.g. "1.089 TB"
    pub size: String,
    /// e.g. "Optimal", "Degraded"
    pub state: String,
    pub number_of_drives: u32,
    pub encryption_type: String,
    pub os_path: OsPath,
}

/// Disk attached to a RAID adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalDriveStat {
    /// 999 when the enclosure does not report an id
    pub enclosure_device_id: u32,
    pub device_id: u32,
    pub slot_number: u32,
    pub media_error_count: u32,
    pub other_error_count: u32,
    pub predictive_failure_count: u32,
    /// e.g. "Hard Disk Device", "Solid State Device"
    pub pd_media_type: String,
    /// e.g. "SAS", "SATA"
    pub pd_type: String,
    pub pd_disk_group: String,
    pub pd_arm: String,
    pub raw_size: String,
    /// e.g. "Online, Spun Up", "JBOD"
    pub firmware_state: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub drive_temperature: String,
    pub os_path: OsPath,
}

impl PhysicalDriveStat {
    /// Whether the drive belongs to a disk group (array member).
    pub fn in_disk_group(&self) -> bool {
        !self.pd_disk_group.is_empty() || !self.pd_arm.is_empty()
    }
}

macro_rules! json_rendering {
    ($ty:ty) => {
        impl $ty {
            pub fn to_json(&self) -> serde_json::Result<String> {
                serde_json::to_string(self)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match serde_json::to_string(self) {
                    Ok(json) => f.write_str(&json),
                    Err(e) => write!(f, "{e}"),
                }
            }
        }
    };
}

json_rendering!(VirtualDriveStat);
json_rendering!(PhysicalDriveStat);
json_rendering!(crate::AdapterStat);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_drive_json_uses_snake_case_names() {
        let vd = VirtualDriveStat {
            virtual_drive: 1,
            name: "data".to_string(),
            size: "1.089 TB".to_string(),
            state: "Optimal".to_string(),
            number_of_drives: 2,
            encryption_type: "None".to_string(),
            os_path: OsPath::Unresolved,
        };

        let value: serde_json::Value =
            serde_json::from_str(&vd.to_json().expect("json")).expect("parse");
        assert_eq!(value["virtual_drive"], 1);
        assert_eq!(value["number_of_drives"], 2);
        assert_eq!(value["encryption_type"], "None");
        assert_eq!(value["os_path"], "N/A");
    }

    #[test]
    fn display_matches_json() {
        let pd = PhysicalDriveStat {
            enclosure_device_id: 999,
            drive_temperature: "31C (87.80 F)".to_string(),
            ..Default::default()
        };

        let rendered = pd.to_string();
        assert_eq!(rendered, pd.to_json().expect("json"));
        assert!(rendered.contains("\"drive_temperature\":\"31C (87.80 F)\""));
        assert!(rendered.contains("\"enclosure_device_id\":999"));
    }

    #[test]
    fn disk_group_membership() {
        let mut pd = PhysicalDriveStat::default();
        assert!(!pd.in_disk_group());
        pd.pd_disk_group = "0".to_string();
        assert!(pd.in_disk_group());
    }
}
