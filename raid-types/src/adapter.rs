// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::{PhysicalDriveStat, VirtualDriveStat};

/// Everything collected from one RAID adapter in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterStat {
    pub adapter_id: u32,
    pub virtual_drive_stats: Vec<VirtualDriveStat>,
    pub physical_drive_stats: Vec<PhysicalDriveStat>,
}

impl AdapterStat {
    pub fn resolved_paths(&self) -> usize {
        let vds = self
            .virtual_drive_stats
            .iter()
            .filter(|vd| vd.os_path.is_resolved())
            .count();
        let pds = self
            .physical_drive_stats
            .iter()
            .filter(|pd| pd.os_path.is_resolved())
            .count();
        vds + pds
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::OsPath;

    #[test]
    fn counts_resolved_paths_across_kinds() {
        let mut adapter = AdapterStat::default();
        adapter.virtual_drive_stats.push(VirtualDriveStat {
            os_path: OsPath::Resolved(PathBuf::from("/dev/sda")),
            ..Default::default()
        });
        adapter.virtual_drive_stats.push(VirtualDriveStat::default());
        adapter.physical_drive_stats.push(PhysicalDriveStat {
            os_path: OsPath::Resolved(PathBuf::from("/dev/sdc")),
            ..Default::default()
        });

        assert_eq!(adapter.resolved_paths(), 2);
    }

    #[test]
    fn adapter_json_shape() {
        let adapter = AdapterStat {
            adapter_id: 3,
            ..Default::default()
        };
        let json = adapter.to_json().expect("json");
        assert_eq!(
            json,
            r#"{"adapter_id":3,"virtual_drive_stats":[],"physical_drive_stats":[]}"#
        );
    }
}
