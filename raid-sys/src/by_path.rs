// SPDX-License-Identifier: GPL-3.0-only

//! Map adapter drives to kernel block devices through `/dev/disk/by-path`.
//!
//! MegaCli never reports the block device of a drive. The by-path links name
//! devices by topology (`pci-<addr>-scsi-0:<channel>:<target>:<lun>`), so the
//! resolver composes the candidates a drive could appear under and follows
//! the first one that exists. A miss is a normal outcome, never an error.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use raid_types::OsPath;
use tracing::trace;

use crate::megacli::PciAddress;

pub const DEFAULT_BY_PATH_DIR: &str = "/dev/disk/by-path";

/// SCSI channels a virtual drive may be exported on.
const VIRTUAL_DRIVE_CHANNELS: RangeInclusive<u32> = 1..=7;

/// Pass-through disks are exported on channel 0.
const JBOD_CHANNEL: u32 = 0;

#[derive(Debug, Clone)]
pub struct ByPathResolver {
    root: PathBuf,
}

impl Default for ByPathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BY_PATH_DIR)
    }
}

impl ByPathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidate(&self, addr: &PciAddress, channel: u32, target: u32) -> PathBuf {
        self.root.join(format!("pci-{addr}-scsi-0:{channel}:{target}:0"))
    }

    /// Follow `link` to its canonical target; broken links count as missing.
    fn follow_link(link: &Path) -> Option<PathBuf> {
        if !link.exists() {
            trace!("No by-path entry {}", link.display());
            return None;
        }
        match fs::canonicalize(link) {
            Ok(target) => {
                trace!("{} -> {}", link.display(), target.display());
                Some(target)
            }
            Err(e) => {
                trace!("Failed to resolve {}: {}", link.display(), e);
                None
            }
        }
    }

    /// Block device of virtual drive `vd_id`, trying every RAID channel.
    pub fn resolve_virtual(&self, addr: Option<&PciAddress>, vd_id: u32) -> OsPath {
        let Some(addr) = addr else {
            return OsPath::Unresolved;
        };

        VIRTUAL_DRIVE_CHANNELS
            .map(|channel| self.candidate(addr, channel, vd_id))
            .find_map(|link| Self::follow_link(&link))
            .map_or(OsPath::Unresolved, OsPath::Resolved)
    }

    /// Block device of a JBOD disk exported as target `device_id`.
    pub fn resolve_physical(&self, addr: Option<&PciAddress>, device_id: u32) -> OsPath {
        let Some(addr) = addr else {
            return OsPath::Unresolved;
        };

        Self::follow_link(&self.candidate(addr, JBOD_CHANNEL, device_id))
            .map_or(OsPath::Unresolved, OsPath::Resolved)
    }
}
