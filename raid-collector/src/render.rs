// SPDX-License-Identifier: GPL-3.0-only

//! Plain-text rendering of a scan report.

use std::fmt::Write;

use raid_types::{AdapterStat, PhysicalDriveStat, ScanReport};

/// "Hard Disk Device" → "HDD", "Solid State Device" → "SSD"
fn uppercase_letters(input: &str) -> String {
    input.chars().filter(|c| c.is_uppercase()).collect()
}

fn disk_group(pd: &PhysicalDriveStat) -> String {
    if pd.in_disk_group() {
        format!("{}-{}", pd.pd_disk_group, pd.pd_arm)
    } else {
        "null".to_string()
    }
}

fn render_adapter(out: &mut String, adapter: &AdapterStat) {
    let _ = writeln!(
        out,
        "Adapter {} ({} device paths resolved)",
        adapter.adapter_id,
        adapter.resolved_paths()
    );

    for vd in &adapter.virtual_drive_stats {
        let _ = writeln!(
            out,
            "VD-{}: status: {}, size: {}, NumberOfDrives:{}, OsPath: {}",
            vd.virtual_drive, vd.state, vd.size, vd.number_of_drives, vd.os_path
        );
    }
    out.push('\n');

    for (num, pd) in adapter.physical_drive_stats.iter().enumerate() {
        let name = [pd.brand.as_str(), pd.model.as_str(), pd.serial_number.as_str()].join(" ");
        let _ = writeln!(
            out,
            "PD-{}: {}, Size: {}, status: {}, PdType: {} {}, DiskGroup: {}, OsPath: {}",
            num,
            name,
            pd.raw_size,
            pd.firmware_state,
            pd.pd_type,
            uppercase_letters(&pd.pd_media_type),
            disk_group(pd),
            pd.os_path
        );
    }
    out.push('\n');
}

pub(crate) fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();

    for adapter in &report.adapters {
        render_adapter(&mut out, adapter);
    }

    for failure in &report.failures {
        let _ = writeln!(out, "Adapter {}: {}", failure.adapter_id, failure.error);
    }

    out
}
