// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use raid_sys::megacli::CliGrammar;
use raid_sys::{ByPathResolver, CollectorConfig, DiskStatus, Result, SysError, collect_adapter};
use raid_types::{OsPath, ScanReport};

const LDINFO: &str = include_str!("fixtures/ldinfo.txt");
const PDLIST: &str = include_str!("fixtures/pdlist.txt");
const PCIINFO: &str = include_str!("fixtures/pciinfo.txt");

fn megacli(args: &[String]) -> Result<String> {
    let output = match args.first().map(String::as_str) {
        Some("-LDInfo") => LDINFO,
        Some("-PDList") => PDLIST,
        Some("-AdpGetPciInfo") => PCIINFO,
        _ => "Exit Code: 0x01\n",
    };
    Ok(output.to_string())
}

struct DevTree {
    by_path: tempfile::TempDir,
    dev: tempfile::TempDir,
}

impl DevTree {
    fn new() -> Self {
        Self {
            by_path: tempfile::tempdir().expect("by-path dir"),
            dev: tempfile::tempdir().expect("dev dir"),
        }
    }

    fn link(&self, name: &str, device: &str) -> PathBuf {
        let target = self.dev.path().join(device);
        fs::write(&target, b"").expect("fake device");
        symlink(&target, self.by_path.path().join(name)).expect("symlink");
        fs::canonicalize(&target).expect("canonical device")
    }

    fn root(&self) -> &Path {
        self.by_path.path()
    }
}

#[test]
fn collects_drives_and_resolves_paths() {
    let tree = DevTree::new();
    let system = tree.link("pci-0000:03:00.0-scsi-0:2:0:0", "sda");
    let jbod = tree.link("pci-0000:03:00.0-scsi-0:0:12:0", "sdc");
    // Array members are never looked up even if a matching link exists.
    tree.link("pci-0000:03:00.0-scsi-0:0:8:0", "sdz");

    let resolver = ByPathResolver::new(tree.root());
    let adapter =
        collect_adapter(&megacli, 0, &CliGrammar::default(), &resolver).expect("adapter collects");

    assert_eq!(adapter.adapter_id, 0);

    let vds = &adapter.virtual_drive_stats;
    assert_eq!(vds.len(), 2);
    assert_eq!(vds[0].name, "system");
    assert_eq!(vds[0].size, "557.861 GB");
    assert_eq!(vds[0].os_path, OsPath::Resolved(system));
    assert_eq!(vds[1].name, "data");
    assert_eq!(vds[1].state, "Degraded");
    assert_eq!(vds[1].number_of_drives, 3);
    assert_eq!(vds[1].os_path, OsPath::Unresolved);

    let pds = &adapter.physical_drive_stats;
    assert_eq!(pds.len(), 3);
    assert_eq!(pds[0].device_id, 8);
    assert_eq!(pds[0].pd_disk_group, "0");
    assert_eq!(pds[0].pd_arm, "0");
    assert_eq!(pds[0].os_path, OsPath::Unresolved);
    assert_eq!(pds[1].media_error_count, 2);
    assert_eq!(pds[1].serial_number, "0003S0M1XMQT");
    assert_eq!(pds[2].enclosure_device_id, 999);
    assert_eq!(pds[2].firmware_state, "JBOD");
    assert_eq!(pds[2].raw_size, "3.638 TB");
    assert_eq!(pds[2].brand, "Z1X0ABCD");
    assert_eq!(pds[2].os_path, OsPath::Resolved(jbod));
}

#[test]
fn pci_failure_only_loses_device_paths() {
    let tree = DevTree::new();
    tree.link("pci-0000:03:00.0-scsi-0:2:0:0", "sda");

    let runner = |args: &[String]| -> Result<String> {
        if args.first().map(String::as_str) == Some("-AdpGetPciInfo") {
            return Ok("Exit Code: 0x01\n".to_string());
        }
        megacli(args)
    };

    let resolver = ByPathResolver::new(tree.root());
    let adapter =
        collect_adapter(&runner, 0, &CliGrammar::default(), &resolver).expect("adapter collects");

    assert_eq!(adapter.virtual_drive_stats.len(), 2);
    assert_eq!(adapter.resolved_paths(), 0);
}

#[test]
fn unparsable_listing_fails_the_adapter() {
    let runner = |args: &[String]| -> Result<String> {
        if args.first().map(String::as_str) == Some("-PDList") {
            return Ok(PDLIST.replace("Device Id: 9", "Device Id: nine"));
        }
        megacli(args)
    };

    let err = collect_adapter(
        &runner,
        0,
        &CliGrammar::default(),
        &ByPathResolver::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SysError::Field { query: "PDList", .. }));
}

#[test]
fn runner_errors_propagate() {
    let runner = |_: &[String]| -> Result<String> {
        Err(SysError::Io(std::io::Error::other("spawn failed")))
    };

    let err = collect_adapter(
        &runner,
        0,
        &CliGrammar::default(),
        &ByPathResolver::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SysError::Io(_)));
}

#[test]
fn scan_report_serializes_with_failures() {
    let tree = DevTree::new();
    let runner = |args: &[String]| -> Result<String> {
        if args.iter().any(|arg| arg == "-a1") {
            return Ok("Exit Code: 0x04\n".to_string());
        }
        megacli(args)
    };

    let config = CollectorConfig {
        adapter_count: 2,
        by_path_dir: tree.root().to_path_buf(),
        ..Default::default()
    };
    let report = DiskStatus::with_runner(runner, &config)
        .expect("status")
        .collect()
        .expect("report");

    let json = serde_json::to_string(&report).expect("json");
    let back: ScanReport = serde_json::from_str(&json).expect("round trip");
    assert_eq!(back, report);
    assert_eq!(back.adapters.len(), 1);
    assert_eq!(back.failures[0].adapter_id, 1);
    assert!(json.contains("\"os_path\":\"N/A\""));
}
