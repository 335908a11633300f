// SPDX-License-Identifier: GPL-3.0-only

//! Canonical inventory models for MegaRAID adapters
//!
//! These types are produced by `raid-sys` and rendered by the collector:
//!
//! - `AdapterStat` → one controller and everything found behind it
//! - `VirtualDriveStat` → a logical volume exported by the controller
//! - `PhysicalDriveStat` → a disk attached to the controller
//! - `ScanReport` → the outcome of scanning every configured adapter
//!
//! All of them serialize to JSON with snake_case attribute names.

pub mod adapter;
pub mod drive;
pub mod os_path;
pub mod report;

pub use adapter::AdapterStat;
pub use drive::{PhysicalDriveStat, VirtualDriveStat};
pub use os_path::{OS_PATH_UNRESOLVED, OsPath};
pub use report::{AdapterFailure, ScanReport};

/// Enclosure id reported when the hardware prints `N/A` for a numeric field.
pub const UNREPORTED_NUMBER: u32 = 999;
