// SPDX-License-Identifier: GPL-3.0-only

//! MegaRAID inventory collection
//!
//! This crate turns MegaCli text output into `raid-types` records:
//! - `megacli`: field parser, block segmenter, drive record builders and
//!   the PCI address extractor, all driven by an injectable `CliGrammar`
//! - `by_path`: block device lookup through `/dev/disk/by-path`
//! - `adapter`: the per-adapter query pipeline
//! - `status`: scanning every adapter, sequentially or on a thread pool
//!
//! Running MegaCli usually requires root privileges.

pub mod adapter;
pub mod by_path;
pub mod config;
pub mod error;
pub mod megacli;
pub mod runner;
pub mod status;

pub use adapter::{Query, check_exit_code, collect_adapter};
pub use by_path::{ByPathResolver, DEFAULT_BY_PATH_DIR};
pub use config::CollectorConfig;
pub use error::{Result, SysError};
pub use runner::{DEFAULT_MEGACLI_PATH, MegaCli, QueryRunner};
pub use status::DiskStatus;
