// SPDX-License-Identifier: GPL-3.0-only

//! MegaCli subprocess wrapper.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};
use which::which;

use crate::error::{Result, SysError};

pub const DEFAULT_MEGACLI_PATH: &str = "/opt/MegaRAID/MegaCli/MegaCli64";

/// Names tried in PATH when the configured binary does not exist.
const FALLBACK_BINARIES: &[&str] = &["MegaCli64", "MegaCli", "megacli"];

/// Source of raw tool output for one query.
pub trait QueryRunner: Send + Sync {
    fn run(&self, args: &[String]) -> Result<String>;
}

impl<F> QueryRunner for F
where
    F: Fn(&[String]) -> Result<String> + Send + Sync,
{
    fn run(&self, args: &[String]) -> Result<String> {
        self(args)
    }
}

/// MegaCli CLI wrapper
#[derive(Debug, Clone)]
pub struct MegaCli {
    binary_path: PathBuf,
}

impl MegaCli {
    /// Locate the binary, preferring `configured` over a PATH lookup.
    pub fn new(configured: &Path) -> Result<Self> {
        let binary_path = Self::find_binary(configured)?;
        info!("Found MegaCli binary at {:?}", binary_path);
        Ok(Self { binary_path })
    }

    pub fn find_binary(configured: &Path) -> Result<PathBuf> {
        Self::find_binary_with(configured, |name| which(name).ok())
    }

    /// `find_binary` with the PATH lookup supplied by the caller.
    fn find_binary_with<L>(configured: &Path, lookup: L) -> Result<PathBuf>
    where
        L: Fn(&str) -> Option<PathBuf>,
    {
        if configured.is_file() {
            return Ok(configured.to_path_buf());
        }

        FALLBACK_BINARIES
            .iter()
            .find_map(|name| lookup(name))
            .ok_or_else(|| SysError::ToolNotFound(configured.display().to_string()))
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

impl QueryRunner for MegaCli {
    fn run(&self, args: &[String]) -> Result<String> {
        debug!("Running {} {}", self.binary_path.display(), args.join(" "));

        let output = Command::new(&self.binary_path).args(args).output()?;

        // The exit code line in stdout is authoritative; MegaCli uses the
        // process status for counts on some queries.
        if !output.status.success() {
            debug!("{} exited with {}", self.binary_path.display(), output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
