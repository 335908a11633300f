// SPDX-License-Identifier: GPL-3.0-only

mod logging;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use raid_sys::{CollectorConfig, DiskStatus};
use raid_types::ScanReport;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "megaraid-inventory")]
#[command(about = "Report MegaRAID virtual and physical drives with their OS device paths")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// MegaCli binary to run
    #[arg(long)]
    mega_path: Option<PathBuf>,

    /// Number of adapters to scan, starting at 0
    #[arg(long)]
    adapter_count: Option<u32>,

    #[arg(long)]
    by_path_dir: Option<PathBuf>,

    /// Scan adapters concurrently
    #[arg(long)]
    parallel: bool,

    #[arg(long)]
    json: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn collector_config(&self) -> Result<CollectorConfig> {
        let mut config = match &self.config {
            Some(path) => CollectorConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => CollectorConfig::default(),
        };

        if let Some(binary) = &self.mega_path {
            config.binary = binary.clone();
        }
        if let Some(count) = self.adapter_count {
            config.adapter_count = count;
        }
        if let Some(dir) = &self.by_path_dir {
            config.by_path_dir = dir.clone();
        }
        config.parallel |= self.parallel;

        Ok(config)
    }
}

/// Fails only when no adapter produced data.
fn check_report(report: &ScanReport) -> Result<()> {
    if report.all_failed() {
        bail!("no adapter could be read");
    }
    if !report.is_complete() {
        let failed: Vec<String> = report
            .failures
            .iter()
            .map(|failure| failure.adapter_id.to_string())
            .collect();
        warn!("Partial scan, failed adapters: {}", failed.join(", "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_dir.as_deref());

    let config = args.collector_config()?;
    let status = DiskStatus::new(&config).context("preparing MegaCli")?;
    info!("Scanning {} adapters", status.adapter_count());
    let report = status.collect()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }

    check_report(&report)
}
