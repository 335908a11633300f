// SPDX-License-Identifier: GPL-3.0-only

//! Scan of every configured adapter.

use raid_types::{AdapterFailure, AdapterStat, ScanReport};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::adapter::collect_adapter;
use crate::by_path::ByPathResolver;
use crate::config::CollectorConfig;
use crate::error::{Result, SysError};
use crate::megacli::CliGrammar;
use crate::runner::{MegaCli, QueryRunner};

/// Disk status of all adapters behind one MegaCli installation.
pub struct DiskStatus<R = MegaCli> {
    runner: R,
    adapter_count: u32,
    parallel: bool,
    grammar: CliGrammar,
    resolver: ByPathResolver,
}

impl DiskStatus<MegaCli> {
    /// Validate `config` and locate the MegaCli binary.
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        config.validate()?;
        let runner = MegaCli::new(&config.binary)?;
        Self::with_runner(runner, config)
    }
}

impl<R: QueryRunner> DiskStatus<R> {
    pub fn with_runner(runner: R, config: &CollectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            runner,
            adapter_count: config.adapter_count,
            parallel: config.parallel,
            grammar: config.grammar.clone(),
            resolver: ByPathResolver::new(&config.by_path_dir),
        })
    }

    pub fn adapter_count(&self) -> u32 {
        self.adapter_count
    }

    fn collect_one(&self, adapter_id: u32) -> Result<AdapterStat> {
        collect_adapter(&self.runner, adapter_id, &self.grammar, &self.resolver)
    }

    /// Collect every adapter. A failing adapter is reported in
    /// `ScanReport::failures` and does not stop the others.
    pub fn collect(&self) -> Result<ScanReport> {
        let parallel = self.parallel && self.adapter_count > 1;
        let outcomes: Vec<(u32, Result<AdapterStat>)> = if parallel {
            let threads = std::thread::available_parallelism()
                .map_or(4, usize::from)
                .min(self.adapter_count as usize);
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads.max(1))
                .build()
                .map_err(|error| SysError::ThreadPoolBuild(error.to_string()))?;

            pool.install(|| {
                (0..self.adapter_count)
                    .into_par_iter()
                    .map(|adapter_id| (adapter_id, self.collect_one(adapter_id)))
                    .collect()
            })
        } else {
            (0..self.adapter_count)
                .map(|adapter_id| (adapter_id, self.collect_one(adapter_id)))
                .collect()
        };

        let mut report = ScanReport::default();
        for (adapter_id, outcome) in outcomes {
            match outcome {
                Ok(adapter) => report.adapters.push(adapter),
                Err(e) => {
                    warn!("Adapter {adapter_id} collection failed: {e}");
                    report.failures.push(AdapterFailure {
                        adapter_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!("Collected {} of {} adapters", report.adapters.len(), self.adapter_count);
        Ok(report)
    }
}
