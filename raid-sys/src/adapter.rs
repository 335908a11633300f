// SPDX-License-Identifier: GPL-3.0-only

//! Collection of one adapter: three MegaCli queries, parsed and resolved.

use raid_types::AdapterStat;
use tracing::{debug, warn};

use crate::by_path::ByPathResolver;
use crate::error::{Result, SysError};
use crate::megacli::{
    CliGrammar, PciAddress, extract_pci_address, is_jbod, parse_physical_drives,
    parse_virtual_drives,
};
use crate::runner::QueryRunner;

/// The MegaCli queries issued per adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    VirtualDrives,
    PhysicalDrives,
    PciInfo,
}

impl Query {
    pub fn name(self) -> &'static str {
        match self {
            Query::VirtualDrives => "LDInfo",
            Query::PhysicalDrives => "PDList",
            Query::PciInfo => "AdpGetPciInfo",
        }
    }

    pub fn args(self, adapter_id: u32) -> Vec<String> {
        let adapter = format!("-a{adapter_id}");
        let args = match self {
            Query::VirtualDrives => vec!["-LDInfo", "-Lall", adapter.as_str(), "-NoLog"],
            Query::PhysicalDrives => vec!["-PDList", adapter.as_str(), "-NoLog"],
            Query::PciInfo => vec!["-AdpGetPciInfo", adapter.as_str(), "-NoLog"],
        };
        args.into_iter().map(str::to_string).collect()
    }
}

/// Split a response on its exit code and return the listing before it.
///
/// A response without the exit token is malformed; any code other than the
/// success code means the whole response is discarded.
pub fn check_exit_code<'a>(
    output: &'a str,
    query: Query,
    grammar: &CliGrammar,
) -> Result<&'a str> {
    let (listing, code) = output
        .split_once(grammar.exit_token.as_str())
        .ok_or(SysError::MalformedOutput {
            query: query.name(),
        })?;

    let code = code.trim();
    if code != grammar.success_code {
        return Err(SysError::ExternalToolFailure {
            query: query.name(),
            code: code.to_string(),
        });
    }

    Ok(listing)
}

fn run_query<R>(runner: &R, query: Query, adapter_id: u32, grammar: &CliGrammar) -> Result<String>
where
    R: QueryRunner + ?Sized,
{
    let output = runner.run(&query.args(adapter_id))?;
    check_exit_code(&output, query, grammar).map(str::to_string)
}

/// PCI address of the adapter; any failure only costs the device paths.
fn adapter_pci_address<R>(runner: &R, adapter_id: u32, grammar: &CliGrammar) -> Option<PciAddress>
where
    R: QueryRunner + ?Sized,
{
    match run_query(runner, Query::PciInfo, adapter_id, grammar) {
        Ok(listing) => {
            let addr = extract_pci_address(&listing, &grammar.pci);
            if addr.is_none() {
                warn!("Adapter {adapter_id}: PCI info has no bus number, device paths unknown");
            }
            addr
        }
        Err(e) => {
            warn!("Adapter {adapter_id}: PCI info unavailable, device paths unknown: {e}");
            None
        }
    }
}

/// Collect virtual and physical drives of adapter `adapter_id`.
///
/// A failed or unparsable drive listing fails the adapter. OS paths are
/// filled in before the record is returned; physical drives are only looked up
/// when they are passed through as JBOD.
pub fn collect_adapter<R>(
    runner: &R,
    adapter_id: u32,
    grammar: &CliGrammar,
    resolver: &ByPathResolver,
) -> Result<AdapterStat>
where
    R: QueryRunner + ?Sized,
{
    let vd_listing = run_query(runner, Query::VirtualDrives, adapter_id, grammar)?;
    let mut virtual_drives =
        parse_virtual_drives(&vd_listing, grammar).map_err(|source| SysError::Field {
            query: Query::VirtualDrives.name(),
            source,
        })?;

    let pd_listing = run_query(runner, Query::PhysicalDrives, adapter_id, grammar)?;
    let mut physical_drives =
        parse_physical_drives(&pd_listing, grammar).map_err(|source| SysError::Field {
            query: Query::PhysicalDrives.name(),
            source,
        })?;

    let addr = adapter_pci_address(runner, adapter_id, grammar);
    if let Some(addr) = &addr {
        debug!("Adapter {adapter_id} is at PCI {addr}");
    }

    for vd in &mut virtual_drives {
        vd.os_path = resolver.resolve_virtual(addr.as_ref(), vd.virtual_drive);
    }
    for pd in physical_drives.iter_mut().filter(|pd| is_jbod(pd, grammar)) {
        pd.os_path = resolver.resolve_physical(addr.as_ref(), pd.device_id);
    }

    debug!(
        "Adapter {adapter_id}: {} virtual drives, {} physical drives",
        virtual_drives.len(),
        physical_drives.len()
    );

    Ok(AdapterStat {
        adapter_id,
        virtual_drive_stats: virtual_drives,
        physical_drive_stats: physical_drives,
    })
}
