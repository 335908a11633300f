// SPDX-License-Identifier: GPL-3.0-only

//! PCI address of an adapter from `-AdpGetPciInfo` output.

use std::fmt;

use regex::Regex;
use tracing::debug;

use super::grammar::PciGrammar;

/// `domain:bus:device.function`, as used in `/dev/disk/by-path` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciAddress {
    pub domain: String,
    pub bus: String,
    pub device: String,
    pub function: String,
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}.{}", self.domain, self.bus, self.device, self.function)
    }
}

fn label_pattern(label: &str) -> Option<Regex> {
    Regex::new(&format!(r"^{}[^:]*:\s*(\S+)", regex::escape(label))).ok()
}

fn pad(value: &str, width: usize) -> String {
    format!("{:0>width$}", value.to_ascii_lowercase())
}

/// Find the bus, device and function lines in any order.
///
/// Returns `None` when no bus line is present; callers treat that as an
/// unknown address. Missing device or function lines are padded as zero.
pub fn extract_pci_address(text: &str, grammar: &PciGrammar) -> Option<PciAddress> {
    let bus_re = label_pattern(&grammar.bus_label)?;
    let device_re = label_pattern(&grammar.device_label)?;
    let function_re = label_pattern(&grammar.function_label)?;

    let mut bus = None;
    let mut device = None;
    let mut function = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = bus_re.captures(line) {
            bus = Some(pad(&caps[1], 2));
        }
        if let Some(caps) = device_re.captures(line) {
            device = Some(pad(&caps[1], 2));
        }
        if let Some(caps) = function_re.captures(line) {
            function = Some(pad(&caps[1], 1));
        }
    }

    let Some(bus) = bus else {
        debug!("No bus number in PCI info");
        return None;
    };

    Some(PciAddress {
        domain: grammar.domain.clone(),
        bus,
        device: device.unwrap_or_else(|| pad("", 2)),
        function: function.unwrap_or_else(|| pad("", 1)),
    })
}
