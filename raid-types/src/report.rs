// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::AdapterStat;

/// Adapter whose collection failed, with the rendered error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterFailure {
    pub adapter_id: u32,
    pub error: String,
}

/// Result of scanning every configured adapter.
///
/// A failing adapter never hides the others: it is listed in `failures`
/// and the remaining adapters are still reported in `adapters`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub adapters: Vec<AdapterStat>,
    pub failures: Vec<AdapterFailure>,
}

impl ScanReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when adapters were requested and none of them produced data.
    pub fn all_failed(&self) -> bool {
        self.adapters.is_empty() && !self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_report_is_not_all_failed() {
        let report = ScanReport {
            adapters: vec![AdapterStat::default()],
            failures: vec![AdapterFailure {
                adapter_id: 1,
                error: "MegaCli returned 0x01".to_string(),
            }],
        };

        assert!(!report.is_complete());
        assert!(!report.all_failed());
    }

    #[test]
    fn empty_report_is_complete() {
        let report = ScanReport::default();
        assert!(report.is_complete());
        assert!(!report.all_failed());
    }
}
