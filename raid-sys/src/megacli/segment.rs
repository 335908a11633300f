// SPDX-License-Identifier: GPL-3.0-only

/// Split `text` into records opened by `sentinel`.
///
/// Only fragments containing `marker` are kept, which drops the preamble the
/// tool prints before the first record. The sentinel is consumed by the split
/// and put back in front of each kept fragment.
pub fn segment_blocks(text: &str, sentinel: &str, marker: &str) -> Vec<String> {
    if sentinel.is_empty() {
        return Vec::new();
    }

    text.split(sentinel)
        .filter(|fragment| fragment.contains(marker))
        .map(|fragment| format!("{sentinel}{fragment}"))
        .collect()
}
