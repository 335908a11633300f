// SPDX-License-Identifier: GPL-3.0-only

//! Best-effort split of the free-text `Inquiry Data` field.
//!
//! The inquiry string is whatever the drive firmware reports. Seagate drives
//! prefix it with an 8-character id glued to the model family; everything
//! else is split positionally. The positional split is tuned to one vendor's
//! layout and can mis-attribute fields for others.

use std::sync::LazyLock;

use regex::Regex;

const UNKNOWN: &str = "unknown";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static SEAGATE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w{8})(ST\w+)(?:-(\w{6}))?(?:\s+(\w+))").expect("seagate pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveIdentity {
    pub brand: String,
    pub model: String,
    pub serial: String,
}

/// Split an inquiry string into brand, model and serial. Never fails.
pub fn decompose_inquiry(raw: &str) -> DriveIdentity {
    let normalized = WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned();

    if let Some(caps) = SEAGATE_ID.captures(&normalized) {
        let family = &caps[2];
        let serial = match caps.get(3) {
            Some(suffix) => format!("{family}-{}", suffix.as_str()),
            None => family.to_string(),
        };
        return DriveIdentity {
            brand: caps[1].to_string(),
            model: normalized.clone(),
            serial,
        };
    }

    let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
    match tokens.as_slice() {
        [] => DriveIdentity {
            brand: UNKNOWN.to_string(),
            model: String::new(),
            serial: UNKNOWN.to_string(),
        },
        [only] => DriveIdentity {
            brand: (*only).to_string(),
            model: String::new(),
            serial: UNKNOWN.to_string(),
        },
        [first, middle @ .., last] => DriveIdentity {
            brand: (*first).to_string(),
            model: middle.join(" "),
            serial: (*last).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seagate_id_with_suffix() {
        let id = decompose_inquiry("Z1X0ABCDST4000NM0033-9ZM170   SN03");

        assert_eq!(id.brand, "Z1X0ABCD");
        assert_eq!(id.serial, "ST4000NM0033-9ZM170");
        assert_eq!(id.model, "Z1X0ABCDST4000NM0033-9ZM170 SN03");
    }

    #[test]
    fn seagate_id_without_suffix() {
        let id = decompose_inquiry("  W4619QXNST2000NM0055      SN04 ");

        assert_eq!(id.brand, "W4619QXN");
        assert_eq!(id.serial, "ST2000NM0055");
        assert_eq!(id.model, "W4619QXNST2000NM0055 SN04");
    }

    #[test]
    fn positional_split_for_other_vendors() {
        let id = decompose_inquiry("SEAGATE ST600MM0006     0003S0M1XLWK");

        assert_eq!(id.brand, "SEAGATE");
        assert_eq!(id.model, "ST600MM0006");
        assert_eq!(id.serial, "0003S0M1XLWK");
    }

    #[test]
    fn positional_split_joins_middle_tokens() {
        let id = decompose_inquiry("HGST HUS726040ALS210 A907 K4KABCDE");

        assert_eq!(id.brand, "HGST");
        assert_eq!(id.model, "HUS726040ALS210 A907");
        assert_eq!(id.serial, "K4KABCDE");
    }

    #[test]
    fn single_token_degrades_to_unknown_serial() {
        let id = decompose_inquiry("SAMSUNG");
        assert_eq!(id.brand, "SAMSUNG");
        assert_eq!(id.serial, "unknown");
        assert!(id.model.is_empty());

        let id = decompose_inquiry("   ");
        assert_eq!(id.serial, "unknown");
    }
}
