//! Presence check for a MegaRAID controller and its management utility.

use tracing::debug;

use crate::config::ToolConfig;
use crate::error::Result;
use crate::extractor::{locate_binary, run_tool};

/// Binary listing PCI devices.
pub const LSPCI_BINARY: &str = "lspci";

/// Outcome of [`check_controllers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOutcome {
    pub controller_present: bool,
    pub utility_installed: bool,
}

impl CheckOutcome {
    /// `true` only when both a controller and the utility were found.
    pub fn ready(&self) -> bool {
        self.controller_present && self.utility_installed
    }
}

/// Returns `true` when any `lspci` line names an LSI MegaRAID device.
pub fn has_megaraid_controller(lspci_output: &str) -> bool {
    lspci_output
        .lines()
        .any(|line| line.contains("LSI") && line.contains("MegaRAID"))
}

/// Looks for a MegaRAID controller on the PCI bus and for the configured
/// management utility.
///
/// # Errors
///
/// Fails when `lspci` cannot be located or run. A missing utility is
/// reported through [`CheckOutcome::utility_installed`].
pub fn check_controllers(config: &ToolConfig) -> Result<CheckOutcome> {
    let lspci = locate_binary(LSPCI_BINARY, config.search_dirs.as_slice())?;
    let listing = run_tool(&lspci, &[], config.timeout(), config.verbose)?;
    let controller_present = has_megaraid_controller(&listing);

    let utility_installed = locate_binary(&config.binary, config.search_dirs.as_slice()).is_ok();
    debug!(controller_present, utility_installed, "Checked controllers");

    Ok(CheckOutcome {
        controller_present,
        utility_installed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_megaraid_line() {
        let listing = "\
00:1f.2 SATA controller: Intel Corporation C600/X79 series chipset 6-Port SATA AHCI Controller
03:00.0 RAID bus controller: LSI Logic / Symbios Logic MegaRAID SAS 2208 [Thunderbolt] (rev 05)
";
        assert!(has_megaraid_controller(listing));
    }

    #[test]
    fn test_both_words_must_share_a_line() {
        let listing = "\
01:00.0 Serial Attached SCSI controller: LSI Logic / Symbios Logic SAS2008
02:00.0 RAID bus controller: Broadcom MegaRAID SAS-3 3108
";
        assert!(!has_megaraid_controller(listing));
        assert!(!has_megaraid_controller(""));
    }

    #[test]
    fn test_ready_requires_both() {
        let outcome = CheckOutcome {
            controller_present: true,
            utility_installed: false,
        };
        assert!(!outcome.ready());
    }

    #[test]
    fn test_missing_lspci_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            search_dirs: vec![dir.path().to_path_buf()],
            ..ToolConfig::default()
        };
        assert!(check_controllers(&config).is_err());
    }
}
