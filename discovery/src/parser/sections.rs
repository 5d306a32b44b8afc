//! Section recovery for the adapter information report.
//!
//! The report conveys its hierarchy only visually: a section title is a line
//! followed by an underline row of `=` characters.
//!
//! ```text
//! Adapter #0
//!
//! ==============================================================================
//!                     Versions
//!                 ================
//! Product Name    : PERC H710 Mini
//! FW Package Build: 21.3.0-0009
//! ```
//!
//! Each field is attached to the most recently opened section of the block's
//! controller. Fields seen before the first section opens are dropped, as are
//! fields under an underline whose title line holds only whitespace.

use megaraid_core::{EntityKind, SectionTree};
use tracing::debug;

use super::ParseOptions;
use super::coerce::{coerce_text, split_field};
use super::segment::segment;

/// Line prefix that carries the controller id after segmentation.
pub const CONTROLLER_LABEL: &str = "MController:";

/// Substring marking an underline row.
pub const UNDERLINE_MARKER: &str = "====";

/// Streaming state for one controller block.
struct SectionRecoverer<'a> {
    tree: &'a mut SectionTree,
    options: ParseOptions,
    controller: Option<String>,
    section: Option<String>,
    previous: &'a str,
}

impl<'a> SectionRecoverer<'a> {
    fn new(tree: &'a mut SectionTree, options: ParseOptions) -> Self {
        Self {
            tree,
            options,
            controller: None,
            section: None,
            previous: "",
        }
    }

    fn feed(&mut self, line: &'a str) {
        if line.starts_with(CONTROLLER_LABEL) {
            let id = coerce_text(line, self.options);
            self.tree.open_controller(&id);
            self.controller = Some(id);
        }

        if line.contains(UNDERLINE_MARKER) && !self.previous.is_empty() {
            let title = self.previous.trim();
            if title.is_empty() {
                // Untitled section: its fields belong nowhere.
                self.section = None;
            } else {
                if let Some(controller) = self.controller.as_deref() {
                    self.tree.open_section(controller, title);
                }
                self.section = Some(title.to_string());
            }
        }

        if let (Some(controller), Some(section)) =
            (self.controller.as_deref(), self.section.as_deref())
        {
            if let Some((label, value)) = split_field(line) {
                self.tree.insert_field(controller, section, label.trim(), value);
            }
        }

        self.previous = line;
    }
}

/// Recovers controller id → section → field → value from an adapter report.
pub fn recover_sections(report: &str, options: ParseOptions) -> SectionTree {
    let mut tree = SectionTree::default();
    for block in segment(report, EntityKind::Controller) {
        let mut recoverer = SectionRecoverer::new(&mut tree, options);
        for line in block.lines() {
            recoverer.feed(line);
        }
        if recoverer.controller.is_none() && !block.text.trim().is_empty() {
            debug!(block = block.index, "Skipping block without controller id");
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: ParseOptions = ParseOptions { verbose: false };

    #[test]
    fn test_field_lands_in_underlined_section() {
        let report = "Adapter #0\nVersions\n================\nFW Package Build: 1.2.3\n";
        let tree = recover_sections(report, QUIET);
        assert_eq!(tree.field("0", "Versions", "FW Package Build"), Some("1.2.3"));
    }

    #[test]
    fn test_fields_before_first_section_are_dropped() {
        let report = "\
Adapter #0
Product Name    : PERC H710 Mini
                    Versions
                ================
Serial No       : 29E004Z
";
        let tree = recover_sections(report, QUIET);
        let sections = tree.controller("0").unwrap();
        assert_eq!(sections.len(), 1);
        let versions = &sections["Versions"];
        assert_eq!(versions.len(), 1);
        assert_eq!(versions["Serial No"], "29E004Z");
    }

    #[test]
    fn test_section_title_is_trimmed_previous_line() {
        let report = "Adapter #3\n                Mfg Data\n                ================\nMfg. Date       : 06/24/13\n";
        let tree = recover_sections(report, QUIET);
        assert_eq!(tree.field("3", "Mfg Data", "Mfg. Date"), Some("06/24/13"));
    }

    #[test]
    fn test_underline_after_blank_line_opens_nothing() {
        let report = "\
Adapter #0
                Status
                ================
ECC Bucket Count                 : 0

==============================================================================
Any Offline VD Cache Preserved   : No
";
        let tree = recover_sections(report, QUIET);
        let status = &tree.controller("0").unwrap()["Status"];
        assert_eq!(status.len(), 2);
        assert_eq!(status["Any Offline VD Cache Preserved"], "No");
    }

    #[test]
    fn test_underline_after_whitespace_line_closes_section() {
        let report = "Adapter #0\nVersions\n====\nA: 1\n    \n====\nB: 2\nVersions\n====\nC: 3\n";
        let tree = recover_sections(report, QUIET);
        let sections = tree.controller("0").unwrap();
        assert_eq!(sections.len(), 1);
        let versions = &sections["Versions"];
        assert_eq!(versions.len(), 1);
        assert_eq!(versions["C"], "3");

        let report = "Adapter #0\nVersions\n====\nA: 1\n    \n====\nB: 2\n";
        let tree = recover_sections(report, QUIET);
        assert_eq!(tree.field("0", "Versions", "A"), Some("1"));
        assert_eq!(tree.field("0", "Versions", "B"), None);
    }

    #[test]
    fn test_values_keep_inner_separators() {
        let report = "Adapter #0\nImage Versions in Flash:\n================\nController Time : 10:22:41\n";
        let tree = recover_sections(report, QUIET);
        let section = &tree.controller("0").unwrap()["Image Versions in Flash:"];
        assert_eq!(section["Controller Time"], "10:22:41");
    }

    #[test]
    fn test_each_controller_block_starts_fresh() {
        let report = "\
Adapter #0
                Versions
                ================
Product Name    : PERC H710 Mini
Adapter #1
Product Name    : PERC H310
                Versions
                ================
FW Version      : 2.120.54-1504
";
        let tree = recover_sections(report, QUIET);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.field("0", "Versions", "Product Name"), Some("PERC H710 Mini"));
        assert_eq!(tree.field("1", "Versions", "Product Name"), None);
        assert_eq!(tree.field("1", "Versions", "FW Version"), Some("2.120.54-1504"));
    }

    #[test]
    fn test_text_before_first_adapter_is_ignored() {
        let report = "\
Banner
================
Key: value
Adapter #0
";
        let tree = recover_sections(report, QUIET);
        assert_eq!(tree.controller_ids().collect::<Vec<_>>(), vec!["0"]);
        assert!(tree.controller("0").unwrap().is_empty());
    }

    #[test]
    fn test_repeated_section_keeps_last_occurrence() {
        let report = "\
Adapter #0
Settings
====
Alarm: Absent
Settings
====
Auto Rebuild: Enabled
";
        let tree = recover_sections(report, QUIET);
        let settings = &tree.controller("0").unwrap()["Settings"];
        assert_eq!(settings.len(), 1);
        assert_eq!(settings["Auto Rebuild"], "Enabled");
    }
}
