//! Record building: segmentation plus classification over a whole report.

use std::collections::BTreeMap;

use megaraid_core::{DiscoveryEntry, Record};
use tracing::debug;

use super::ParseOptions;
use super::classify::classify;
use super::segment::segment;

/// Parses every entity block of `report` into a record of type `R`.
///
/// Blocks whose identifier field stays empty are discarded. When two blocks
/// share an identifier the later one wins.
pub fn build_records<R: Record>(report: &str, options: ParseOptions) -> BTreeMap<String, R> {
    let mut records = BTreeMap::new();
    for record in parse_blocks::<R>(report, options) {
        records.insert(record.identifier().to_string(), record);
    }
    records
}

/// Parses every entity block of `report` into its discovery projection, in
/// report order.
pub fn build_discovery<R: Record>(report: &str, options: ParseOptions) -> Vec<DiscoveryEntry> {
    parse_blocks::<R>(report, options)
        .iter()
        .map(R::discovery_entry)
        .collect()
}

fn parse_blocks<R: Record>(report: &str, options: ParseOptions) -> Vec<R> {
    let mut records = Vec::new();
    for block in segment(report, R::KIND) {
        let mut record = R::default();
        for line in block.lines() {
            classify(line, &mut record, options);
        }
        if record.identifier().is_empty() {
            debug!(kind = %R::KIND, block = block.index, "Dropping block without identifier");
            continue;
        }
        records.push(record);
    }
    records
}
