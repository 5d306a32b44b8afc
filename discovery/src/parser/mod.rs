//! Extraction engine for storage-controller report text.
//!
//! The management utility prints human-oriented reports: one block per
//! controller, logical drive or physical drive, each a run of
//! `Label : value` lines. The engine works in four stages:
//!
//! 1. [`segment`] splits the report on the entity kind's anchor.
//! 2. [`classify`] matches each line of a block against the record's static
//!    field catalog.
//! 3. [`coerce`] turns the text after the label into a string or integer,
//!    degrading to a zero value instead of failing.
//! 4. [`build_records`] / [`build_discovery`] keep every block that produced
//!    an identifier.
//!
//! The adapter information report is additionally read as a section tree by
//! [`recover_sections`], since its fields are grouped under underlined titles.
//!
//! Most consumers should go through [`ReportParser`].

mod classify;
mod coerce;
mod records;
mod sections;
mod segment;

use std::collections::BTreeMap;

use megaraid_core::{
    ControllerSummary, DiscoveryEntry, EntityKind, LogicalDriveStats, PhysicalDriveStats, Record,
    SectionMap, SectionTree,
};
use serde::Serialize;
use tracing::debug;

use crate::error::{DiscoveryError, Result};

pub use classify::classify;
pub use coerce::coerce;
pub use records::{build_discovery, build_records};
pub use sections::{CONTROLLER_LABEL, UNDERLINE_MARKER, recover_sections};
pub use segment::{EntityBlock, segment};

/// Options threaded through every parsing stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Log a warning for every malformed field line.
    pub verbose: bool,
}

/// Full statistics for one device, as printed by `stats` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceStats {
    Controller(SectionMap),
    LogicalDrive(LogicalDriveStats),
    PhysicalDrive(PhysicalDriveStats),
}

/// Parser for raw management utility reports.
///
/// # Examples
///
/// ```
/// use megaraid_core::EntityKind;
/// use megaraid_discovery::parser::{DeviceStats, ParseOptions, ReportParser};
///
/// let report = "\
/// Enclosure Device ID: 32
/// Slot Number: 0
/// Drive's position: DiskGroup: 0, Span: 0, Arm: 0
/// Media Error Count: 3
/// WWN: 5000C500A1B2C3D4
/// ";
///
/// let parser = ReportParser::new(ParseOptions::default());
/// let entries = parser.discover(EntityKind::PhysicalDrive, report);
/// assert_eq!(entries[0].device_alias, "5000C500A1B2C3D4");
///
/// let stats = parser
///     .stats(EntityKind::PhysicalDrive, report, "DiskGroup: 0, Span: 0, Arm: 0")
///     .unwrap();
/// match stats {
///     DeviceStats::PhysicalDrive(pd) => assert_eq!(pd.media_error_count, 3),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportParser {
    options: ParseOptions,
}

impl ReportParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Lists every device of `kind` found in `report`, in report order.
    pub fn discover(&self, kind: EntityKind, report: &str) -> Vec<DiscoveryEntry> {
        let entries = match kind {
            EntityKind::Controller => build_discovery::<ControllerSummary>(report, self.options),
            EntityKind::LogicalDrive => build_discovery::<LogicalDriveStats>(report, self.options),
            EntityKind::PhysicalDrive => {
                build_discovery::<PhysicalDriveStats>(report, self.options)
            }
        };
        debug!(kind = %kind, count = entries.len(), "Discovered devices");
        entries
    }

    pub fn logical_drives(&self, report: &str) -> BTreeMap<String, LogicalDriveStats> {
        build_records(report, self.options)
    }

    pub fn physical_drives(&self, report: &str) -> BTreeMap<String, PhysicalDriveStats> {
        build_records(report, self.options)
    }

    pub fn controllers(&self, report: &str) -> SectionTree {
        recover_sections(report, self.options)
    }

    /// Returns the full statistics of the device of `kind` named `name`.
    ///
    /// For controllers the result is that controller's section map.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::EntityNotFound`] when no device of that kind
    /// carries the identifier `name`.
    pub fn stats(&self, kind: EntityKind, report: &str, name: &str) -> Result<DeviceStats> {
        match kind {
            EntityKind::Controller => self
                .controllers(report)
                .controller(name)
                .cloned()
                .map(DeviceStats::Controller)
                .ok_or_else(|| not_found(kind, name)),
            EntityKind::LogicalDrive => {
                take_record(self.logical_drives(report), name).map(DeviceStats::LogicalDrive)
            }
            EntityKind::PhysicalDrive => {
                take_record(self.physical_drives(report), name).map(DeviceStats::PhysicalDrive)
            }
        }
    }
}

/// Looks up one record by identifier.
///
/// # Errors
///
/// Returns [`DiscoveryError::EntityNotFound`] when `name` is not a key of
/// `records`.
pub fn find_record<'a, R: Record>(records: &'a BTreeMap<String, R>, name: &str) -> Result<&'a R> {
    records.get(name).ok_or_else(|| not_found(R::KIND, name))
}

fn take_record<R: Record>(mut records: BTreeMap<String, R>, name: &str) -> Result<R> {
    records.remove(name).ok_or_else(|| not_found(R::KIND, name))
}

fn not_found(kind: EntityKind, name: &str) -> DiscoveryError {
    DiscoveryError::EntityNotFound {
        kind,
        name: name.to_string(),
    }
}
