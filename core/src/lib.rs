//! Core record types and field catalogs for MegaRAID report extraction.
//!
//! This crate defines the data model shared by the extraction engine and the
//! command-line tool:
//!
//! - [`EntityKind`]: the three report kinds (controller, logical drive,
//!   physical drive) and their anchors.
//! - [`Value`] / [`ValueKind`]: the tagged result of coercing a raw field.
//! - [`Record`]: implemented by [`ControllerSummary`],
//!   [`LogicalDriveStats`] and [`PhysicalDriveStats`], each carrying a static
//!   catalog of [`FieldRule`]s.
//! - [`DiscoveryEntry`]: the reduced projection used for enumeration.
//! - [`SectionTree`]: the nested controller report.
//!
//! # Example
//!
//! ```
//! use megaraid_core::*;
//!
//! let kind: EntityKind = "ld".parse().unwrap();
//! assert_eq!(kind, EntityKind::LogicalDrive);
//! assert_eq!(kind.anchor(), "Virtual Drive");
//!
//! let mut stats = LogicalDriveStats::default();
//! stats.device_id = "0 (Target Id: 0)".into();
//! stats.name = "system".into();
//!
//! let entry = stats.discovery_entry();
//! assert_eq!(entry.device_type, "LD");
//! assert_eq!(entry.device_alias, "system");
//! ```

mod records;
mod sections;
mod types;

pub use records::{
    ControllerSummary, FieldRule, LogicalDriveStats, PhysicalDriveStats, Record, Slot,
};
pub use sections::{FieldMap, SectionMap, SectionTree};
pub use types::*;
