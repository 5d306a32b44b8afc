//! Structured device records from MegaRAID management utility reports.
//!
//! The management utility (`megacli`) prints human-oriented text reports.
//! This crate turns them into records usable by monitoring systems:
//! discovery lists (one entry per controller, logical drive or physical
//! drive) and full per-device statistics.
//!
//! # Main entry points
//!
//! - [`discover_devices`]: enumerate every device of a kind.
//! - [`device_stats`]: fetch one device's full record by identifier.
//! - [`parser::ReportParser`]: parse pre-captured report text directly.
//! - [`source::MegacliSource`]: run the installed utility (requires the
//!   binary to be present in one of the configured search directories).
//!
//! # Example
//!
//! ```
//! use megaraid_core::EntityKind;
//! use megaraid_discovery::parser::{DeviceStats, ParseOptions};
//! use megaraid_discovery::{device_stats, discover_devices};
//!
//! let report = "\
//! Adapter 0 -- Virtual Drive Information:
//! Virtual Drive: 0 (Target Id: 0)
//! Name                :system
//! RAID Level          : Primary-1, Secondary-0, RAID Level Qualifier-0
//! Sector Size         : 512
//! ";
//!
//! let options = ParseOptions::default();
//! let entries = discover_devices(report, EntityKind::LogicalDrive, options).unwrap();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].device_id, "0 (Target Id: 0)");
//!
//! let stats = device_stats(report, EntityKind::LogicalDrive, "0 (Target Id: 0)", options).unwrap();
//! let DeviceStats::LogicalDrive(ld) = stats else { unreachable!() };
//! assert_eq!(ld.sector_size, 512);
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod extractor;
pub mod output;
pub mod parser;
pub mod source;

use megaraid_core::{DiscoveryEntry, EntityKind};
use parser::{DeviceStats, ParseOptions, ReportParser};
use source::ReportSource;

pub use error::{DiscoveryError, Result};

/// Fetches the report for `kind` from `source` and lists its devices.
///
/// An empty list is a valid result.
///
/// # Errors
///
/// Propagates any failure of `source` to produce the report.
pub fn discover_devices<S: ReportSource + ?Sized>(
    source: &S,
    kind: EntityKind,
    options: ParseOptions,
) -> Result<Vec<DiscoveryEntry>> {
    let report = source.fetch(kind)?;
    Ok(ReportParser::new(options).discover(kind, &report))
}

/// Fetches the report for `kind` from `source` and returns the device named
/// `name`.
///
/// # Errors
///
/// Propagates any failure of `source`, and returns
/// [`DiscoveryError::EntityNotFound`] when no device matches.
pub fn device_stats<S: ReportSource + ?Sized>(
    source: &S,
    kind: EntityKind,
    name: &str,
    options: ParseOptions,
) -> Result<DeviceStats> {
    let report = source.fetch(kind)?;
    ReportParser::new(options).stats(kind, &report, name)
}
