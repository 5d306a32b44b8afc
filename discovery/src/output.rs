//! Output formatting for discovery entries and device statistics.

use serde::Serialize;

use crate::error::Result;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Single-line JSON, as consumed by monitoring agents.
    #[default]
    Json,
    /// Indented JSON.
    Pretty,
    Yaml,
}

/// Serializes `value` in the requested format.
///
/// JSON output carries no trailing newline; YAML output always ends with one.
///
/// # Examples
///
/// ```
/// use megaraid_core::{DiscoveryEntry, EntityKind};
/// use megaraid_discovery::output::{OutputFormat, render};
///
/// let entries = vec![DiscoveryEntry::new(EntityKind::LogicalDrive, "0 (Target Id: 0)", "system")];
/// let json = render(&entries, OutputFormat::Json).unwrap();
/// assert_eq!(
///     json,
///     r#"[{"{#DEVICE_ID}":"0 (Target Id: 0)","{#DEVICE_TYPE}":"LD","{#DEVICE_ALIAS}":"system"}]"#
/// );
/// ```
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}
