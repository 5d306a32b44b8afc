//! Entity kinds, coerced values and discovery entries.
//!
//! These types describe *what* a storage-controller report contains, not how
//! it is parsed. The parsing engine lives in `megaraid-discovery`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three report kinds the management utility produces.
///
/// Each kind has a fixed anchor substring that delimits one entity's block
/// inside the raw report, and a fixed argument list for the utility.
///
/// # Examples
///
/// ```
/// use megaraid_core::EntityKind;
///
/// let kind: EntityKind = "pd".parse().unwrap();
/// assert_eq!(kind.anchor(), "Enclosure Device ID");
/// assert_eq!(kind.anchor_marker(), None);
/// assert_eq!(kind.type_tag(), "PD");
/// assert!("disk".parse::<EntityKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// RAID controller (adapter).
    #[serde(rename = "raid")]
    Controller,
    /// Logical drive (virtual drive).
    #[serde(rename = "ld")]
    LogicalDrive,
    /// Physical drive.
    #[serde(rename = "pd")]
    PhysicalDrive,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Controller,
        EntityKind::LogicalDrive,
        EntityKind::PhysicalDrive,
    ];

    /// Selector used on the command line (`raid`, `ld`, `pd`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Controller => "raid",
            Self::LogicalDrive => "ld",
            Self::PhysicalDrive => "pd",
        }
    }

    /// Tag carried in [`DiscoveryEntry::device_type`].
    pub fn type_tag(self) -> &'static str {
        match self {
            Self::Controller => "Raid",
            Self::LogicalDrive => "LD",
            Self::PhysicalDrive => "PD",
        }
    }

    /// Human-readable name used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Controller => "Raid",
            Self::LogicalDrive => "Logical Drive",
            Self::PhysicalDrive => "Physical Drive",
        }
    }

    /// Literal substring that starts every entity block of this kind.
    pub fn anchor(self) -> &'static str {
        match self {
            Self::Controller => "Adapter #",
            Self::LogicalDrive => "Virtual Drive",
            Self::PhysicalDrive => "Enclosure Device ID",
        }
    }

    /// Text inserted right after every anchor occurrence before splitting.
    ///
    /// The marker turns the remainder of the anchor line into a line that
    /// starts with the identifier label, so the identifier is recovered by
    /// ordinary classification. Physical drive reports need no marker.
    pub fn anchor_marker(self) -> Option<&'static str> {
        match self {
            Self::Controller => Some("MController: "),
            Self::LogicalDrive => Some("LogicalDrive"),
            Self::PhysicalDrive => None,
        }
    }

    /// Arguments passed to the management utility to produce the report.
    pub fn report_args(self) -> &'static [&'static str] {
        match self {
            Self::Controller => &["-AdpAllInfo", "-aAll"],
            Self::LogicalDrive => &["-LDInfo", "-Lall", "-aAll"],
            Self::PhysicalDrive => &["-PDList", "-aAll"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an entity kind selector is not one of `raid`, `ld`, `pd`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device type '{0}' (expected one of: raid, ld, pd)")]
pub struct ParseKindError(pub String);

impl FromStr for EntityKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raid" => Ok(Self::Controller),
            "ld" => Ok(Self::LogicalDrive),
            "pd" => Ok(Self::PhysicalDrive),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// Coercion applied to the text after a label's `:` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Trimmed text, verbatim.
    Text,
    /// Base-10 signed integer.
    Integer,
}

impl ValueKind {
    /// Value stored when a line is malformed.
    ///
    /// ```
    /// use megaraid_core::{Value, ValueKind};
    ///
    /// assert_eq!(ValueKind::Text.zero(), Value::Text(String::new()));
    /// assert_eq!(ValueKind::Integer.zero(), Value::Integer(0));
    /// ```
    pub fn zero(self) -> Value {
        match self {
            Self::Text => Value::Text(String::new()),
            Self::Integer => Value::Integer(0),
        }
    }
}

/// A coerced field value.
///
/// Serializes untagged, so integers appear as JSON numbers and text as JSON
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Returns the text payload, or `None` for integers.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Integer(_) => None,
        }
    }

    /// Returns the integer payload, or `None` for text.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// Reduced projection of a record used by enumeration (`discovery`) mode.
///
/// Field names serialize as monitoring low-level-discovery macros.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscoveryEntry {
    #[serde(rename = "{#DEVICE_ID}")]
    pub device_id: String,
    #[serde(rename = "{#DEVICE_TYPE}")]
    pub device_type: String,
    #[serde(rename = "{#DEVICE_ALIAS}")]
    pub device_alias: String,
}

impl DiscoveryEntry {
    pub fn new(kind: EntityKind, device_id: &str, device_alias: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            device_type: kind.type_tag().to_string(),
            device_alias: device_alias.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_selector() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "ad".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, ParseKindError("ad".to_string()));
        assert!(err.to_string().contains("raid, ld, pd"));
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Integer(3),
            Value::Text("Optimal".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[3,"Optimal"]"#);
    }

    #[test]
    fn test_value_accessors_match_variant() {
        let count = Value::Integer(3);
        assert_eq!(count.kind(), ValueKind::Integer);
        assert_eq!(count.as_integer(), Some(3));
        assert_eq!(count.as_text(), None);

        let state = Value::Text("Optimal".into());
        assert_eq!(state.kind(), ValueKind::Text);
        assert_eq!(state.as_text(), Some("Optimal"));
        assert_eq!(state.as_integer(), None);
        assert_eq!(ValueKind::Integer.zero().kind(), ValueKind::Integer);
    }

    #[test]
    fn test_discovery_entry_uses_macro_keys() {
        let entry = DiscoveryEntry::new(EntityKind::Controller, "0", "PERC H710 Mini");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["{#DEVICE_ID}"], "0");
        assert_eq!(json["{#DEVICE_TYPE}"], "Raid");
        assert_eq!(json["{#DEVICE_ALIAS}"], "PERC H710 Mini");
    }

    #[test]
    fn test_report_args_per_kind() {
        assert_eq!(
            EntityKind::Controller.report_args(),
            &["-AdpAllInfo", "-aAll"]
        );
        assert_eq!(
            EntityKind::LogicalDrive.report_args(),
            &["-LDInfo", "-Lall", "-aAll"]
        );
        assert_eq!(EntityKind::PhysicalDrive.report_args(), &["-PDList", "-aAll"]);
    }
}
