//! Record types and their static field catalogs.
//!
//! A catalog is an ordered table of `(label prefix, field name, slot)` rules.
//! The slot both names the destination field and fixes its coercion: a
//! [`Slot::Text`] destination receives trimmed text, a [`Slot::Integer`]
//! destination receives a parsed integer. One generic classification loop in
//! the engine drives every catalog.

use serde::{Deserialize, Serialize};

use crate::types::{DiscoveryEntry, EntityKind, Value, ValueKind};

/// Typed destination of a [`FieldRule`].
pub enum Slot<R> {
    Text(fn(&mut R) -> &mut String),
    Integer(fn(&mut R) -> &mut i64),
}

impl<R> Slot<R> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
        }
    }

    /// Writes `value` into the destination field.
    ///
    /// A value of the other kind stores the field's zero value.
    pub fn store(&self, record: &mut R, value: &Value) {
        match self {
            Self::Text(slot) => *slot(record) = value.as_text().unwrap_or_default().to_string(),
            Self::Integer(slot) => *slot(record) = value.as_integer().unwrap_or_default(),
        }
    }
}

impl<R> Clone for Slot<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Slot<R> {}

/// One catalog entry: lines starting with `prefix` populate `slot`.
pub struct FieldRule<R> {
    /// Case-sensitive label prefix, matched at position 0 of the raw line.
    pub prefix: &'static str,
    /// Serialized name of the destination field.
    pub field: &'static str,
    pub slot: Slot<R>,
}

impl<R> FieldRule<R> {
    pub fn matches(&self, line: &str) -> bool {
        line.starts_with(self.prefix)
    }
}

/// A flat per-entity record populated from one entity block.
///
/// Implementors provide their catalog and name which fields hold the unique
/// identifier and the display alias.
pub trait Record: Default + Serialize + 'static {
    const KIND: EntityKind;

    fn catalog() -> &'static [FieldRule<Self>];

    /// Unique identifier; a record with an empty identifier is discarded.
    fn identifier(&self) -> &str;

    /// Display name used in discovery entries.
    fn alias(&self) -> &str;

    fn discovery_entry(&self) -> DiscoveryEntry {
        DiscoveryEntry::new(Self::KIND, self.identifier(), self.alias())
    }
}

/// Controller identity as listed by the adapter information report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerSummary {
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "ProductName")]
    pub product_name: String,
}

static CONTROLLER_FIELDS: &[FieldRule<ControllerSummary>] = &[
    FieldRule {
        prefix: "MController",
        field: "DeviceID",
        slot: Slot::Text(|r| &mut r.device_id),
    },
    FieldRule {
        prefix: "Product Name",
        field: "ProductName",
        slot: Slot::Text(|r| &mut r.product_name),
    },
];

impl Record for ControllerSummary {
    const KIND: EntityKind = EntityKind::Controller;

    fn catalog() -> &'static [FieldRule<Self>] {
        CONTROLLER_FIELDS
    }

    fn identifier(&self) -> &str {
        &self.device_id
    }

    fn alias(&self) -> &str {
        &self.product_name
    }
}

/// Statistics for one logical (virtual) drive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogicalDriveStats {
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    pub name: String,
    pub raid_level: String,
    pub size: String,
    pub sector_size: i64,
    #[serde(rename = "IsVDemulated")]
    pub is_vd_emulated: String,
    pub parity_size: String,
    pub state: String,
    pub strip_size: String,
    pub number_of_drives_per_span: i64,
    pub span_depth: i64,
    pub disk_cache_policy: String,
    pub current_access_policy: String,
    pub current_cache_policy: String,
    pub encryption_type: String,
    pub bad_blocks_exist: String,
    #[serde(rename = "IsVDCached")]
    pub is_vd_cached: String,
}

static LOGICAL_DRIVE_FIELDS: &[FieldRule<LogicalDriveStats>] = &[
    FieldRule {
        prefix: "LogicalDrive",
        field: "DeviceID",
        slot: Slot::Text(|r| &mut r.device_id),
    },
    FieldRule {
        prefix: "Name",
        field: "Name",
        slot: Slot::Text(|r| &mut r.name),
    },
    FieldRule {
        prefix: "RAID Level",
        field: "RaidLevel",
        slot: Slot::Text(|r| &mut r.raid_level),
    },
    FieldRule {
        prefix: "Size",
        field: "Size",
        slot: Slot::Text(|r| &mut r.size),
    },
    FieldRule {
        prefix: "Sector Size",
        field: "SectorSize",
        slot: Slot::Integer(|r| &mut r.sector_size),
    },
    FieldRule {
        prefix: "Is VD emulated",
        field: "IsVDemulated",
        slot: Slot::Text(|r| &mut r.is_vd_emulated),
    },
    FieldRule {
        prefix: "Parity Size",
        field: "ParitySize",
        slot: Slot::Text(|r| &mut r.parity_size),
    },
    FieldRule {
        prefix: "State",
        field: "State",
        slot: Slot::Text(|r| &mut r.state),
    },
    FieldRule {
        prefix: "Strip Size",
        field: "StripSize",
        slot: Slot::Text(|r| &mut r.strip_size),
    },
    FieldRule {
        prefix: "Number Of Drives per span",
        field: "NumberOfDrivesPerSpan",
        slot: Slot::Integer(|r| &mut r.number_of_drives_per_span),
    },
    FieldRule {
        prefix: "Span Depth",
        field: "SpanDepth",
        slot: Slot::Integer(|r| &mut r.span_depth),
    },
    FieldRule {
        prefix: "Current Cache Policy",
        field: "CurrentCachePolicy",
        slot: Slot::Text(|r| &mut r.current_cache_policy),
    },
    FieldRule {
        prefix: "Current Access Policy",
        field: "CurrentAccessPolicy",
        slot: Slot::Text(|r| &mut r.current_access_policy),
    },
    FieldRule {
        prefix: "Disk Cache Policy",
        field: "DiskCachePolicy",
        slot: Slot::Text(|r| &mut r.disk_cache_policy),
    },
    FieldRule {
        prefix: "Encryption Type",
        field: "EncryptionType",
        slot: Slot::Text(|r| &mut r.encryption_type),
    },
    FieldRule {
        prefix: "Bad Blocks Exist",
        field: "BadBlocksExist",
        slot: Slot::Text(|r| &mut r.bad_blocks_exist),
    },
    FieldRule {
        prefix: "Is VD Cached",
        field: "IsVDCached",
        slot: Slot::Text(|r| &mut r.is_vd_cached),
    },
];

impl Record for LogicalDriveStats {
    const KIND: EntityKind = EntityKind::LogicalDrive;

    fn catalog() -> &'static [FieldRule<Self>] {
        LOGICAL_DRIVE_FIELDS
    }

    fn identifier(&self) -> &str {
        &self.device_id
    }

    fn alias(&self) -> &str {
        &self.name
    }
}

/// Statistics and error counters for one physical drive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhysicalDriveStats {
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "WWN")]
    pub wwn: String,
    pub media_error_count: i64,
    pub other_error_count: i64,
    pub predictive_failure_count: i64,
    pub last_predictive_failure_event_seq_number: i64,
    #[serde(rename = "PDType")]
    pub pd_type: String,
    pub raw_size: String,
    pub sector_size: i64,
    pub logical_sector_size: i64,
    pub physical_sector_size: i64,
    pub firmware_state: String,
    pub commissioned_spare: String,
    pub emergency_spare: String,
    pub device_firmware_level: String,
    pub shield_counter: i64,
    pub inquiry_data: String,
    pub secured: String,
    pub locked: String,
    #[serde(rename = "NeedsEKMAttention")]
    pub needs_ekm_attention: String,
    pub device_speed: String,
    pub link_speed: String,
    pub media_type: String,
    pub drive_temperature: String,
    #[serde(rename = "DriveSMARTAlert")]
    pub drive_smart_alert: String,
}

static PHYSICAL_DRIVE_FIELDS: &[FieldRule<PhysicalDriveStats>] = &[
    FieldRule {
        prefix: "Drive's position",
        field: "DeviceID",
        slot: Slot::Text(|r| &mut r.device_id),
    },
    FieldRule {
        prefix: "WWN",
        field: "WWN",
        slot: Slot::Text(|r| &mut r.wwn),
    },
    FieldRule {
        prefix: "Media Error Count",
        field: "MediaErrorCount",
        slot: Slot::Integer(|r| &mut r.media_error_count),
    },
    FieldRule {
        prefix: "Other Error Count",
        field: "OtherErrorCount",
        slot: Slot::Integer(|r| &mut r.other_error_count),
    },
    FieldRule {
        prefix: "Predictive Failure Count",
        field: "PredictiveFailureCount",
        slot: Slot::Integer(|r| &mut r.predictive_failure_count),
    },
    FieldRule {
        prefix: "Last Predictive Failure Event Seq Number",
        field: "LastPredictiveFailureEventSeqNumber",
        slot: Slot::Integer(|r| &mut r.last_predictive_failure_event_seq_number),
    },
    FieldRule {
        prefix: "PD Type",
        field: "PDType",
        slot: Slot::Text(|r| &mut r.pd_type),
    },
    FieldRule {
        prefix: "Raw Size",
        field: "RawSize",
        slot: Slot::Text(|r| &mut r.raw_size),
    },
    FieldRule {
        prefix: "Sector Size",
        field: "SectorSize",
        slot: Slot::Integer(|r| &mut r.sector_size),
    },
    FieldRule {
        prefix: "Logical Sector Size",
        field: "LogicalSectorSize",
        slot: Slot::Integer(|r| &mut r.logical_sector_size),
    },
    FieldRule {
        prefix: "Physical Sector Size",
        field: "PhysicalSectorSize",
        slot: Slot::Integer(|r| &mut r.physical_sector_size),
    },
    FieldRule {
        prefix: "Firmware state",
        field: "FirmwareState",
        slot: Slot::Text(|r| &mut r.firmware_state),
    },
    FieldRule {
        prefix: "Commissioned Spare",
        field: "CommissionedSpare",
        slot: Slot::Text(|r| &mut r.commissioned_spare),
    },
    FieldRule {
        prefix: "Emergency Spare",
        field: "EmergencySpare",
        slot: Slot::Text(|r| &mut r.emergency_spare),
    },
    FieldRule {
        prefix: "Device Firmware Level",
        field: "DeviceFirmwareLevel",
        slot: Slot::Text(|r| &mut r.device_firmware_level),
    },
    FieldRule {
        prefix: "Shield Counter",
        field: "ShieldCounter",
        slot: Slot::Integer(|r| &mut r.shield_counter),
    },
    FieldRule {
        prefix: "Inquiry Data",
        field: "InquiryData",
        slot: Slot::Text(|r| &mut r.inquiry_data),
    },
    FieldRule {
        prefix: "Secured",
        field: "Secured",
        slot: Slot::Text(|r| &mut r.secured),
    },
    FieldRule {
        prefix: "Locked",
        field: "Locked",
        slot: Slot::Text(|r| &mut r.locked),
    },
    FieldRule {
        prefix: "Needs EKM Attention",
        field: "NeedsEKMAttention",
        slot: Slot::Text(|r| &mut r.needs_ekm_attention),
    },
    FieldRule {
        prefix: "Device Speed",
        field: "DeviceSpeed",
        slot: Slot::Text(|r| &mut r.device_speed),
    },
    FieldRule {
        prefix: "Link Speed",
        field: "LinkSpeed",
        slot: Slot::Text(|r| &mut r.link_speed),
    },
    FieldRule {
        prefix: "Media Type",
        field: "MediaType",
        slot: Slot::Text(|r| &mut r.media_type),
    },
    FieldRule {
        prefix: "DriveTemperature",
        field: "DriveTemperature",
        slot: Slot::Text(|r| &mut r.drive_temperature),
    },
    FieldRule {
        prefix: "Drive has flagged a S.M.A.R.T alert",
        field: "DriveSMARTAlert",
        slot: Slot::Text(|r| &mut r.drive_smart_alert),
    },
];

impl Record for PhysicalDriveStats {
    const KIND: EntityKind = EntityKind::PhysicalDrive;

    fn catalog() -> &'static [FieldRule<Self>] {
        PHYSICAL_DRIVE_FIELDS
    }

    fn identifier(&self) -> &str {
        &self.device_id
    }

    fn alias(&self) -> &str {
        &self.wwn
    }
}
