use std::fs;
use std::path::PathBuf;

use megaraid_core::{DiscoveryEntry, EntityKind};
use megaraid_discovery::DiscoveryError;
use megaraid_discovery::parser::{DeviceStats, ParseOptions, ReportParser};
use megaraid_discovery::source::FileSource;
use megaraid_discovery::{device_stats, discover_devices};

#[test]
fn test_adapter_fixture_discovers_both_controllers() {
    let report = fixture("megacli-adpallinfo.txt");
    let parser = ReportParser::default();

    let entries = parser.discover(EntityKind::Controller, &report);
    assert_eq!(
        entries,
        vec![
            DiscoveryEntry::new(EntityKind::Controller, "0", "PERC H710 Mini"),
            DiscoveryEntry::new(EntityKind::Controller, "1", "LSI MegaRAID SAS 9260-8i"),
        ]
    );
}

#[test]
fn test_adapter_fixture_recovers_sections_per_controller() {
    let report = fixture("megacli-adpallinfo.txt");
    let tree = ReportParser::default().controllers(&report);

    assert_eq!(tree.controller_ids().collect::<Vec<_>>(), vec!["0", "1"]);
    assert_eq!(
        tree.field("0", "Versions", "Product Name"),
        Some("PERC H710 Mini")
    );
    assert_eq!(
        tree.field("1", "Versions", "Product Name"),
        Some("LSI MegaRAID SAS 9260-8i")
    );
    assert_eq!(tree.field("0", "PCI Info", "Device Id"), Some("005b"));
    assert_eq!(
        tree.field("0", "HW Configuration", "ROC temperature"),
        Some("58  degree Celsius")
    );
    assert_eq!(tree.field("1", "Status", "ECC Bucket Count"), Some("0"));

    // Adapter 1 prints far fewer sections than adapter 0.
    assert!(tree.controller("1").unwrap().get("Settings").is_none());
}

#[test]
fn test_adapter_fixture_values_keep_inner_colons() {
    let report = fixture("megacli-adpallinfo.txt");
    let tree = ReportParser::default().controllers(&report);

    assert_eq!(
        tree.field("0", "Settings", "Current Time"),
        Some("10:22:41 6/5, 2015")
    );
    assert_eq!(
        tree.field("0", "Image Versions in Flash:", "Preboot CLI Version"),
        Some("05.00-03:#%00008")
    );
}

#[test]
fn test_adapter_fixture_same_label_in_two_sections() {
    let report = fixture("megacli-adpallinfo.txt");
    let tree = ReportParser::default().controllers(&report);

    assert_eq!(tree.field("0", "HW Configuration", "Alarm"), Some("Absent"));
    assert_eq!(tree.field("0", "Settings", "Alarm"), Some("Disabled"));
}

#[test]
fn test_adapter_fixture_indented_labels_are_trimmed() {
    let report = fixture("megacli-adpallinfo.txt");
    let tree = ReportParser::default().controllers(&report);

    assert_eq!(tree.field("0", "Device Present", "Degraded"), Some("1"));
    assert_eq!(tree.field("0", "Device Present", "Failed Disks"), Some("1"));
    assert_eq!(tree.field("0", "Capabilities", "Allowed Mixing"), Some(""));
}

#[test]
fn test_adapter_fixture_stats_returns_requested_controller() {
    let report = fixture("megacli-adpallinfo.txt");
    let parser = ReportParser::default();

    let stats = parser.stats(EntityKind::Controller, &report, "0").unwrap();
    let DeviceStats::Controller(sections) = stats else {
        panic!("expected controller sections");
    };
    assert_eq!(sections["Versions"]["Serial No"], "29E00BQ");

    let err = parser
        .stats(EntityKind::Controller, &report, "2")
        .unwrap_err();
    assert_eq!(err.to_string(), "Raid not exist 2");
}

#[test]
fn test_ldinfo_fixture_discovery_follows_report_order() {
    let report = fixture("megacli-ldinfo.txt");
    let entries = ReportParser::default().discover(EntityKind::LogicalDrive, &report);

    let ids: Vec<_> = entries.iter().map(|e| e.device_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["0 (Target Id: 0)", "1 (Target Id: 1)", "0 (Target Id: 0)"]
    );
    let aliases: Vec<_> = entries.iter().map(|e| e.device_alias.as_str()).collect();
    assert_eq!(aliases, vec!["system", "data", ""]);
}

#[test]
fn test_ldinfo_fixture_records() {
    let report = fixture("megacli-ldinfo.txt");
    let drives = ReportParser::default().logical_drives(&report);

    // Target ids restart per adapter, so adapter 1's drive replaces adapter 0's.
    assert_eq!(drives.len(), 2);
    let first = &drives["0 (Target Id: 0)"];
    assert_eq!(first.size, "3.637 TB");
    assert_eq!(first.number_of_drives_per_span, 2);
    assert_eq!(first.span_depth, 2);
    assert_eq!(first.strip_size, "256 KB");

    let data = &drives["1 (Target Id: 1)"];
    assert_eq!(data.name, "data");
    assert_eq!(data.raid_level, "Primary-5, Secondary-0, RAID Level Qualifier-3");
    assert_eq!(data.state, "Degraded");
    assert_eq!(data.sector_size, 512);
    assert_eq!(data.is_vd_emulated, "Yes");
    assert_eq!(data.parity_size, "278.875 GB");
    assert_eq!(data.number_of_drives_per_span, 0);
    assert_eq!(
        data.current_cache_policy,
        "WriteThrough, ReadAdaptive, Direct, No Write Cache if Bad BBU"
    );
    assert_eq!(data.current_access_policy, "Read/Write");
    assert_eq!(data.disk_cache_policy, "Disabled");
    assert_eq!(data.bad_blocks_exist, "No");
    assert_eq!(data.is_vd_cached, "No");
}

#[test]
fn test_pdlist_fixture_drops_unconfigured_drive() {
    let report = fixture("megacli-pdlist.txt");
    let entries = ReportParser::default().discover(EntityKind::PhysicalDrive, &report);

    assert_eq!(
        entries,
        vec![
            DiscoveryEntry::new(
                EntityKind::PhysicalDrive,
                "DiskGroup: 0, Span: 0, Arm: 0",
                "5000C50056D6B0D8"
            ),
            DiscoveryEntry::new(
                EntityKind::PhysicalDrive,
                "DiskGroup: 0, Span: 0, Arm: 1",
                "5000C50056D6C3A4"
            ),
        ]
    );
}

#[test]
fn test_pdlist_fixture_records() {
    let report = fixture("megacli-pdlist.txt");
    let drives = ReportParser::default().physical_drives(&report);

    let failing = &drives["DiskGroup: 0, Span: 0, Arm: 1"];
    assert_eq!(failing.media_error_count, 3);
    assert_eq!(failing.other_error_count, 1);
    assert_eq!(failing.predictive_failure_count, 1);
    assert_eq!(failing.last_predictive_failure_event_seq_number, 5872);
    assert_eq!(failing.physical_sector_size, 4096);
    assert_eq!(failing.drive_smart_alert, "Yes");

    let healthy = &drives["DiskGroup: 0, Span: 0, Arm: 0"];
    assert_eq!(healthy.pd_type, "SAS");
    assert_eq!(healthy.raw_size, "279.396 GB [0x22ecb25c Sectors]");
    assert_eq!(healthy.firmware_state, "Online, Spun Up");
    assert_eq!(healthy.inquiry_data, "SEAGATE ST300MM0006     LS08S0K2B5NV");
    assert_eq!(healthy.secured, "Unsecured");
    assert_eq!(healthy.locked, "Unlocked");
    assert_eq!(healthy.link_speed, "6.0Gb/s");
    assert_eq!(healthy.drive_temperature, "33C (91.40 F)");
    assert_eq!(healthy.shield_counter, 0);
    assert_eq!(healthy.drive_smart_alert, "No");
}

#[test]
fn test_pdlist_fixture_stats_serialize_verbatim_names() {
    let report = fixture("megacli-pdlist.txt");
    let stats = ReportParser::default()
        .stats(EntityKind::PhysicalDrive, &report, "DiskGroup: 0, Span: 0, Arm: 1")
        .unwrap();

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["DeviceID"], "DiskGroup: 0, Span: 0, Arm: 1");
    assert_eq!(json["WWN"], "5000C50056D6C3A4");
    assert_eq!(json["PDType"], "SAS");
    assert_eq!(json["MediaErrorCount"], 3);
    assert_eq!(json["NeedsEKMAttention"], "No");
    assert_eq!(json["DriveSMARTAlert"], "Yes");
}

#[test]
fn test_file_source_feeds_engine() {
    let source = FileSource::new(fixture_path("megacli-ldinfo.txt"));
    let options = ParseOptions::default();

    let entries = discover_devices(&source, EntityKind::LogicalDrive, options).unwrap();
    assert_eq!(entries.len(), 3);

    let err = device_stats(&source, EntityKind::LogicalDrive, "9 (Target Id: 9)", options)
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::EntityNotFound { .. }));
    assert_eq!(err.to_string(), "Logical Drive not exist 9 (Target Id: 9)");
}

#[test]
fn test_wrong_report_for_kind_yields_nothing() {
    let report = fixture("megacli-pdlist.txt");
    let parser = ReportParser::new(ParseOptions { verbose: true });

    assert!(parser.discover(EntityKind::LogicalDrive, &report).is_empty());
    assert!(parser.logical_drives(&report).is_empty());
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}
