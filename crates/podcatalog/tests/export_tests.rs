//! End-to-end export runs against a temporary matching store.

mod common;

use common::harness::read_csv;
use common::{CreatorBuilder, FeedBuilder, ScanBuilder, TestHarness};

use podcatalog::export::EXPORT_HEADER;
use podcatalog::{DatabaseError, ExportConfig, PodcatalogError};

#[test]
fn test_header_written_for_empty_store() {
    let harness = TestHarness::new();
    let (report, csv) = harness.export_all();

    assert_eq!(csv.header, EXPORT_HEADER.to_vec());
    assert!(csv.rows.is_empty());
    assert_eq!(report.exported_rows, 0);
    assert_eq!(report.joined_rows, 0);
}

#[test]
fn test_scan_duplicates_resolve_to_smallest_row_id() {
    let harness = TestHarness::new();
    harness
        .add_creator(CreatorBuilder::new("adl-1", 10).build())
        .add_scan(ScanBuilder::new(7, 10).itunes_id(700).region("us").build())
        .add_scan(ScanBuilder::new(3, 10).itunes_id(300).region("gb").build())
        .add_scan(ScanBuilder::new(5, 10).itunes_id(500).build());

    let (report, csv) = harness.export_all();

    assert_eq!(report.exported_rows, 1);
    assert_eq!(csv.values("itunesid"), vec!["300"]);
    assert_eq!(csv.values("region"), vec!["GB"]);
}

#[test]
fn test_creator_id_used_when_scan_id_missing() {
    let harness = TestHarness::new();
    harness
        .add_creator(CreatorBuilder::new("adl-555", 20).itunes_id(555).build())
        .add_scan(ScanBuilder::new(1, 20).build())
        .add_feed(FeedBuilder::new(20).itunes_id(777).last_update(1_700_000_000).build());

    let (_, csv) = harness.export_all();

    assert_eq!(csv.values("itunesid"), vec!["555"]);

    let provenance: serde_json::Value =
        serde_json::from_str(&csv.values("external_json")[0]).unwrap();
    assert_eq!(provenance["itunesid"], 555);
    assert_eq!(provenance["creator_itunesid"], 555);
    assert_eq!(provenance["feed_itunesid"], 777);
    assert!(provenance["scan_itunesid"].is_null());
}

#[test]
fn test_blank_names_dropped() {
    let harness = TestHarness::new();
    harness
        .add_creator(CreatorBuilder::new("adl-blank", 30).title("").itunes_id(1).build())
        .add_scan(ScanBuilder::new(1, 30).build())
        .add_feed(FeedBuilder::new(30).title(" ").build());

    let (report, csv) = harness.export_all();

    assert!(csv.rows.is_empty());
    assert_eq!(report.joined_rows, 1);
    assert_eq!(report.dropped_rows, 1);
}

#[test]
fn test_name_falls_back_to_feed_title() {
    let harness = TestHarness::new();
    harness
        .add_creator(CreatorBuilder::new("adl-1", 40).no_title().itunes_id(9).build())
        .add_scan(ScanBuilder::new(1, 40).build())
        .add_feed(FeedBuilder::new(40).title("  The Feed  ").link("https://feed.example").build());

    let (_, csv) = harness.export_all();

    assert_eq!(csv.values("name"), vec!["The Feed"]);
    assert_eq!(csv.values("sample_url"), vec!["https://feed.example"]);
}

#[test]
fn test_rows_ordered_by_feed_recency() {
    let harness = TestHarness::new();
    for (adlid, key, last_update) in [("a", 1, Some(100)), ("b", 2, None), ("c", 3, Some(300))] {
        harness
            .add_creator(CreatorBuilder::new(adlid, key).itunes_id(key * 10).build())
            .add_scan(ScanBuilder::new(key, key).build());
        if let Some(ts) = last_update {
            harness.add_feed(FeedBuilder::new(key).last_update(ts).build());
        }
    }

    let (_, csv) = harness.export_all();

    assert_eq!(csv.values("external_ref"), vec!["c", "a", "b"]);
}

#[test]
fn test_filters_and_paging() {
    let harness = TestHarness::new();
    for key in 1..=4_i64 {
        let region = if key % 2 == 0 { "us" } else { "gb" };
        harness
            .add_creator(CreatorBuilder::new(&format!("adl-{}", key), key).itunes_id(key).build())
            .add_scan(ScanBuilder::new(key, key).region(region).build())
            .add_feed(FeedBuilder::new(key).last_update(1000 - key).build());
    }

    let config = ExportConfig {
        region: Some("GB".to_string()),
        ..harness.export_config()
    };
    let (_, csv) = harness.export(&config).unwrap();
    assert_eq!(csv.values("external_ref"), vec!["adl-1", "adl-3"]);

    let config = ExportConfig {
        limit: 2,
        offset: 1,
        ..harness.export_config()
    };
    let (_, csv) = harness.export(&config).unwrap();
    assert_eq!(csv.values("external_ref"), vec!["adl-2", "adl-3"]);

    let config = ExportConfig {
        limit: 0,
        offset: 3,
        ..harness.export_config()
    };
    let (report, _) = harness.export(&config).unwrap();
    assert_eq!(report.exported_rows, 4);

    let config = ExportConfig {
        itunes_id: Some(4),
        ..harness.export_config()
    };
    let (_, csv) = harness.export(&config).unwrap();
    assert_eq!(csv.values("external_ref"), vec!["adl-4"]);
}

#[test]
fn test_constant_columns() {
    let harness = TestHarness::new();
    harness
        .add_creator(CreatorBuilder::new("adl-1", 1).itunes_id(42).tone("warm").build())
        .add_scan(ScanBuilder::new(1, 1).website("https://show.example").build());

    let config = ExportConfig {
        owner_id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
        ..harness.export_config()
    };
    let (_, csv) = harness.export(&config).unwrap();

    assert_eq!(csv.values("owner_id"), vec!["0f8fad5b-d9cb-469f-a165-70867728950e"]);
    assert_eq!(csv.values("vibe"), vec!["warm"]);
    let provenance: serde_json::Value =
        serde_json::from_str(&csv.values("external_json")[0]).unwrap();
    assert_eq!(provenance["creator_tone"], "warm");
    assert_eq!(csv.values("region"), vec!["UK"]);
    assert_eq!(csv.values("price_gbp"), vec!["50"]);
    assert_eq!(csv.values("available"), vec!["true"]);
    assert_eq!(csv.values("can_negotiate"), vec!["false"]);
    assert_eq!(csv.values("audience_band"), vec![""]);
    assert_eq!(csv.values("sample_url"), vec!["https://show.example"]);
    assert_eq!(csv.values("created_at"), vec!["2026-03-14T12:00:00.000000Z"]);
    assert_eq!(csv.values("created_at"), csv.values("updated_at"));
}

#[test]
fn test_default_output_path_is_dated() {
    let harness = TestHarness::new();
    let config = ExportConfig {
        output: None,
        ..harness.export_config()
    };
    let expected = config.output_path(common::harness::run_at());

    assert!(expected.ends_with("exports/catalog_podcasts_20260314.csv"));
    assert_eq!(harness.export_config().output_path(common::harness::run_at()), harness.output_path);
}

#[test]
fn test_missing_store_reported() {
    let harness = TestHarness::new();
    let config = ExportConfig {
        database: harness.path().join("nope.db"),
        ..harness.export_config()
    };

    let err = harness.export(&config).unwrap_err();
    assert!(matches!(
        err,
        PodcatalogError::Database(DatabaseError::NotFound { .. })
    ));
    assert!(err.to_string().contains("DB not found"));
    assert!(!harness.output_path.exists());
}

#[test]
fn test_invalid_owner_id_rejected_before_reading() {
    let harness = TestHarness::new();
    let config = ExportConfig {
        owner_id: "owner".to_string(),
        database: harness.path().join("nope.db"),
        ..harness.export_config()
    };

    let err = harness.export(&config).unwrap_err();
    assert!(matches!(err, PodcatalogError::Config(_)));
    assert!(!harness.output_path.exists());
}

#[test]
fn test_csv_quotes_embedded_commas() {
    let harness = TestHarness::new();
    harness
        .add_creator(CreatorBuilder::new("adl-1", 1).title("Tea, Toast \"and\" Talk").itunes_id(5).build())
        .add_scan(ScanBuilder::new(1, 1).build());

    let (report, _) = harness.export_all();
    let csv = read_csv(&report.output);
    assert_eq!(csv.values("name"), vec!["Tea, Toast \"and\" Talk"]);
}
