//! Integration tests for the file-backed refresh loop
//!
//! These tests write a small inventory to a temporary directory and drive it
//! through configuration, the refresh controller and the JSON lines sink the
//! same way the CLI does.

use plant_proximity::cli::commands::replay::replay_track;
use plant_proximity::cli::track::parse_track;
use plant_proximity::sink::JsonLinesSink;
use plant_proximity::sink::json_lines::RefreshFrame;
use plant_proximity::{
    Config, DataSource, GeoPoint, InventorySource, RefreshController, RefreshOutcome,
    parse_records, select,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Meters per degree of latitude on the haversine sphere
const METERS_PER_DEGREE: f64 = 6_371_000.0 * std::f64::consts::PI / 180.0;

/// Inventory with plants 50 m, 200 m and 5000 m north of (40, -75)
fn write_inventory(dir: &TempDir) -> PathBuf {
    let lat = |meters: f64| 40.0 + meters / METERS_PER_DEGREE;
    let content = format!(
        "s_id,cname1,cname2,cname3,genus,species,cultivar,lon,lat,dbh,height\n\
         NEAR,Red Maple,Swamp Maple,,Acer,rubrum,,-75.0,{},,6\n\
         FAR,White Pine,,,Pinus,strobus,,-75.0,{},,20\n\
         MID,White Oak,,,Quercus,alba,,-75.0,{},,\n\
         BAD,Nowhere,,,Ulmus,americana,,,,,\n",
        lat(50.0),
        lat(5000.0),
        lat(200.0)
    );

    let path = dir.path().join("ABG.csv");
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_file_source_parse_and_select() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(&temp_dir);

    let raw = DataSource::File(path).fetch().await.unwrap();
    let records = parse_records(&raw);
    assert_eq!(records.len(), 3);

    let ranked = select(&GeoPoint::new(40.0, -75.0), &records, 1000.0, 2);
    let ids: Vec<&str> = ranked.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["NEAR", "MID"]);
    assert_eq!(ranked[0].record.label(), "Swamp Maple, Red Maple");
}

#[tokio::test]
async fn test_controller_with_json_sink() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(&temp_dir);

    let config = Config::default()
        .with_source(path.to_string_lossy())
        .with_radius_meters(1000.0)
        .with_result_limit(10);
    config.validate().unwrap();

    let mut controller = RefreshController::from_config(
        &config,
        config.data_source(),
        JsonLinesSink::new(Vec::new(), config.palette_seed),
    );

    let outcome = controller
        .on_position(GeoPoint::new(40.0, -75.0), 0)
        .await
        .unwrap();
    assert!(matches!(outcome, RefreshOutcome::Refreshed(_)));

    let output = String::from_utf8(controller.into_sink().into_inner()).unwrap();
    let frame: RefreshFrame = serde_json::from_str(output.trim()).unwrap();

    let ids: Vec<&str> = frame.markers.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["NEAR", "MID"]);
    assert_eq!(frame.markers[0].height_meters, 6.0);
    assert_eq!(frame.markers[1].height_meters, 1.0);
    assert!(frame.markers[0].colour.starts_with("hsl("));
}

#[tokio::test]
async fn test_replay_track_throttles() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(&temp_dir);

    let config = Config::default()
        .with_source(path.to_string_lossy())
        .with_radius_meters(1000.0)
        .with_refresh_interval_ms(10_000);

    let track = parse_track(
        "1000,40.0,-75.0\n\
         5000,40.0,-75.0\n\
         11001,40.0,-75.0\n\
         12000,40.0,-75.0\n",
    )
    .unwrap();

    let summary = replay_track(
        &config,
        JsonLinesSink::new(Vec::new(), 0),
        &track,
        None,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.positions_processed, 4);
    assert_eq!(summary.refreshes, 2);
    assert_eq!(summary.throttled, 2);
    assert_eq!(summary.fetch_failures, 0);
    assert_eq!(summary.records_rendered, 4);
}

#[tokio::test]
async fn test_replay_counts_fetch_failures() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default()
        .with_source(temp_dir.path().join("missing.csv").to_string_lossy())
        .with_refresh_interval_ms(1000);

    let track = parse_track("0,40.0,-75.0\n500,40.0,-75.0\n1500,40.0,-75.0\n").unwrap();

    let summary = replay_track(
        &config,
        JsonLinesSink::new(Vec::new(), 0),
        &track,
        None,
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.fetch_failures, 2);
    assert_eq!(summary.throttled, 1);
    assert_eq!(summary.refreshes, 0);
}

#[tokio::test]
async fn test_replay_stops_when_cancelled() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_inventory(&temp_dir);
    let config = Config::default().with_source(path.to_string_lossy());

    let token = CancellationToken::new();
    token.cancel();

    let track = parse_track("0,40.0,-75.0\n").unwrap();
    let result = replay_track(
        &config,
        JsonLinesSink::new(Vec::new(), 0),
        &track,
        None,
        &token,
    )
    .await;

    assert!(result.is_err());
}
