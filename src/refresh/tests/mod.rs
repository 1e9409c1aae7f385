//! Tests for the throttled refresh controller

use crate::error::{PlantError, Result};
use crate::geo::GeoPoint;
use crate::models::RankedRecord;
use crate::parser::RecordParser;
use crate::refresh::{RefreshController, RefreshOutcome};
use crate::selector::ProximitySelector;
use crate::sink::RecordSink;
use crate::source::InventorySource;
use crate::throttle::RefreshThrottle;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const INVENTORY: &str = "s_id,cname1,cname2,cname3,genus,species,cultivar,lon,lat,dbh,height
P1,Red Maple,,,Acer,rubrum,,-75.0000,40.0003,,8
P2,White Oak,,,Quercus,alba,,-75.0000,40.0001,,12
P3,Far Pine,,,Pinus,strobus,,-75.1000,40.1000,,20
";

/// Serves fixed text and counts fetches
#[derive(Clone)]
struct StaticSource {
    text: String,
    fetches: Arc<AtomicUsize>,
}

impl StaticSource {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl InventorySource for StaticSource {
    async fn fetch(&self) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

struct FailingSource;

impl InventorySource for FailingSource {
    async fn fetch(&self) -> Result<String> {
        Err(PlantError::source_fetch("test://inventory", "unreachable"))
    }
}

#[derive(Default)]
struct RecordingSink {
    positions: Vec<GeoPoint>,
    renders: Vec<Vec<String>>,
}

impl RecordSink for RecordingSink {
    fn update_user_position(&mut self, position: &GeoPoint) -> Result<()> {
        self.positions.push(*position);
        Ok(())
    }

    fn render(&mut self, ranked: &[RankedRecord]) -> Result<()> {
        self.renders
            .push(ranked.iter().map(|r| r.id().to_string()).collect());
        Ok(())
    }
}

fn controller<S: InventorySource>(source: S) -> RefreshController<S, RecordingSink> {
    RefreshController::new(
        source,
        RecordingSink::default(),
        RecordParser::new(),
        ProximitySelector::new(100.0, 10),
        RefreshThrottle::from_millis(10_000),
    )
}

fn here() -> GeoPoint {
    GeoPoint::new(40.0, -75.0)
}

#[tokio::test]
async fn test_first_update_refreshes() {
    let mut controller = controller(StaticSource::new(INVENTORY));

    let outcome = controller.on_position(here(), 1000).await.unwrap();

    match outcome {
        RefreshOutcome::Refreshed(report) => {
            assert_eq!(report.selected, 2);
            assert_eq!(report.parse_stats.records_retained, 3);
            assert!(report.nearest_meters.unwrap() < 20.0);
        }
        RefreshOutcome::Throttled => panic!("first update must refresh"),
    }

    assert_eq!(controller.sink().renders, vec![vec!["P2", "P1"]]);
}

#[tokio::test]
async fn test_throttled_update_still_moves_user() {
    let source = StaticSource::new(INVENTORY);
    let fetches = source.fetches.clone();
    let mut controller = controller(source);

    controller.on_position(here(), 1000).await.unwrap();
    let outcome = controller
        .on_position(GeoPoint::new(40.0001, -75.0), 5000)
        .await
        .unwrap();

    assert_eq!(outcome, RefreshOutcome::Throttled);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(controller.sink().positions.len(), 2);
    assert_eq!(controller.sink().renders.len(), 1);

    let outcome = controller.on_position(here(), 11_001).await.unwrap();
    assert!(matches!(outcome, RefreshOutcome::Refreshed(_)));
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fetch_failure_leaves_sink_untouched() {
    let mut controller = controller(FailingSource);

    let result = controller.on_position(here(), 1000).await;

    assert!(matches!(result, Err(PlantError::SourceFetch { .. })));
    assert!(controller.sink().renders.is_empty());
    assert_eq!(controller.sink().positions.len(), 1);

    // The attempt counts against the interval
    assert_eq!(controller.throttle().last_refresh_ms(), Some(1000));
    let outcome = controller.on_position(here(), 2000).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Throttled);
}

#[tokio::test]
async fn test_refresh_bypasses_throttle() {
    let mut controller = controller(StaticSource::new(INVENTORY));

    controller.refresh(&here()).await.unwrap();
    controller.refresh(&here()).await.unwrap();

    assert_eq!(controller.sink().renders.len(), 2);
    assert_eq!(controller.throttle().last_refresh_ms(), None);
}

#[tokio::test]
async fn test_empty_result_is_still_rendered() {
    let mut controller = controller(StaticSource::new(INVENTORY));

    controller
        .on_position(GeoPoint::new(-33.8688, 151.2093), 0)
        .await
        .unwrap();

    assert_eq!(controller.into_sink().renders, vec![Vec::<String>::new()]);
}
