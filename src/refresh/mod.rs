//! Position-driven refresh loop.
//!
//! [`RefreshController`] ties the pieces together for each position update:
//! the sink always learns the new user position, and when the throttle
//! permits, the inventory is fetched, parsed and ranked from scratch and the
//! result handed to the sink. A failed fetch leaves the sink untouched.

use crate::config::Config;
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::parser::{ParseStats, RecordParser};
use crate::selector::ProximitySelector;
use crate::sink::RecordSink;
use crate::source::InventorySource;
use crate::throttle::RefreshThrottle;
use std::time::Instant;
use tracing::{debug, error, info};

#[cfg(test)]
pub mod tests;

/// What happened for one position update
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Too soon after the previous refresh; only the user position moved
    Throttled,
    Refreshed(RefreshReport),
}

/// Summary of a completed refresh
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub parse_stats: ParseStats,
    pub selected: usize,
    pub nearest_meters: Option<f64>,
    pub elapsed_ms: u128,
}

/// Drives fetch, parse, select and render for position updates
pub struct RefreshController<S, K> {
    source: S,
    sink: K,
    parser: RecordParser,
    selector: ProximitySelector,
    throttle: RefreshThrottle,
}

impl<S: InventorySource, K: RecordSink> RefreshController<S, K> {
    pub fn new(
        source: S,
        sink: K,
        parser: RecordParser,
        selector: ProximitySelector,
        throttle: RefreshThrottle,
    ) -> Self {
        Self {
            source,
            sink,
            parser,
            selector,
            throttle,
        }
    }

    /// Build a controller from validated configuration
    pub fn from_config(config: &Config, source: S, sink: K) -> Self {
        Self::new(
            source,
            sink,
            config.parser(),
            config.selector(),
            config.throttle(),
        )
    }

    /// Handle a position update delivered at `now_ms`
    ///
    /// The throttle timestamp is recorded before fetching, so a failing
    /// source is not retried until the interval has passed again.
    pub async fn on_position(&mut self, position: GeoPoint, now_ms: u64) -> Result<RefreshOutcome> {
        self.sink.update_user_position(&position)?;

        if !self.throttle.try_begin(now_ms) {
            return Ok(RefreshOutcome::Throttled);
        }

        self.refresh(&position).await.map(RefreshOutcome::Refreshed)
    }

    /// Fetch, parse, rank and render immediately, bypassing the throttle
    pub async fn refresh(&mut self, position: &GeoPoint) -> Result<RefreshReport> {
        let start = Instant::now();
        debug!("Refreshing nearby plants for {}", position);

        let raw_text = match self.source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                error!("Inventory fetch failed, keeping previous markers: {}", e);
                return Err(e);
            }
        };

        let parsed = self.parser.parse_with_stats(&raw_text);
        let ranked = self.selector.select(position, &parsed.records);

        self.sink.render(&ranked)?;

        let report = RefreshReport {
            parse_stats: parsed.stats,
            selected: ranked.len(),
            nearest_meters: ranked.first().map(|r| r.distance_meters),
            elapsed_ms: start.elapsed().as_millis(),
        };

        info!(
            "Refreshed: {} of {} records within {}m (nearest {})",
            report.selected,
            report.parse_stats.records_retained,
            self.selector.radius_meters,
            report
                .nearest_meters
                .map(|d| format!("{:.1}m", d))
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(report)
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn throttle(&self) -> &RefreshThrottle {
        &self.throttle
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}
