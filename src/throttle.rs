//! Refresh throttling for position-driven updates.
//!
//! Position updates can arrive many times per second, but the inventory is
//! re-fetched at most once per interval. The first update after startup
//! always refreshes.

use std::time::Duration;
use tracing::trace;

/// Tracks when the last refresh began
#[derive(Debug, Clone)]
pub struct RefreshThrottle {
    interval_ms: u64,
    last_refresh_ms: Option<u64>,
}

impl RefreshThrottle {
    pub fn new(interval: Duration) -> Self {
        Self::from_millis(u64::try_from(interval.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_refresh_ms: None,
        }
    }

    /// Resume from a previously recorded refresh time
    pub fn with_last_refresh(mut self, last_refresh_ms: u64) -> Self {
        self.last_refresh_ms = Some(last_refresh_ms);
        self
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_refresh_ms(&self) -> Option<u64> {
        self.last_refresh_ms
    }

    /// Check whether a refresh at `now_ms` is permitted, without recording it
    ///
    /// A `now_ms` earlier than the last refresh counts as no time elapsed.
    pub fn should_refresh(&self, now_ms: u64) -> bool {
        match self.last_refresh_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Check and, if permitted, record a refresh beginning at `now_ms`
    pub fn try_begin(&mut self, now_ms: u64) -> bool {
        if self.should_refresh(now_ms) {
            self.last_refresh_ms = Some(now_ms);
            true
        } else {
            trace!(
                "Refresh throttled: {}ms since last refresh, interval {}ms",
                now_ms.saturating_sub(self.last_refresh_ms.unwrap_or(now_ms)),
                self.interval_ms
            );
            false
        }
    }

    /// Forget the last refresh so the next update refreshes immediately
    pub fn reset(&mut self) {
        self.last_refresh_ms = None;
    }
}
