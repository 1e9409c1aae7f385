//! Parsing statistics and result structures for inventory parsing

use crate::models::PlantRecord;

/// Parsed records together with row statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records satisfying the retention invariant, in input order
    pub records: Vec<PlantRecord>,

    pub stats: ParseStats,
}

/// Row-level parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Data rows encountered after the header
    pub total_rows: usize,

    /// Rows that became records
    pub records_retained: usize,

    /// Rows with fewer fields than the inventory layout
    pub rows_padded: usize,

    /// Rows dropped for a missing id or coordinates
    pub rows_dropped: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of data rows that became records
    pub fn retention_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.records_retained as f64 / self.total_rows as f64) * 100.0
        }
    }
}
