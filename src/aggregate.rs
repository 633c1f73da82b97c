//! Event aggregation
//!
//! Collapses each cage's reorganized table into two summary rows:
//! - row events: the per-column sum of indicator values
//! - event frequency: the per-column count of event onsets (rising edges)
//!
//! Both are divided by the fixed time standardization
//! `frame_count / 1500`, expressing results per 1500-frame-equivalent unit.

use crate::reorganize::{BehaviorColumn, ColumnGroup, ColumnOwner, ReorganizedTable};
use std::collections::BTreeMap;

/// Fixed normalization denominator: summary values are per
/// 1500-frame-equivalent unit. A compatibility constant, not a parameter.
pub const TIME_STANDARD_FRAMES: f64 = 1500.0;

/// One summary row for one cage, tagged with the cage identifier
#[derive(Debug, Clone)]
pub struct CageSummary {
    pub cage: String,
    pub values: Vec<(BehaviorColumn, f64)>,
}

impl CageSummary {
    /// Value for a specific column key
    pub fn value(&self, owner: ColumnOwner, group: ColumnGroup, behavior: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(key, _)| key.owner == owner && key.group == group && key.behavior == behavior)
            .map(|(_, v)| *v)
    }
}

/// Time-normalized column sums for one cage
pub fn row_events(cage: &str, table: &ReorganizedTable) -> CageSummary {
    let standardization = time_standardization(table.frame_count());
    let values = table
        .columns()
        .iter()
        .map(|(key, column)| (key.clone(), column.iter().sum::<f64>() / standardization))
        .collect();

    CageSummary {
        cage: cage.to_string(),
        values,
    }
}

/// Time-normalized onset counts for one cage.
///
/// An onset is a strictly positive frame-to-frame difference; the first
/// frame has no predecessor and contributes nothing, and falling edges
/// count zero.
pub fn event_frequencies(cage: &str, table: &ReorganizedTable) -> CageSummary {
    let standardization = time_standardization(table.frame_count());
    let values = table
        .columns()
        .iter()
        .map(|(key, column)| {
            (
                key.clone(),
                rising_edge_count(column) as f64 / standardization,
            )
        })
        .collect();

    CageSummary {
        cage: cage.to_string(),
        values,
    }
}

/// Per-cage summary rows stacked across all cages, in cage order
#[derive(Debug, Clone)]
pub struct EventSummaries {
    pub row_events: Vec<CageSummary>,
    pub frequencies: Vec<CageSummary>,
}

/// Aggregate every cage's reorganized table
pub fn summarize_events(tables: &BTreeMap<String, ReorganizedTable>) -> EventSummaries {
    let mut rows = Vec::with_capacity(tables.len());
    let mut freqs = Vec::with_capacity(tables.len());

    for (cage, table) in tables {
        rows.push(row_events(cage, table));
        freqs.push(event_frequencies(cage, table));
    }

    EventSummaries {
        row_events: rows,
        frequencies: freqs,
    }
}

fn time_standardization(frame_count: usize) -> f64 {
    frame_count as f64 / TIME_STANDARD_FRAMES
}

fn rising_edge_count(values: &[f64]) -> usize {
    values.windows(2).filter(|w| w[1] - w[0] > 0.0).count()
}
