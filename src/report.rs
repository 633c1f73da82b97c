//! Final merge
//!
//! Turns the stacked per-cage summaries into the two output tables, one row
//! per (cage, individual): the individual's interaction and solo values, the
//! mutual values distributed to both roles, the literal Mouse label, and the
//! individual's speed statistics. Speed rows are attached by an explicit
//! keyed join on (cage, individual), never by row position.

use crate::aggregate::CageSummary;
use crate::error::ProcessError;
use crate::reorganize::{ColumnGroup, ColumnOwner};
use crate::schema::BehaviorCatalog;
use crate::speed::SpeedSummary;
use crate::types::Individual;
use std::collections::BTreeMap;

/// One output row: a cage seen from one individual's perspective
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub cage: String,
    pub mouse: Individual,
    /// Per-behavior values, aligned with `BehaviorReport::behaviors`
    pub values: Vec<f64>,
    pub avg_speed: f64,
    pub std_speed: f64,
}

/// A final output table for one metric (frequency or duration)
#[derive(Debug, Clone)]
pub struct BehaviorReport {
    /// Behavior column headers: interactions, solo, then mutual
    pub behaviors: Vec<String>,
    pub rows: Vec<ReportRow>,
}

/// Merge one metric's cage summaries with the speed summary.
///
/// Rows are stacked individual1 block first, then individual2, cages in
/// summary order within each block; exact duplicate rows are dropped.
pub fn build_report(
    summaries: &[CageSummary],
    speeds: &[SpeedSummary],
    catalog: &BehaviorCatalog,
) -> Result<BehaviorReport, ProcessError> {
    let mut speed_index: BTreeMap<(String, Individual), (f64, f64)> = BTreeMap::new();
    for speed in speeds {
        speed_index.insert(
            (speed.cage.clone(), speed.individual),
            (speed.avg_speed, speed.std_speed),
        );
    }

    let mut rows = Vec::with_capacity(summaries.len() * Individual::ALL.len());
    for individual in Individual::ALL {
        for summary in summaries {
            let values = individual_values(summary, individual, catalog)?;
            let (avg_speed, std_speed) = speed_index
                .get(&(summary.cage.clone(), individual))
                .copied()
                .ok_or_else(|| ProcessError::MissingSpeedSummary {
                    cage: summary.cage.clone(),
                    individual,
                })?;

            rows.push(ReportRow {
                cage: summary.cage.clone(),
                mouse: individual,
                values,
                avg_speed,
                std_speed,
            });
        }
    }

    Ok(BehaviorReport {
        behaviors: catalog.behavior_names(),
        rows: dedup_rows(rows),
    })
}

/// One individual's slice of a cage summary: interactions and solo values in
/// catalog order, with the mutual values appended for both roles
fn individual_values(
    summary: &CageSummary,
    individual: Individual,
    catalog: &BehaviorCatalog,
) -> Result<Vec<f64>, ProcessError> {
    let owner = ColumnOwner::Individual(individual);
    let mut values = Vec::with_capacity(
        catalog.interactions.len() + catalog.solo.len() + catalog.mutual.len(),
    );

    for behavior in &catalog.interactions {
        values.push(lookup(summary, owner, ColumnGroup::Interactions, behavior)?);
    }
    for behavior in &catalog.solo {
        values.push(lookup(summary, owner, ColumnGroup::Solo, behavior)?);
    }
    for behavior in &catalog.mutual {
        values.push(lookup(summary, ColumnOwner::Mutual, ColumnGroup::Mutual, behavior)?);
    }

    Ok(values)
}

fn lookup(
    summary: &CageSummary,
    owner: ColumnOwner,
    group: ColumnGroup,
    behavior: &str,
) -> Result<f64, ProcessError> {
    summary
        .value(owner, group, behavior)
        .ok_or_else(|| ProcessError::MissingColumn {
            cage: summary.cage.clone(),
            column: behavior.to_string(),
        })
}

/// Drop exact duplicate rows, keeping first occurrences.
///
/// Cells are compared by bit pattern so NaN speed statistics compare equal,
/// matching spreadsheet-library duplicate semantics.
fn dedup_rows(rows: Vec<ReportRow>) -> Vec<ReportRow> {
    let mut seen: Vec<(String, Individual, Vec<u64>)> = Vec::new();
    let mut deduped = Vec::with_capacity(rows.len());

    for row in rows {
        let bits: Vec<u64> = row
            .values
            .iter()
            .chain([&row.avg_speed, &row.std_speed])
            .map(|v| v.to_bits())
            .collect();
        let key = (row.cage.clone(), row.mouse, bits);
        if !seen.contains(&key) {
            seen.push(key);
            deduped.push(row);
        }
    }

    deduped
}
