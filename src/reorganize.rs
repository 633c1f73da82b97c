//! Individual-split transform
//!
//! Restructures a cage's flat frame table into a two-level column layout:
//! one block per individual (interactions, then solo behaviors) plus a
//! mutual block for pair-level behaviors. Inner labels are remapped to bare
//! behavior names so both individuals' corresponding columns carry identical
//! names for downstream comparison. The transform is purely structural: it
//! regroups and relabels columns without touching frame counts or values.

use crate::error::ProcessError;
use crate::schema::BehaviorCatalog;
use crate::types::{FrameTable, Individual, SupervisedTables};
use std::collections::BTreeMap;
use std::fmt;

/// Outer column level: which party a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOwner {
    Individual(Individual),
    Mutual,
}

/// Middle column level: behavior grouping within an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    Interactions,
    Solo,
    Mutual,
}

/// Fully qualified column key of a reorganized table.
///
/// Invariant: `behavior` is the bare name, identical for both individuals'
/// corresponding columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorColumn {
    pub owner: ColumnOwner,
    pub group: ColumnGroup,
    pub behavior: String,
}

impl BehaviorColumn {
    /// Source column name this key was relabeled from
    pub fn source_name(&self, catalog: &BehaviorCatalog) -> String {
        match (self.owner, self.group) {
            (ColumnOwner::Individual(ind), ColumnGroup::Interactions) => {
                catalog.interaction_column(ind, &self.behavior)
            }
            (ColumnOwner::Individual(ind), _) => catalog.solo_column(ind, &self.behavior),
            (ColumnOwner::Mutual, _) => catalog.mutual_column(&self.behavior),
        }
    }
}

impl fmt::Display for BehaviorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.owner, self.group) {
            (ColumnOwner::Individual(ind), ColumnGroup::Interactions) => {
                write!(f, "{}/interactions/{}", ind, self.behavior)
            }
            (ColumnOwner::Individual(ind), _) => write!(f, "{}/solo/{}", ind, self.behavior),
            (ColumnOwner::Mutual, _) => write!(f, "mutual/{}", self.behavior),
        }
    }
}

/// One cage's table regrouped under two-level column keys
#[derive(Debug, Clone)]
pub struct ReorganizedTable {
    frame_count: usize,
    columns: Vec<(BehaviorColumn, Vec<f64>)>,
}

impl ReorganizedTable {
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Columns in reorganized order: individual1, individual2, mutual
    pub fn columns(&self) -> &[(BehaviorColumn, Vec<f64>)] {
        &self.columns
    }

    /// Values for a specific column key
    pub fn column(&self, owner: ColumnOwner, group: ColumnGroup, behavior: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(key, _)| key.owner == owner && key.group == group && key.behavior == behavior)
            .map(|(_, values)| values.as_slice())
    }

    /// Map each column back to its source name and values.
    ///
    /// Reorganization is a bijection on cell values; flattening must
    /// reproduce the original columns exactly.
    pub fn flatten(&self, catalog: &BehaviorCatalog) -> Vec<(String, Vec<f64>)> {
        self.columns
            .iter()
            .map(|(key, values)| (key.source_name(catalog), values.clone()))
            .collect()
    }
}

fn fetch_column(
    cage: &str,
    table: &FrameTable,
    name: &str,
) -> Result<Vec<f64>, ProcessError> {
    table
        .column(name)
        .map(|v| v.to_vec())
        .ok_or_else(|| ProcessError::MissingColumn {
            cage: cage.to_string(),
            column: name.to_string(),
        })
}

/// Reorganize one cage's frame table by individual.
///
/// Column order: for each individual, interactions in catalog order followed
/// by solo behaviors in catalog order; then the mutual block.
pub fn reorganize(
    cage: &str,
    table: &FrameTable,
    catalog: &BehaviorCatalog,
) -> Result<ReorganizedTable, ProcessError> {
    let mut columns = Vec::new();

    for individual in Individual::ALL {
        for behavior in &catalog.interactions {
            let source = catalog.interaction_column(individual, behavior);
            columns.push((
                BehaviorColumn {
                    owner: ColumnOwner::Individual(individual),
                    group: ColumnGroup::Interactions,
                    behavior: behavior.clone(),
                },
                fetch_column(cage, table, &source)?,
            ));
        }
        for behavior in &catalog.solo {
            let source = catalog.solo_column(individual, behavior);
            columns.push((
                BehaviorColumn {
                    owner: ColumnOwner::Individual(individual),
                    group: ColumnGroup::Solo,
                    behavior: behavior.clone(),
                },
                fetch_column(cage, table, &source)?,
            ));
        }
    }

    for behavior in &catalog.mutual {
        let source = catalog.mutual_column(behavior);
        columns.push((
            BehaviorColumn {
                owner: ColumnOwner::Mutual,
                group: ColumnGroup::Mutual,
                behavior: behavior.clone(),
            },
            fetch_column(cage, table, &source)?,
        ));
    }

    Ok(ReorganizedTable {
        frame_count: table.frame_count(),
        columns,
    })
}

/// Reorganize every cage, preserving mapping order
pub fn reorganize_all(
    tables: &SupervisedTables,
    catalog: &BehaviorCatalog,
) -> Result<BTreeMap<String, ReorganizedTable>, ProcessError> {
    let mut reorganized = BTreeMap::new();
    for (cage, table) in tables {
        reorganized.insert(cage.clone(), reorganize(cage, table, catalog)?);
    }
    Ok(reorganized)
}
