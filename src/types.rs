//! Core types for the cagemetrics pipeline
//!
//! This module defines the data structures handed over by the external
//! annotation collaborator: per-cage frame tables keyed by cage identifier,
//! and the two tracked subject roles within each cage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ProcessError;

/// Tracked subject role within a cage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Individual {
    Individual1,
    Individual2,
}

impl Individual {
    /// Both roles, in the order used everywhere downstream
    pub const ALL: [Individual; 2] = [Individual::Individual1, Individual::Individual2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Individual::Individual1 => "individual1",
            Individual::Individual2 => "individual2",
        }
    }

    /// The other role in the pair
    pub fn partner(&self) -> Individual {
        match self {
            Individual::Individual1 => Individual::Individual2,
            Individual::Individual2 => Individual::Individual1,
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered per-frame table for one cage, stored column-major.
///
/// Row order is time order; every column holds one value per observed frame.
/// Values are the collaborator's numeric indicator flags (0/positive) and the
/// two per-individual speed traces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameTable {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl FrameTable {
    /// Build a table from named columns, rejecting ragged lengths
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, ProcessError> {
        let expected = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        for (name, values) in &columns {
            if values.len() != expected {
                return Err(ProcessError::ShapeMismatch {
                    column: name.clone(),
                    expected,
                    actual: values.len(),
                });
            }
        }

        let (names, values) = columns.into_iter().unzip();
        Ok(Self {
            columns: names,
            values,
        })
    }

    /// Number of observed frames
    pub fn frame_count(&self) -> usize {
        self.values.first().map(|v| v.len()).unwrap_or(0)
    }

    /// Column names in table order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Values of a named column, in frame order
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i].as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Verify the column-major invariant after deserialization.
    ///
    /// Derived `Deserialize` cannot enforce equal column lengths, so anything
    /// that loads a table from disk must call this before processing.
    pub fn check_shape(&self) -> Result<(), ProcessError> {
        if self.columns.len() != self.values.len() {
            return Err(ProcessError::ParseError(format!(
                "{} column names for {} value vectors",
                self.columns.len(),
                self.values.len()
            )));
        }
        let expected = self.frame_count();
        for (name, values) in self.columns.iter().zip(&self.values) {
            if values.len() != expected {
                return Err(ProcessError::ShapeMismatch {
                    column: name.clone(),
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

/// Per-cage frame-table mapping produced by the collaborator.
///
/// Built once per run and treated as immutable afterwards; the BTreeMap keeps
/// cage order stable across every downstream stage.
pub type SupervisedTables = BTreeMap<String, FrameTable>;
