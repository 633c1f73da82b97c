//! Pipeline orchestration
//!
//! The public API for turning a supervised table mapping into the two
//! summary workbooks. Stages:
//! 1. Schema validation - every cage checked up front
//! 2. Individual-split reorganization
//! 3. Event aggregation (row events + event frequencies)
//! 4. Speed summary
//! 5. Keyed merge into the final frequency and duration tables

use crate::aggregate::summarize_events;
use crate::error::ProcessError;
use crate::export::write_report;
use crate::reorganize::reorganize_all;
use crate::report::{build_report, BehaviorReport};
use crate::schema::{validate_tables, BehaviorCatalog};
use crate::speed::summarize_speeds;
use crate::types::SupervisedTables;
use std::path::Path;

/// Default output file name for the frequency table
pub const DEFAULT_FREQUENCY_FILE: &str = "behavior_frequencies.xlsx";

/// Default output file name for the duration table
pub const DEFAULT_DURATION_FILE: &str = "behavior_durations.xlsx";

/// The two final output tables
#[derive(Debug, Clone)]
pub struct ProcessedReports {
    /// Event onsets per 1500-frame-equivalent unit
    pub frequency: BehaviorReport,
    /// Indicator sums per 1500-frame-equivalent unit
    pub duration: BehaviorReport,
}

/// Convert a supervised table mapping into the final reports using the
/// default behavior catalog.
///
/// # Example
/// ```ignore
/// let tables = cagemetrics::schema::parse_tables(&json)?;
/// let reports = cagemetrics::supervised_to_reports(&tables)?;
/// ```
pub fn supervised_to_reports(tables: &SupervisedTables) -> Result<ProcessedReports, ProcessError> {
    BehaviorPipeline::new().process(tables)
}

/// Reusable processor carrying a behavior catalog.
///
/// Use this when processing several projects with the same (possibly
/// non-default) catalog.
pub struct BehaviorPipeline {
    catalog: BehaviorCatalog,
}

impl Default for BehaviorPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorPipeline {
    /// Create a pipeline with the default collaborator catalog
    pub fn new() -> Self {
        Self {
            catalog: BehaviorCatalog::default(),
        }
    }

    /// Create a pipeline with a specific behavior catalog
    pub fn with_catalog(catalog: BehaviorCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BehaviorCatalog {
        &self.catalog
    }

    /// Run the full pipeline in memory
    pub fn process(&self, tables: &SupervisedTables) -> Result<ProcessedReports, ProcessError> {
        validate_tables(tables, &self.catalog)?;
        tracing::info!(cages = tables.len(), "processing supervised tables");

        let reorganized = reorganize_all(tables, &self.catalog)?;
        let summaries = summarize_events(&reorganized);
        let speeds = summarize_speeds(tables, &self.catalog)?;

        let frequency = build_report(&summaries.frequencies, &speeds, &self.catalog)?;
        let duration = build_report(&summaries.row_events, &speeds, &self.catalog)?;

        Ok(ProcessedReports {
            frequency,
            duration,
        })
    }

    /// Run the pipeline and write both workbooks
    pub fn process_and_save(
        &self,
        tables: &SupervisedTables,
        frequency_path: &Path,
        duration_path: &Path,
    ) -> Result<ProcessedReports, ProcessError> {
        let reports = self.process(tables)?;
        write_report(&reports.frequency, frequency_path)?;
        write_report(&reports.duration, duration_path)?;
        tracing::info!(
            frequencies = %frequency_path.display(),
            durations = %duration_path.display(),
            "reports saved"
        );
        Ok(reports)
    }
}
