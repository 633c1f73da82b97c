//! Cagemetrics - behavior-table summarization for paired-mouse recordings
//!
//! Cagemetrics turns the per-cage supervised annotation tables produced by
//! an external pose-estimation pipeline into summary spreadsheets through a
//! deterministic sequence of stages: schema validation → individual-split
//! reorganization → event aggregation → speed summary → keyed merge →
//! spreadsheet export.
//!
//! ## Modules
//!
//! - **Reshaping core**: `schema`, `reorganize`, `aggregate`, `speed`,
//!   `report` - the table transforms
//! - **Project surface**: `config`, `project`, `cache`, `export`,
//!   `pipeline` - config store, session handling, persistence, and output

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod project;
pub mod reorganize;
pub mod report;
pub mod schema;
pub mod speed;
pub mod types;

pub use config::ProjectConfig;
pub use error::ProcessError;
pub use pipeline::{supervised_to_reports, BehaviorPipeline, ProcessedReports};
pub use project::ProjectSession;
pub use schema::BehaviorCatalog;
pub use types::{FrameTable, Individual, SupervisedTables};

/// Crate version recorded in cache envelopes
pub const CAGEMETRICS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name recorded in cache envelopes
pub const PRODUCER_NAME: &str = "cagemetrics";
