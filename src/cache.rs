//! Table cache
//!
//! Persists the raw supervised table mapping between the collaborator run
//! and post-processing, so reports can be regenerated without re-running
//! the analysis. The JSON envelope records who wrote the cache and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ProcessError;
use crate::types::SupervisedTables;
use crate::{CAGEMETRICS_VERSION, PRODUCER_NAME};

/// On-disk cache envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCache {
    pub producer: String,
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub tables: SupervisedTables,
}

/// Write the table mapping to a JSON cache file
pub fn save_tables(path: &Path, tables: &SupervisedTables) -> Result<(), ProcessError> {
    let cache = TableCache {
        producer: PRODUCER_NAME.to_string(),
        version: CAGEMETRICS_VERSION.to_string(),
        saved_at: Utc::now(),
        tables: tables.clone(),
    };
    let json = serde_json::to_string(&cache)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), cages = tables.len(), "table cache saved");
    Ok(())
}

/// Load a table mapping from a JSON cache file, checking table shapes
pub fn load_tables(path: &Path) -> Result<SupervisedTables, ProcessError> {
    let content = std::fs::read_to_string(path)?;
    let cache: TableCache = serde_json::from_str(&content)
        .map_err(|e| ProcessError::ParseError(format!("failed to parse table cache: {}", e)))?;
    for table in cache.tables.values() {
        table.check_shape()?;
    }
    Ok(cache.tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::make_schema_table;

    #[test]
    fn test_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supervised_data.json");

        let mut tables = SupervisedTables::new();
        tables.insert("cage_a".to_string(), make_schema_table(5));
        tables.insert("cage_b".to_string(), make_schema_table(2));

        save_tables(&path, &tables).unwrap();
        let loaded = load_tables(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["cage_a"].frame_count(), 5);
        assert_eq!(loaded["cage_b"].frame_count(), 2);
    }

    #[test]
    fn test_envelope_records_producer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supervised_data.json");

        save_tables(&path, &SupervisedTables::new()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["producer"], PRODUCER_NAME);
        assert_eq!(value["version"], CAGEMETRICS_VERSION);
    }

    #[test]
    fn test_corrupt_cache_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supervised_data.json");
        std::fs::write(&path, "{\"tables\": 1}").unwrap();

        assert!(matches!(
            load_tables(&path),
            Err(ProcessError::ParseError(_))
        ));
    }
}
