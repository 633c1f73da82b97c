//! Collaborator output schema
//!
//! The external annotation library produces, per cage, a fixed set of
//! per-frame columns: one speed trace per individual, solo behavior
//! indicators per individual, directed interaction indicators per ordered
//! (actor, partner) pairing, and mutual pair indicators. This module names
//! that column set and validates incoming tables against it before any
//! reshaping runs, so a missing column fails with the offending cage and
//! column instead of a cryptic mid-transform lookup.

use crate::error::ProcessError;
use crate::types::{FrameTable, Individual, SupervisedTables};

/// Solo behaviors, scored per individual
pub const SOLO_BEHAVIORS: [&str; 4] = ["climbing", "sniffing", "huddle", "lookaround"];

/// Directed interactions, scored per ordered (actor, partner) pairing
pub const INTERACTION_BEHAVIORS: [&str; 3] = ["nose2tail", "nose2body", "following"];

/// Mutual pair behaviors, scored once per cage
pub const MUTUAL_BEHAVIORS: [&str; 3] = ["nose2nose", "sidebyside", "sidereside"];

/// The behavior-category lists driving the individual-split transform.
///
/// Defaults to the fixed set produced by the collaborator; the lists are
/// carried explicitly so the reshaping operations stay independent of the
/// concrete catalog.
#[derive(Debug, Clone)]
pub struct BehaviorCatalog {
    pub solo: Vec<String>,
    pub interactions: Vec<String>,
    pub mutual: Vec<String>,
}

impl Default for BehaviorCatalog {
    fn default() -> Self {
        Self {
            solo: SOLO_BEHAVIORS.iter().map(|s| s.to_string()).collect(),
            interactions: INTERACTION_BEHAVIORS.iter().map(|s| s.to_string()).collect(),
            mutual: MUTUAL_BEHAVIORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl BehaviorCatalog {
    /// Source column holding an individual's speed trace
    pub fn speed_column(&self, individual: Individual) -> String {
        format!("{}_speed", individual.as_str())
    }

    /// Source column for a solo behavior of one individual
    pub fn solo_column(&self, individual: Individual, behavior: &str) -> String {
        format!("{}_{}", individual.as_str(), behavior)
    }

    /// Source column for a directed interaction, actor first
    pub fn interaction_column(&self, actor: Individual, behavior: &str) -> String {
        format!(
            "{}_{}_{}",
            actor.as_str(),
            actor.partner().as_str(),
            behavior
        )
    }

    /// Source column for a mutual pair behavior
    pub fn mutual_column(&self, behavior: &str) -> String {
        format!(
            "{}_{}_{}",
            Individual::Individual1.as_str(),
            Individual::Individual2.as_str(),
            behavior
        )
    }

    /// Every column a collaborator table must carry, in schema order
    pub fn expected_columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for individual in Individual::ALL {
            columns.push(self.speed_column(individual));
        }
        for individual in Individual::ALL {
            for behavior in &self.solo {
                columns.push(self.solo_column(individual, behavior));
            }
        }
        for actor in Individual::ALL {
            for behavior in &self.interactions {
                columns.push(self.interaction_column(actor, behavior));
            }
        }
        for behavior in &self.mutual {
            columns.push(self.mutual_column(behavior));
        }
        columns
    }

    /// Bare behavior names in final-report column order: interactions, solo,
    /// then mutual
    pub fn behavior_names(&self) -> Vec<String> {
        self.interactions
            .iter()
            .chain(self.solo.iter())
            .chain(self.mutual.iter())
            .cloned()
            .collect()
    }
}

/// Expected columns absent from a table, in schema order
pub fn missing_columns(table: &FrameTable, catalog: &BehaviorCatalog) -> Vec<String> {
    catalog
        .expected_columns()
        .into_iter()
        .filter(|c| !table.has_column(c))
        .collect()
}

/// Validate one cage's table against the expected column set.
///
/// A zero-frame table is rejected here as well: the time-standardization
/// denominator downstream would be zero.
pub fn validate_table(
    cage: &str,
    table: &FrameTable,
    catalog: &BehaviorCatalog,
) -> Result<(), ProcessError> {
    table.check_shape()?;

    if table.frame_count() == 0 {
        return Err(ProcessError::EmptyTable {
            cage: cage.to_string(),
        });
    }

    if let Some(column) = missing_columns(table, catalog).into_iter().next() {
        return Err(ProcessError::MissingColumn {
            cage: cage.to_string(),
            column,
        });
    }

    Ok(())
}

/// Validate every cage in the mapping, failing on the first offender
pub fn validate_tables(
    tables: &SupervisedTables,
    catalog: &BehaviorCatalog,
) -> Result<(), ProcessError> {
    for (cage, table) in tables {
        validate_table(cage, table, catalog)?;
    }
    Ok(())
}

/// Parse a cage → table mapping from JSON and check its shape
pub fn parse_tables(json: &str) -> Result<SupervisedTables, ProcessError> {
    let tables: SupervisedTables = serde_json::from_str(json)
        .map_err(|e| ProcessError::ParseError(format!("failed to parse table mapping: {}", e)))?;
    for table in tables.values() {
        table.check_shape()?;
    }
    Ok(tables)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::FrameTable;

    /// A minimal schema-complete table with the given frame count, all
    /// indicators zero and speeds constant
    pub(crate) fn make_schema_table(frames: usize) -> FrameTable {
        let catalog = BehaviorCatalog::default();
        let columns = catalog
            .expected_columns()
            .into_iter()
            .map(|name| (name, vec![0.0; frames]))
            .collect();
        FrameTable::from_columns(columns).unwrap()
    }

    #[test]
    fn test_expected_column_set() {
        let catalog = BehaviorCatalog::default();
        let columns = catalog.expected_columns();

        // 2 speed + 2*4 solo + 2*3 interaction + 3 mutual
        assert_eq!(columns.len(), 19);
        assert!(columns.contains(&"individual1_speed".to_string()));
        assert!(columns.contains(&"individual2_huddle".to_string()));
        assert!(columns.contains(&"individual1_individual2_nose2tail".to_string()));
        assert!(columns.contains(&"individual2_individual1_following".to_string()));
        assert!(columns.contains(&"individual1_individual2_sidereside".to_string()));
        // Mutual columns are never scored in the reverse direction
        assert!(!columns.contains(&"individual2_individual1_nose2nose".to_string()));
    }

    #[test]
    fn test_validate_complete_table() {
        let catalog = BehaviorCatalog::default();
        let table = make_schema_table(10);
        assert!(validate_table("cage_a", &table, &catalog).is_ok());
    }

    #[test]
    fn test_validate_reports_offending_column() {
        let catalog = BehaviorCatalog::default();
        let columns = catalog
            .expected_columns()
            .into_iter()
            .filter(|c| c != "individual2_sniffing")
            .map(|name| (name, vec![0.0; 5]))
            .collect();
        let table = FrameTable::from_columns(columns).unwrap();

        match validate_table("cage_b", &table, &catalog) {
            Err(ProcessError::MissingColumn { cage, column }) => {
                assert_eq!(cage, "cage_b");
                assert_eq!(column, "individual2_sniffing");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let catalog = BehaviorCatalog::default();
        let table = make_schema_table(0);

        assert!(matches!(
            validate_table("cage_c", &table, &catalog),
            Err(ProcessError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_parse_tables_roundtrip() {
        let mut tables = SupervisedTables::new();
        tables.insert("cage_a".to_string(), make_schema_table(3));

        let json = serde_json::to_string(&tables).unwrap();
        let parsed = parse_tables(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["cage_a"].frame_count(), 3);
    }

    #[test]
    fn test_parse_tables_rejects_garbage() {
        assert!(matches!(
            parse_tables("not json"),
            Err(ProcessError::ParseError(_))
        ));
    }
}
