//! Speed summary
//!
//! Mean and standard deviation of each individual's speed trace, one row
//! per (cage, individual). Standard deviation uses the sample (n-1)
//! convention; a single-frame cage yields NaN, which is accepted and
//! propagated rather than treated as an error.

use crate::error::ProcessError;
use crate::schema::BehaviorCatalog;
use crate::types::{Individual, SupervisedTables};

/// Speed statistics for one individual in one cage
#[derive(Debug, Clone)]
pub struct SpeedSummary {
    pub cage: String,
    pub individual: Individual,
    pub avg_speed: f64,
    pub std_speed: f64,
}

/// Summarize speeds for every (cage, individual) pair, cages in mapping
/// order and individuals in role order
pub fn summarize_speeds(
    tables: &SupervisedTables,
    catalog: &BehaviorCatalog,
) -> Result<Vec<SpeedSummary>, ProcessError> {
    let mut summaries = Vec::with_capacity(tables.len() * Individual::ALL.len());

    for (cage, table) in tables {
        for individual in Individual::ALL {
            let column = catalog.speed_column(individual);
            let values =
                table
                    .column(&column)
                    .ok_or_else(|| ProcessError::MissingColumn {
                        cage: cage.clone(),
                        column: column.clone(),
                    })?;

            summaries.push(SpeedSummary {
                cage: cage.clone(),
                individual,
                avg_speed: mean(values),
                std_speed: sample_std(values),
            });
        }
    }

    Ok(summaries)
}

/// Arithmetic mean; NaN for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n-1 denominator); NaN below two values
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::make_schema_table;
    use crate::types::FrameTable;

    fn make_speed_table(speed1: &[f64], speed2: &[f64]) -> FrameTable {
        let catalog = BehaviorCatalog::default();
        let columns = catalog
            .expected_columns()
            .into_iter()
            .map(|name| {
                let values = match name.as_str() {
                    "individual1_speed" => speed1.to_vec(),
                    "individual2_speed" => speed2.to_vec(),
                    _ => vec![0.0; speed1.len()],
                };
                (name, values)
            })
            .collect();
        FrameTable::from_columns(columns).unwrap()
    }

    #[test]
    fn test_mean_and_sample_std() {
        // speed [2.0, 4.0]: mean 3.0, sample std sqrt(2)
        let mut tables = SupervisedTables::new();
        tables.insert(
            "cage_a".to_string(),
            make_speed_table(&[2.0, 4.0], &[1.0, 1.0]),
        );

        let summaries = summarize_speeds(&tables, &BehaviorCatalog::default()).unwrap();
        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.individual, Individual::Individual1);
        assert!((first.avg_speed - 3.0).abs() < 1e-9);
        assert!((first.std_speed - 2.0_f64.sqrt()).abs() < 1e-9);

        let second = &summaries[1];
        assert_eq!(second.individual, Individual::Individual2);
        assert!((second.avg_speed - 1.0).abs() < 1e-9);
        assert!(second.std_speed.abs() < 1e-9);
    }

    #[test]
    fn test_single_frame_std_is_nan() {
        let mut tables = SupervisedTables::new();
        tables.insert("cage_a".to_string(), make_speed_table(&[5.0], &[7.0]));

        let summaries = summarize_speeds(&tables, &BehaviorCatalog::default()).unwrap();
        assert!((summaries[0].avg_speed - 5.0).abs() < 1e-9);
        assert!(summaries[0].std_speed.is_nan());
    }

    #[test]
    fn test_rows_follow_cage_then_role_order() {
        let mut tables = SupervisedTables::new();
        tables.insert("cage_b".to_string(), make_schema_table(2));
        tables.insert("cage_a".to_string(), make_schema_table(2));

        let summaries = summarize_speeds(&tables, &BehaviorCatalog::default()).unwrap();
        let keys: Vec<(String, Individual)> = summaries
            .iter()
            .map(|s| (s.cage.clone(), s.individual))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("cage_a".to_string(), Individual::Individual1),
                ("cage_a".to_string(), Individual::Individual2),
                ("cage_b".to_string(), Individual::Individual1),
                ("cage_b".to_string(), Individual::Individual2),
            ]
        );
    }

    #[test]
    fn test_missing_speed_column_is_fatal() {
        let table = FrameTable::from_columns(vec![(
            "individual1_speed".to_string(),
            vec![1.0],
        )])
        .unwrap();
        let mut tables = SupervisedTables::new();
        tables.insert("cage_a".to_string(), table);

        match summarize_speeds(&tables, &BehaviorCatalog::default()) {
            Err(ProcessError::MissingColumn { cage, column }) => {
                assert_eq!(cage, "cage_a");
                assert_eq!(column, "individual2_speed");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }
}
