//! Spreadsheet export
//!
//! Serializes a final report to a single-sheet xlsx workbook: a header row
//! of `cage`, the behavior names, `Mouse`, and the two speed statistics,
//! then one row per (cage, individual). NaN cells are left blank, since
//! spreadsheets cannot represent NaN. Writes are whole-file overwrites.

use crate::error::ProcessError;
use crate::report::BehaviorReport;
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Write one report to an xlsx workbook at `path`
pub fn write_report(report: &BehaviorReport, path: &Path) -> Result<(), ProcessError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let mouse_col = (report.behaviors.len() + 1) as u16;
    worksheet.write_string(0, 0, "cage")?;
    for (i, behavior) in report.behaviors.iter().enumerate() {
        worksheet.write_string(0, (i + 1) as u16, behavior.as_str())?;
    }
    worksheet.write_string(0, mouse_col, "Mouse")?;
    worksheet.write_string(0, mouse_col + 1, "avg_speed")?;
    worksheet.write_string(0, mouse_col + 2, "std_speed")?;

    for (r, row) in report.rows.iter().enumerate() {
        let excel_row = (r + 1) as u32;
        worksheet.write_string(excel_row, 0, row.cage.as_str())?;
        for (c, value) in row.values.iter().enumerate() {
            write_cell(worksheet, excel_row, (c + 1) as u16, *value)?;
        }
        worksheet.write_string(excel_row, mouse_col, row.mouse.as_str())?;
        write_cell(worksheet, excel_row, mouse_col + 1, row.avg_speed)?;
        write_cell(worksheet, excel_row, mouse_col + 2, row.std_speed)?;
    }

    workbook.save(path)?;
    tracing::debug!(path = %path.display(), rows = report.rows.len(), "wrote report");
    Ok(())
}

fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: f64,
) -> Result<(), ProcessError> {
    // NaN (degenerate statistics) becomes a blank cell
    if !value.is_nan() {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRow;
    use crate::types::Individual;

    fn make_test_report() -> BehaviorReport {
        BehaviorReport {
            behaviors: vec!["nose2tail".to_string(), "climbing".to_string()],
            rows: vec![
                ReportRow {
                    cage: "cage_a".to_string(),
                    mouse: Individual::Individual1,
                    values: vec![500.0, 1000.0],
                    avg_speed: 3.0,
                    std_speed: f64::NAN,
                },
                ReportRow {
                    cage: "cage_a".to_string(),
                    mouse: Individual::Individual2,
                    values: vec![0.0, 250.0],
                    avg_speed: 2.5,
                    std_speed: 0.5,
                },
            ],
        }
    }

    #[test]
    fn test_write_report_creates_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("behavior_frequencies.xlsx");

        write_report(&make_test_report(), &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_report_to_bad_path_fails() {
        let result = write_report(
            &make_test_report(),
            Path::new("/nonexistent-dir/report.xlsx"),
        );
        assert!(result.is_err());
    }
}
