//! Excel workbook reader backed by calamine

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::domain::ingestion::{Cell, SheetRow, SpreadsheetReader};
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

impl XlsxReader {
    pub fn new() -> Self {
        Self
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}

impl SpreadsheetReader for XlsxReader {
    fn read_first_sheet(&self, path: &Path) -> Result<Vec<SheetRow>, DomainError> {
        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e| DomainError::ingestion(format!("Cannot open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| DomainError::ingestion("Workbook has no worksheet"))?
            .map_err(|e| DomainError::ingestion(format!("Cannot read worksheet: {}", e)))?;

        // The range starts at the first used cell, not at A1.
        let (first_row, first_col) = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0));

        Ok(range
            .rows()
            .enumerate()
            .map(|(i, row)| {
                let mut cells = vec![Cell::Empty; first_col];
                cells.extend(row.iter().map(to_cell));
                SheetRow {
                    number: first_row + i + 1,
                    cells,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::extract_row;
    use crate::domain::subject::SchemeKind;
    use std::io::Write;

    #[test]
    fn test_cell_conversion() {
        assert_eq!(to_cell(&Data::Int(3)), Cell::Number(3.0));
        assert_eq!(to_cell(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(
            to_cell(&Data::String("Trees".into())),
            Cell::Text("Trees".into())
        );
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Bool(true)), Cell::Bool(true));
    }

    #[test]
    fn test_reads_workbook_with_empty_first_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qb.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(1, 1, "What is a binary tree?").unwrap();
        sheet.write_string(1, 2, "Trees").unwrap();
        sheet.write_number(1, 3, 2.0).unwrap();
        sheet.write_string(2, 1, "Explain heap sort.").unwrap();
        sheet.write_string(2, 2, "Heaps").unwrap();
        sheet.write_number(2, 3, 7.5).unwrap();
        workbook.save(&path).unwrap();

        let rows = XlsxReader::new().read_first_sheet(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].number, 3);
        assert_eq!(rows[0].cells[0], Cell::Empty);
        assert_eq!(rows[0].cells[1], Cell::Text("What is a binary tree?".into()));
        assert_eq!(rows[0].cells[2], Cell::Text("Trees".into()));
        assert_eq!(rows[0].cells[3], Cell::Number(2.0));
        assert_eq!(rows[1].cells[3], Cell::Number(7.5));

        let question = extract_row(SchemeKind::Mark, &rows[1].cells).unwrap();
        assert_eq!(question.text, "Explain heap sort.");
        assert_eq!(question.module, "Heaps");
    }

    #[test]
    fn test_non_workbook_is_ingestion_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"serial,question,module,mark\n1,What is a tree?,Trees,2\n")
            .unwrap();

        let result = XlsxReader::new().read_first_sheet(file.path());
        assert!(matches!(result, Err(DomainError::Ingestion { .. })));
    }

    #[test]
    fn test_missing_file_is_ingestion_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = XlsxReader::new().read_first_sheet(&dir.path().join("qb.xlsx"));
        assert!(matches!(result, Err(DomainError::Ingestion { .. })));
    }
}
