//! Multi-sheet workbook extractor
//!
//! Sheets are scanned in file order and the first one with an amount-like
//! header is used. Sheets after it are never decoded.

use std::io::Cursor;

use calamine::{Data, DataType, Reader, Sheets, open_workbook_auto_from_rs};
use tracing::{debug, info};

use ledgerlens_core::{Error, InputKind, RawTable, Result, TransactionSet, normalize};

use crate::types::Extractor;

/// One worksheet: first row is the header
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub table: RawTable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// First sheet, in file order, whose headers contain an amount-like column.
    pub fn first_valid_sheet(&self) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.table.has_amount_column())
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

type WorkbookReader = Sheets<Cursor<Vec<u8>>>;

fn open_workbook(bytes: &[u8]) -> Result<WorkbookReader> {
    open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(|e| Error::Spreadsheet(e.to_string()))
}

fn read_sheet(wb: &mut WorkbookReader, name: &str) -> Result<Sheet> {
    let range = wb
        .worksheet_range(name)
        .map_err(|e| Error::Spreadsheet(format!("sheet '{name}': {e}")))?;

    let mut rows = range.rows().map(|r| r.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();
    let rows: Vec<Vec<String>> = rows.collect();

    Ok(Sheet {
        name: name.to_string(),
        table: RawTable::new(headers, rows),
    })
}

/// Decode every sheet of a workbook (xlsx, xlsm, xls, ods) into string tables.
pub fn load_workbook(bytes: &[u8]) -> Result<Workbook> {
    let mut wb = open_workbook(bytes)?;
    let sheets = wb
        .sheet_names()
        .iter()
        .map(|name| read_sheet(&mut wb, name))
        .collect::<Result<Vec<_>>>()?;
    Ok(Workbook { sheets })
}

pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn extract_workbook(&self, wb: &Workbook) -> Result<TransactionSet> {
        let sheet = wb.first_valid_sheet().ok_or(Error::NoValidSheet)?;
        debug!(sheet = %sheet.name, total = wb.sheets.len(), "selected worksheet");
        self.extract_sheet(sheet)
    }

    fn extract_sheet(&self, sheet: &Sheet) -> Result<TransactionSet> {
        let set = normalize(&sheet.table, InputKind::Spreadsheet)?;
        info!(count = set.len(), sheet = %sheet.name, "extracted transactions from workbook");
        Ok(set)
    }
}

impl Extractor for SpreadsheetExtractor {
    type Input = [u8];

    const KIND: InputKind = InputKind::Spreadsheet;

    /// Decodes sheets one at a time and stops at the first with an amount column.
    fn extract(&self, input: &[u8]) -> Result<TransactionSet> {
        let mut wb = open_workbook(input)?;
        let names = wb.sheet_names();
        for name in &names {
            let sheet = read_sheet(&mut wb, name)?;
            if sheet.table.has_amount_column() {
                debug!(sheet = %sheet.name, total = names.len(), "selected worksheet");
                return self.extract_sheet(&sheet);
            }
            debug!(sheet = %name, "no amount column");
        }
        Err(Error::NoValidSheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, headers: &[&str], rows: &[&[&str]]) -> Sheet {
        Sheet {
            name: name.to_string(),
            table: RawTable::new(
                headers.iter().map(|s| s.to_string()).collect(),
                rows.iter()
                    .map(|r| r.iter().map(|s| s.to_string()).collect())
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_picks_first_sheet_with_amount() {
        let wb = Workbook {
            sheets: vec![
                sheet("Notes", &["Memo"], &[&["hello"]]),
                sheet("January", &["Date", "Details", "Amount"], &[&["2024-01-05", "Gym", "-40"]]),
                sheet("February", &["Date", "Details", "Amount"], &[&["2024-02-05", "Gym", "-45"]]),
            ],
        };
        let set = SpreadsheetExtractor.extract_workbook(&wb).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].amount, -40.0);
        assert_eq!(set.as_slice()[0].description, "Gym");
    }

    #[test]
    fn test_header_case_and_padding() {
        let wb = Workbook {
            sheets: vec![sheet("S", &["  NET VALUE "], &[&["12.5"]])],
        };
        let set = SpreadsheetExtractor.extract_workbook(&wb).unwrap();
        assert_eq!(set.as_slice()[0].amount, 12.5);
    }

    #[test]
    fn test_no_valid_sheet() {
        let wb = Workbook {
            sheets: vec![sheet("A", &["Date", "Memo"], &[]), sheet("Empty", &[], &[])],
        };
        let err = SpreadsheetExtractor.extract_workbook(&wb).unwrap_err();
        assert!(matches!(err, Error::NoValidSheet));
    }

    #[test]
    fn test_selected_sheet_without_rows() {
        let wb = Workbook {
            sheets: vec![sheet("A", &["Amount"], &[])],
        };
        let err = SpreadsheetExtractor.extract_workbook(&wb).unwrap_err();
        assert!(matches!(err, Error::NoTransactionsDetected { kind: InputKind::Spreadsheet }));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = SpreadsheetExtractor.extract(b"not a workbook").unwrap_err();
        assert!(matches!(err, Error::Spreadsheet(_)));
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Rent".into())), "Rent");
        assert_eq!(cell_text(&Data::Float(-12.5)), "-12.5");
    }
}
