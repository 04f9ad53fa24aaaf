use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{MapperError, Result};
use crate::sheet::{CellValue, SheetTable};

/// Reads the first worksheet of the workbook at `path`. The first row is
/// taken as the header row.
pub fn read_first_sheet(path: &Path) -> Result<SheetTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    first_sheet(&mut workbook)
}

/// Reads the first worksheet of an in-memory workbook.
pub fn read_first_sheet_from_bytes(bytes: &[u8]) -> Result<SheetTable> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    first_sheet(&mut workbook)
}

/// Reads a named worksheet of an in-memory workbook.
pub fn read_sheet_from_bytes(bytes: &[u8], name: &str) -> Result<SheetTable> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    read_required_sheet(&mut workbook, name)
}

fn first_sheet<R: Read + Seek>(workbook: &mut Xlsx<R>) -> Result<SheetTable> {
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MapperError::Schema("workbook contains no worksheet".into()))?;
    read_required_sheet(workbook, &name)
}

fn read_required_sheet<R: Read + Seek>(workbook: &mut Xlsx<R>, name: &str) -> Result<SheetTable> {
    let range = workbook
        .worksheet_range(name)
        .ok_or_else(|| MapperError::Schema(format!("missing sheet '{name}'")))??;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| to_cell_value(cell).to_string().trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let mut table = SheetTable::new(name, columns);
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(to_cell_value).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.rows.push(cells);
    }

    Ok(table)
}

fn to_cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Empty => CellValue::Empty,
        other => CellValue::text(other.to_string()),
    }
}
