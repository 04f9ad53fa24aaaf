use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::Result;
use crate::sheet::{CellValue, SheetTable, WorkbookData};

/// Padding added to the widest cell of every column.
pub const COLUMN_PADDING: usize = 2;

/// Writes the provided workbook data to the given path, replacing any
/// existing file.
pub fn write_workbook(path: &Path, workbook: &WorkbookData) -> Result<()> {
    let bytes = workbook_to_bytes(workbook)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialises the workbook into an in-memory XLSX container.
pub fn workbook_to_bytes(workbook: &WorkbookData) -> Result<Vec<u8>> {
    let mut workbook_writer = Workbook::new();

    for table in &workbook.tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        for (col_idx, width) in column_widths(table).into_iter().enumerate() {
            worksheet.set_column_width(col_idx as u16, width as f64)?;
        }
    }

    Ok(workbook_writer.save_to_buffer()?)
}

/// Auto-fit width of every column: the longest rendered value in the column,
/// header included, plus [`COLUMN_PADDING`].
pub fn column_widths(table: &SheetTable) -> Vec<usize> {
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .max(table.columns.len());

    (0..width)
        .map(|col| {
            let header = table
                .columns
                .get(col)
                .map(|name| name.chars().count())
                .unwrap_or(0);
            let widest_cell = table
                .rows
                .iter()
                .map(|row| row.get(col).map(CellValue::display_len).unwrap_or(0))
                .max()
                .unwrap_or(0);
            header.max(widest_cell) + COLUMN_PADDING
        })
        .collect()
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        CellValue::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        CellValue::Empty => {}
    }
    Ok(())
}
