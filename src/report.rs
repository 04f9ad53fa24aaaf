use crate::error::Result;
use crate::io::excel_write;
use crate::model::ReconciledRow;
use crate::sheet::{CellValue, SheetTable, WorkbookData};

/// Name of the single worksheet in the report.
pub const REPORT_SHEET: &str = "Processed";
/// File name offered for download.
pub const REPORT_FILE_NAME: &str = "processed.xlsx";
/// OOXML spreadsheet media type.
pub const REPORT_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Header row of the report, in column order.
pub const REPORT_COLUMNS: [&str; 4] = [
    "Employee No",
    "Employee Name",
    "Total Good Pcs",
    "Total Defects Pcs",
];

/// Projects reconciled rows onto the report columns.
pub fn to_sheet(rows: &[ReconciledRow]) -> SheetTable {
    let mut sheet = SheetTable::new(
        REPORT_SHEET,
        REPORT_COLUMNS.iter().map(|column| column.to_string()).collect(),
    );
    sheet.rows = rows
        .iter()
        .map(|row| {
            vec![
                CellValue::text(row.emp_no.clone()),
                CellValue::text(row.name.clone()),
                CellValue::number(row.good_pieces),
                CellValue::number(row.defect_pieces),
            ]
        })
        .collect();
    sheet
}

/// Serialises the report to XLSX bytes with auto-fit column widths.
pub fn write(rows: &[ReconciledRow]) -> Result<Vec<u8>> {
    excel_write::workbook_to_bytes(&WorkbookData::single(to_sheet(rows)))
}
