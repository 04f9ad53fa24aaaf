//! Persisted employee reference table.
//!
//! The table lives in a single spreadsheet with an `EmpNo` / `Name` header.
//! Every mutation is applied to a copy, the copy is written out in full, and
//! only then does the store adopt it. A failed validation or a failed write
//! therefore leaves both the file and the in-memory table untouched.
//!
//! There is no locking: two processes mutating the same file race on the
//! read-modify-write cycle and the last writer wins.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{MapperError, Result};
use crate::io::{excel_read, excel_write};
use crate::model::{EmployeeRecord, ReferenceTable, normalize_key};
use crate::sheet::{CellValue, EMP_NO_COLUMN, NAME_COLUMN, REFERENCE_SHEET, SheetTable, WorkbookData};

/// Owner of the reference table file.
#[derive(Debug)]
pub struct ReferenceStore {
    path: PathBuf,
    table: ReferenceTable,
}

impl ReferenceStore {
    /// Loads the table at `path`. A missing file yields an empty table.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let table = load(&path)?;
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Appends a new employee and persists the table.
    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    pub fn insert(&mut self, emp_no: &str, name: &str) -> Result<&ReferenceTable> {
        let emp_no = normalize_key(emp_no);
        if emp_no.is_empty() || name.trim().is_empty() {
            return Err(MapperError::Validation(
                "both employee number and name are required".into(),
            ));
        }
        if self.table.contains(&emp_no) {
            return Err(MapperError::DuplicateKey(emp_no));
        }

        let mut next = self.table.clone();
        next.push(EmployeeRecord::new(emp_no, name));
        self.commit(next)
    }

    /// Replaces the name of every row carrying `emp_no` and persists the table.
    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    pub fn update(&mut self, emp_no: &str, new_name: &str) -> Result<&ReferenceTable> {
        let emp_no = normalize_key(emp_no);
        if new_name.trim().is_empty() {
            return Err(MapperError::Validation("new name is required".into()));
        }

        let mut next = self.table.clone();
        let touched = next.rename(&emp_no, new_name);
        if touched == 0 {
            return Err(MapperError::NotFound(emp_no));
        }
        debug!(touched, "renamed reference rows");
        self.commit(next)
    }

    /// Removes every row carrying `emp_no` and persists the table.
    #[instrument(level = "info", skip(self), fields(path = %self.path.display()))]
    pub fn delete(&mut self, emp_no: &str) -> Result<&ReferenceTable> {
        let emp_no = normalize_key(emp_no);

        let mut next = self.table.clone();
        let removed = next.remove(&emp_no);
        if removed == 0 {
            return Err(MapperError::NotFound(emp_no));
        }
        debug!(removed, "removed reference rows");
        self.commit(next)
    }

    /// Writes the current table to disk, overwriting the file.
    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.table)
    }

    fn commit(&mut self, next: ReferenceTable) -> Result<&ReferenceTable> {
        save(&self.path, &next)?;
        info!(employees = next.len(), "reference table persisted");
        self.table = next;
        Ok(&self.table)
    }
}

/// Loads a reference table without taking ownership of the file, e.g. an
/// alternate database supplied for a single reconciliation run. Unlike
/// [`ReferenceStore::open`], the file must exist.
pub fn load_readonly(path: &Path) -> Result<ReferenceTable> {
    if !path.exists() {
        return Err(MapperError::MissingInput(path.to_path_buf()));
    }
    load(path)
}

#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
fn load(path: &Path) -> Result<ReferenceTable> {
    if !path.exists() {
        debug!("no reference file, starting empty");
        return Ok(ReferenceTable::new());
    }

    let sheet = excel_read::read_first_sheet(path).map_err(|error| match error {
        MapperError::Schema(_) => error,
        other => MapperError::StorageRead {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;
    let table = table_from_sheet(&sheet)?;

    let duplicates = table.duplicate_keys();
    if !duplicates.is_empty() {
        warn!(?duplicates, "reference table contains duplicate employee numbers");
    }
    info!(employees = table.len(), "reference table loaded");
    Ok(table)
}

fn save(path: &Path, table: &ReferenceTable) -> Result<()> {
    excel_write::write_workbook(path, &WorkbookData::single(table_to_sheet(table)))
}

/// Converts a worksheet with `EmpNo` and `Name` headers into a table. Rows
/// without an employee number are skipped. Names are kept verbatim.
pub fn table_from_sheet(sheet: &SheetTable) -> Result<ReferenceTable> {
    if sheet.columns.is_empty() && sheet.rows.is_empty() {
        return Ok(ReferenceTable::new());
    }

    let emp_no_idx = sheet.require_column(EMP_NO_COLUMN)?;
    let name_idx = sheet.require_column(NAME_COLUMN)?;

    let records = sheet
        .rows
        .iter()
        .filter_map(|row| {
            let emp_no = normalize_key(&cell_text(row.get(emp_no_idx)));
            if emp_no.is_empty() {
                return None;
            }
            let name = cell_text(row.get(name_idx));
            Some(EmployeeRecord::new(emp_no, name))
        })
        .collect();

    Ok(ReferenceTable::from_records(records))
}

/// Lays the table out as a two-column sheet with no index column.
pub fn table_to_sheet(table: &ReferenceTable) -> SheetTable {
    let mut sheet = SheetTable::new(
        REFERENCE_SHEET,
        vec![EMP_NO_COLUMN.to_string(), NAME_COLUMN.to_string()],
    );
    sheet.rows = table
        .iter()
        .map(|record| {
            vec![
                CellValue::text(record.emp_no.clone()),
                CellValue::text(record.name.clone()),
            ]
        })
        .collect();
    sheet
}

fn cell_text(cell: Option<&CellValue>) -> String {
    cell.map(CellValue::to_string).unwrap_or_default()
}
