use std::fmt;

/// Sheet name used when persisting the reference table.
pub const REFERENCE_SHEET: &str = "Sheet1";
/// Identifier column of the reference table.
pub const EMP_NO_COLUMN: &str = "EmpNo";
/// Name column of the reference table.
pub const NAME_COLUMN: &str = "Name";

/// A single cell of a [`SheetTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Wraps a string, mapping the empty string to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map(CellValue::Number).unwrap_or(CellValue::Empty)
    }

    /// Character count of the rendered value. Empty cells count as zero.
    pub fn display_len(&self) -> usize {
        match self {
            CellValue::Empty => 0,
            other => other.to_string().chars().count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            // f64's Display already drops the fraction of integral values.
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Empty => Ok(()),
        }
    }
}

/// A table that will be materialised as an Excel sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    pub fn new(sheet_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Position of the named header, compared exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Like [`SheetTable::column_index`] but reports a schema error.
    pub fn require_column(&self, name: &str) -> crate::Result<usize> {
        self.column_index(name)
            .ok_or_else(|| crate::MapperError::Schema(format!("{name} (sheet {})", self.sheet_name)))
    }
}

/// Represents all tables required to materialise an Excel workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookData {
    pub tables: Vec<SheetTable>,
}

impl WorkbookData {
    pub fn single(table: SheetTable) -> Self {
        Self {
            tables: vec![table],
        }
    }
}
