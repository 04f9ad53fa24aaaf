use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{MapperError, Result};
use crate::model::{DailyRecord, normalize_key};

/// Identifier header as exported by the production system.
pub const USERNAME_COLUMN: &str = "Username";
/// Identifier header after ingestion.
pub const EMP_NO_COLUMN: &str = "EmpNo";
pub const GOOD_PIECES_COLUMN: &str = "Total Good Pieces";
pub const DEFECT_PIECES_COLUMN: &str = "Total Defect Pieces";

/// Parses a daily production export into [`DailyRecord`]s.
///
/// The `Username` column is taken as the employee number. A file that was
/// already renamed (`EmpNo` header) is accepted as well. Only the identifier
/// and the two piece counters are consumed; other columns are ignored.
pub fn ingest_daily<R: Read>(reader: R) -> Result<Vec<DailyRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = DailyColumns::locate(&headers)?;
    debug!(?columns, "located daily columns");

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let row_number = index + 1;
        records.push(DailyRecord {
            emp_no: normalize_key(row.get(columns.emp_no).unwrap_or_default()),
            good_pieces: parse_count(&row, columns.good, GOOD_PIECES_COLUMN, row_number)?,
            defect_pieces: parse_count(&row, columns.defect, DEFECT_PIECES_COLUMN, row_number)?,
        });
    }

    Ok(records)
}

/// Convenience wrapper over [`ingest_daily`] for uploaded bytes.
pub fn ingest_daily_bytes(bytes: &[u8]) -> Result<Vec<DailyRecord>> {
    ingest_daily(bytes)
}

#[derive(Debug, Clone, Copy)]
struct DailyColumns {
    emp_no: usize,
    good: usize,
    defect: usize,
}

impl DailyColumns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|header| header == name);

        let emp_no = find(USERNAME_COLUMN)
            .or_else(|| find(EMP_NO_COLUMN))
            .ok_or_else(|| MapperError::Schema(USERNAME_COLUMN.to_string()))?;
        let good = find(GOOD_PIECES_COLUMN)
            .ok_or_else(|| MapperError::Schema(GOOD_PIECES_COLUMN.to_string()))?;
        let defect = find(DEFECT_PIECES_COLUMN)
            .ok_or_else(|| MapperError::Schema(DEFECT_PIECES_COLUMN.to_string()))?;

        Ok(Self {
            emp_no,
            good,
            defect,
        })
    }
}

fn parse_count(
    row: &StringRecord,
    index: usize,
    column: &str,
    row_number: usize,
) -> Result<Option<f64>> {
    let raw = row.get(index).unwrap_or_default();
    if raw.is_empty() {
        return Ok(None);
    }
    // NaN and infinities have no spreadsheet representation.
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(MapperError::Parse {
            row: row_number,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}
