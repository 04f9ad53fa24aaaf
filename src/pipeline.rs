use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{MapperError, Result};
use crate::io::csv_read;
use crate::model::{EmpNo, ReferenceTable};
use crate::reconcile::reconcile;
use crate::report::{self, REPORT_MEDIA_TYPE};
use crate::store;

/// Output of a successful run over one daily export.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// XLSX report bytes.
    pub report: Vec<u8>,
    pub row_count: usize,
    /// Employee numbers absent from the reference table.
    pub missing: Vec<EmpNo>,
}

/// Machine-readable description of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSummary {
    pub output: PathBuf,
    pub media_type: &'static str,
    pub rows: usize,
    pub missing: Vec<EmpNo>,
}

/// Runs ingest, reconciliation and report generation over uploaded CSV bytes.
/// Nothing is produced unless every stage succeeds.
#[instrument(level = "info", skip_all, fields(bytes = csv.len(), employees = reference.len()))]
pub fn process_daily(csv: &[u8], reference: &ReferenceTable) -> Result<ProcessOutcome> {
    let daily = csv_read::ingest_daily_bytes(csv)?;
    info!(record_count = daily.len(), "ingested daily records");

    let reconciliation = reconcile(&daily, reference)?;
    if !reconciliation.missing.is_empty() {
        warn!(missing = ?reconciliation.missing, "employee numbers missing from reference table");
    }

    let report = report::write(&reconciliation.rows)?;
    debug!(report_bytes = report.len(), "report serialised");

    Ok(ProcessOutcome {
        report,
        row_count: reconciliation.rows.len(),
        missing: reconciliation.missing,
    })
}

/// Processes a daily CSV file against the reference table at `reference` and
/// writes the report to `output`. The output file is only touched once the
/// whole report is built.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), reference = %reference.display(), output = %output.display())
)]
pub fn process_files(input: &Path, reference: &Path, output: &Path) -> Result<ProcessSummary> {
    if !input.exists() {
        return Err(MapperError::MissingInput(input.to_path_buf()));
    }

    let csv = fs::read(input)?;
    let table = store::load_readonly(reference)?;
    let outcome = process_daily(&csv, &table)?;
    fs::write(output, &outcome.report)?;

    Ok(ProcessSummary {
        output: output.to_path_buf(),
        media_type: REPORT_MEDIA_TYPE,
        rows: outcome.row_count,
        missing: outcome.missing,
    })
}
