use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::error::{MapperError, Result};
use crate::model::{DailyRecord, ReconciledRow, Reconciliation, ReferenceTable};

/// Left-joins the day's records against the reference table on the employee
/// number.
///
/// Every daily record yields exactly one row, in input order. Records without
/// a reference match get an empty name and their identifier is listed once in
/// [`Reconciliation::missing`]. A referenced identifier that occurs more than
/// once in the reference table is rejected with [`MapperError::DuplicateKey`]
/// instead of fanning the row out.
#[instrument(level = "debug", skip_all, fields(daily = daily.len(), reference = reference.len()))]
pub fn reconcile(daily: &[DailyRecord], reference: &ReferenceTable) -> Result<Reconciliation> {
    let names = index_names(reference);

    let mut rows = Vec::with_capacity(daily.len());
    let mut missing = Vec::new();
    let mut seen_missing = HashSet::new();

    for record in daily {
        let name = match names.get(record.emp_no.as_str()) {
            Some(Lookup::Unique(name)) => (*name).to_string(),
            Some(Lookup::Ambiguous) => {
                return Err(MapperError::DuplicateKey(record.emp_no.clone()));
            }
            None => {
                if seen_missing.insert(record.emp_no.as_str()) {
                    missing.push(record.emp_no.clone());
                }
                String::new()
            }
        };

        rows.push(ReconciledRow {
            emp_no: record.emp_no.clone(),
            name,
            good_pieces: record.good_pieces,
            defect_pieces: record.defect_pieces,
        });
    }

    debug!(rows = rows.len(), missing = missing.len(), "reconciled daily records");
    Ok(Reconciliation { rows, missing })
}

enum Lookup<'a> {
    Unique(&'a str),
    Ambiguous,
}

fn index_names(reference: &ReferenceTable) -> HashMap<&str, Lookup<'_>> {
    let mut names = HashMap::with_capacity(reference.len());
    for record in reference.iter() {
        names
            .entry(record.emp_no.as_str())
            .and_modify(|lookup| *lookup = Lookup::Ambiguous)
            .or_insert(Lookup::Unique(record.name.as_str()));
    }
    names
}
