use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Employee identifier used to join daily records to the reference table.
///
/// Identifiers are compared as strings: `"007"` and `"7"` are distinct keys.
/// The only normalisation applied is [`normalize_key`].
pub type EmpNo = String;

/// Trims surrounding whitespace from an identifier.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_string()
}

/// A single row of the persisted reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "EmpNo")]
    pub emp_no: EmpNo,
    #[serde(rename = "Name")]
    pub name: String,
}

impl EmployeeRecord {
    pub fn new(emp_no: impl Into<EmpNo>, name: impl Into<String>) -> Self {
        Self {
            emp_no: emp_no.into(),
            name: name.into(),
        }
    }
}

/// Ordered employee reference table keyed by [`EmpNo`].
///
/// Uniqueness is enforced by the store on insert only; a table loaded from a
/// hand-edited file may still carry duplicates, see
/// [`ReferenceTable::duplicate_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTable {
    records: Vec<EmployeeRecord>,
}

impl ReferenceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter()
    }

    pub fn contains(&self, emp_no: &str) -> bool {
        self.records.iter().any(|record| record.emp_no == emp_no)
    }

    /// Identifiers that occur more than once, in sorted order.
    pub fn duplicate_keys(&self) -> Vec<EmpNo> {
        let mut seen = HashSet::new();
        let mut duplicates = BTreeSet::new();
        for record in &self.records {
            if !seen.insert(record.emp_no.as_str()) {
                duplicates.insert(record.emp_no.clone());
            }
        }
        duplicates.into_iter().collect()
    }

    pub(crate) fn push(&mut self, record: EmployeeRecord) {
        self.records.push(record);
    }

    /// Renames every row matching `emp_no` and returns how many were touched.
    pub(crate) fn rename(&mut self, emp_no: &str, name: &str) -> usize {
        let mut touched = 0;
        for record in self.records.iter_mut().filter(|r| r.emp_no == emp_no) {
            record.name = name.to_string();
            touched += 1;
        }
        touched
    }

    /// Removes every row matching `emp_no` and returns how many were dropped.
    pub(crate) fn remove(&mut self, emp_no: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.emp_no != emp_no);
        before - self.records.len()
    }
}

/// One production entry for a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub emp_no: EmpNo,
    /// `Total Good Pieces`; `None` when the source cell was blank.
    pub good_pieces: Option<f64>,
    /// `Total Defect Pieces`; `None` when the source cell was blank.
    pub defect_pieces: Option<f64>,
}

impl DailyRecord {
    pub fn new(emp_no: impl Into<EmpNo>, good: f64, defect: f64) -> Self {
        Self {
            emp_no: emp_no.into(),
            good_pieces: Some(good),
            defect_pieces: Some(defect),
        }
    }
}

/// Output unit of a reconciliation. An empty `name` marks a daily record with
/// no matching reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRow {
    pub emp_no: EmpNo,
    pub name: String,
    pub good_pieces: Option<f64>,
    pub defect_pieces: Option<f64>,
}

/// Result of joining a day's records against the reference table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// One row per daily record, in input order.
    pub rows: Vec<ReconciledRow>,
    /// Distinct unmatched identifiers in order of first occurrence.
    pub missing: Vec<EmpNo>,
}
