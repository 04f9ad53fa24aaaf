use employee_mapper::io::excel_read;
use employee_mapper::io::excel_write::column_widths;
use employee_mapper::model::{DailyRecord, EmployeeRecord, ReferenceTable};
use employee_mapper::pipeline;
use employee_mapper::reconcile::reconcile;
use employee_mapper::report::{self, REPORT_COLUMNS, REPORT_MEDIA_TYPE, REPORT_SHEET};
use employee_mapper::sheet::CellValue;
use employee_mapper::store::{self, ReferenceStore};
use employee_mapper::MapperError;
use std::fs;
use tempfile::tempdir;

fn reference() -> ReferenceTable {
    ReferenceTable::from_records(vec![EmployeeRecord::new("E1", "Alice")])
}

#[test]
fn report_roundtrip_matches_projection() {
    let daily = vec![DailyRecord::new("E1", 10.0, 2.0), DailyRecord::new("E9", 5.0, 0.0)];
    let reconciliation = reconcile(&daily, &reference()).expect("reconciled");

    let bytes = report::write(&reconciliation.rows).expect("report written");
    let sheet = excel_read::read_sheet_from_bytes(&bytes, REPORT_SHEET).expect("report read");

    assert_eq!(sheet.columns, REPORT_COLUMNS.map(String::from).to_vec());
    assert_eq!(
        sheet.rows,
        vec![
            vec![
                CellValue::Text("E1".into()),
                CellValue::Text("Alice".into()),
                CellValue::Number(10.0),
                CellValue::Number(2.0),
            ],
            vec![
                CellValue::Text("E9".into()),
                CellValue::Empty,
                CellValue::Number(5.0),
                CellValue::Number(0.0),
            ],
        ]
    );
    assert_eq!(reconciliation.missing, vec!["E9".to_string()]);
}

#[test]
fn report_has_single_processed_sheet() {
    let bytes = report::write(&[]).expect("empty report written");
    let sheet = excel_read::read_first_sheet_from_bytes(&bytes).expect("report read");

    assert_eq!(sheet.sheet_name, REPORT_SHEET);
    assert_eq!(sheet.columns.len(), 4);
    assert!(sheet.rows.is_empty());
}

#[test]
fn column_widths_fit_longest_value_plus_padding() {
    let reference = ReferenceTable::from_records(vec![EmployeeRecord::new(
        "E1",
        "Bartholomew Featherstonehaugh",
    )]);
    let daily = vec![DailyRecord::new("E1", 1234567.0, 3.0), DailyRecord {
        emp_no: "E2".into(),
        good_pieces: None,
        defect_pieces: None,
    }];
    let reconciliation = reconcile(&daily, &reference).expect("reconciled");

    let widths = column_widths(&report::to_sheet(&reconciliation.rows));

    assert_eq!(widths, vec![13, 31, 16, 19]);
}

#[test]
fn process_files_writes_report_and_lists_missing() {
    let temp_dir = tempdir().expect("temporary directory");
    let database = temp_dir.path().join("database.xlsx");
    let mut store = ReferenceStore::open(&database).expect("store opened");
    store.insert("E1", "Alice").expect("inserted E1");
    store.insert("E2", "Bob").expect("inserted E2");

    let csv_path = temp_dir.path().join("daily.csv");
    fs::write(
        &csv_path,
        "Date,Username,Total Good Pieces,Total Defect Pieces\n\
         2024-05-01,E2,7,1\n\
         2024-05-01,E9,5,0\n\
         2024-05-01,E1,10,2\n\
         2024-05-01,E9,3,3\n",
    )
    .expect("CSV written");

    let output = temp_dir.path().join("processed.xlsx");
    let summary = pipeline::process_files(&csv_path, &database, &output).expect("processed");

    assert_eq!(summary.rows, 4);
    assert_eq!(summary.missing, vec!["E9".to_string()]);
    assert_eq!(summary.media_type, REPORT_MEDIA_TYPE);

    let sheet = excel_read::read_first_sheet(&output).expect("report read");
    let names: Vec<String> = sheet.rows.iter().map(|row| row[1].to_string()).collect();
    assert_eq!(names, vec!["Bob", "", "Alice", ""]);
}

#[test]
fn failed_processing_leaves_no_output() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("daily.csv");
    fs::write(&csv_path, "Username,Total Good Pieces\nE1,10\n").expect("CSV written");

    let output = temp_dir.path().join("processed.xlsx");
    let database = temp_dir.path().join("database.xlsx");
    ReferenceStore::open(&database)
        .expect("store opened")
        .insert("E1", "Alice")
        .expect("inserted");
    let error = pipeline::process_files(&csv_path, &database, &output).expect_err("schema error");

    assert!(matches!(error, MapperError::Schema(column) if column == "Total Defect Pieces"));
    assert!(!output.exists());
}

#[test]
fn process_files_rejects_missing_input() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("absent.csv");
    let output = temp_dir.path().join("processed.xlsx");

    let error = pipeline::process_files(&csv_path, &temp_dir.path().join("db.xlsx"), &output)
        .expect_err("missing input");

    assert!(matches!(error, MapperError::MissingInput(path) if path == csv_path));
}

#[test]
fn process_files_rejects_missing_reference_file() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("daily.csv");
    fs::write(
        &csv_path,
        "Username,Total Good Pieces,Total Defect Pieces\nE1,10,2\n",
    )
    .expect("CSV written");
    let database = temp_dir.path().join("typo_db.xlsx");
    let output = temp_dir.path().join("processed.xlsx");

    let error = pipeline::process_files(&csv_path, &database, &output)
        .expect_err("missing reference file");

    assert!(matches!(error, MapperError::MissingInput(path) if path == database));
    assert!(!output.exists());
}

#[test]
fn process_daily_uses_alternate_reference_without_persisting() {
    let temp_dir = tempdir().expect("temporary directory");
    let alternate = temp_dir.path().join("uploaded.xlsx");
    let mut store = ReferenceStore::open(&alternate).expect("store opened");
    store.insert("E9", "Zoe").expect("inserted");
    let before = fs::read(&alternate).expect("alternate read");

    let table = store::load_readonly(&alternate).expect("alternate loaded");
    let outcome = pipeline::process_daily(
        b"Username,Total Good Pieces,Total Defect Pieces\nE9,5,0\n",
        &table,
    )
    .expect("processed");

    assert_eq!(outcome.row_count, 1);
    assert!(outcome.missing.is_empty());
    assert_eq!(fs::read(&alternate).expect("alternate reread"), before);
}
