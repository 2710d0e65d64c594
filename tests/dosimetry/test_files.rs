//! End-to-end runs through files on disk

use std::path::Path;
use std::sync::Arc;

use approx::assert_relative_eq;
use organdose::data::TIME_COLUMN;
use organdose::prelude::*;
use organdose::svalues::verify_directory;

use crate::common::*;

fn write_svalues(dir: &Path) {
    let csv = svalue_csv();
    for (id, _) in organdose::data::RADIONUCLIDES {
        std::fs::write(dir.join(format!("{id}.csv")), &csv).unwrap();
    }
}

fn write_input(path: &Path) {
    let mut header = vec![TIME_COLUMN.to_string()];
    header.extend(ICRP89.sources().iter().cloned());
    header.push("Comment".into());

    let mut text = header.join(",") + "\n";
    for (time, liver) in [(0.0_f64, 0.0_f64), (1.0, 10.0), (2.0, 6.0)] {
        let mut row = vec![time.to_string()];
        for source in ICRP89.sources() {
            let value = if source == "Liver" { liver } else { 0.0 };
            row.push(value.to_string());
        }
        row.push("n/a".into());
        text.push_str(&(row.join(",") + "\n"));
    }
    std::fs::write(path, text).unwrap();
}

#[test]
fn csv_in_csv_out() {
    let dir = tempfile::tempdir().unwrap();
    let svalues = dir.path().join("svalues");
    std::fs::create_dir(&svalues).unwrap();
    write_svalues(&svalues);
    let input = dir.path().join("input.csv");
    write_input(&input);

    let config = DosimetryConfig::from_toml_str(&format!(
        "[svalues]\ndir = {:?}\n",
        svalues.display().to_string()
    ))
    .unwrap();
    let calculator = DoseCalculator::new(Arc::new(config.provider()));

    let table = read_time_activity(&input, calculator.taxonomy()).unwrap();
    let result = calculator.compute_from_series(&table, "F18").unwrap();

    // (0+10)/2*1 + (10+6)/2*1 = 13 MBq·h
    let liver = 13.0 * 3600.0 * 1e6;
    assert_relative_eq!(
        result.get("Spleen").unwrap(),
        liver * s("Spleen", "Liver") * 1e-3,
        max_relative = 1e-12
    );

    let output = dir.path().join("doses.csv");
    result.write_csv(&output).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("Organ,Dose_Gy\n"));
    assert!(written.contains("Stomach Wall,"));
    assert_eq!(written.lines().count(), 26);

    let output = dir.path().join("doses.json");
    result.write_json(&output).unwrap();
    let report = std::fs::read_to_string(&output).unwrap();
    assert!(report.contains("\"radionuclide\": \"F18\""));
    assert!(report.contains("\"Organ\": \"Stomach Wall\""));
}

#[test]
fn verify_reports_good_and_missing_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_svalues(dir.path());
    std::fs::remove_file(dir.path().join("Ac225.csv")).unwrap();

    let reports = verify_directory(dir.path(), &RadionuclideRegistry::default(), &ICRP89);
    assert_eq!(reports.len(), 8);
    assert!(!reports["Ac225"].loaded);
    let f18 = &reports["F18"];
    assert!(f18.loaded && f18.complete && f18.non_negative && f18.valid);
    // The synthetic coefficients depend on target and source differently
    assert!(!f18.symmetric);
}

#[test]
fn missing_table_file_is_source_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let provider = SValueProvider::from_dir(dir.path());
    match provider.get("I131").unwrap_err() {
        DosimetryError::SourceNotFound { location, .. } => {
            assert!(location.ends_with("I131.csv"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
