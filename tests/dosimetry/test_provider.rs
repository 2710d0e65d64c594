//! Provider behaviour: registry checks, validation and caching

use std::sync::Arc;

use organdose::prelude::*;

use crate::common::*;

#[test]
fn every_builtin_radionuclide_loads() {
    let provider = SValueProvider::new(full_source());
    for (id, _) in organdose::data::RADIONUCLIDES {
        let table = provider.get(id).unwrap();
        assert_eq!(table.radionuclide(), id);
        assert_eq!(table.matrix().dim(), (25, 25));
    }
    assert_eq!(provider.cached(), 8);
}

#[test]
fn unsupported_radionuclide_creates_no_entry() {
    let source = CountingSource::new(full_source());
    let provider = SValueProvider::new(Arc::clone(&source));

    let err = provider.get("Xx999").unwrap_err();
    assert_eq!(
        err,
        DosimetryError::UnsupportedRadionuclide { id: "Xx999".into() }
    );
    assert!(!provider.is_cached("Xx999"));
    assert_eq!(provider.cached(), 0);
    assert_eq!(source.loads(), 0);
}

#[test]
fn sequential_gets_read_storage_once() {
    let source = CountingSource::new(full_source());
    let provider = SValueProvider::new(Arc::clone(&source));

    let first = provider.get("Lu177").unwrap();
    let second = provider.get("Lu177").unwrap();
    assert_eq!(*first, *second);
    assert_eq!(source.loads(), 1);

    provider.get("I131").unwrap();
    assert_eq!(source.loads(), 2);
}

#[test]
fn missing_wall_contents_pair_is_reported_and_not_cached() {
    let csv = svalue_csv_without(Some(("Urinary Bladder Wall", "Urinary Bladder Contents")));
    let source = CountingSource::new(InMemorySource::new().with_table("F18", csv));
    let provider = SValueProvider::new(Arc::clone(&source));

    let err = provider.get("F18").unwrap_err();
    assert_eq!(
        err,
        DosimetryError::SchemaViolation {
            radionuclide: "F18".into(),
            issue: SchemaIssue::MissingWallContentsPair {
                wall: "Urinary Bladder Wall".into(),
                contents: "Urinary Bladder Contents".into(),
            },
        }
    );
    assert!(!provider.is_cached("F18"));

    // A failed load is retried rather than served from cache
    assert!(provider.get("F18").is_err());
    assert_eq!(source.loads(), 2);
}

#[test]
fn missing_source_column_is_a_schema_violation() {
    let csv: String = svalue_csv()
        .lines()
        .map(|line| {
            let mut cells: Vec<&str> = line.split(',').collect();
            // Drop the "Thymus" column (source index 20, shifted by the label cell)
            cells.remove(21);
            cells.join(",") + "\n"
        })
        .collect();
    let provider = SValueProvider::new(InMemorySource::new().with_table("Cu64", csv));

    match provider.get("Cu64").unwrap_err() {
        DosimetryError::SchemaViolation {
            issue: SchemaIssue::MissingOrgans { sources, targets },
            ..
        } => {
            assert_eq!(sources, vec!["Thymus".to_string()]);
            assert!(targets.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn negative_value_is_a_data_integrity_error() {
    let csv = svalue_csv().replacen(
        &format!(",{}", coefficient(0, 0)),
        &format!(",-{}", coefficient(0, 0)),
        1,
    );
    let provider = SValueProvider::new(InMemorySource::new().with_table("Ga68", csv));
    match provider.get("Ga68").unwrap_err() {
        DosimetryError::DataIntegrity {
            target,
            source_organ,
            value,
            ..
        } => {
            assert_eq!(target, "Adrenals");
            assert_eq!(source_organ, "Adrenals");
            assert!(value < 0.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn supported_radionuclide_without_data() {
    let provider = SValueProvider::new(InMemorySource::new());
    assert!(matches!(
        provider.get("Pb212"),
        Err(DosimetryError::SourceNotFound { ref radionuclide, .. }) if radionuclide == "Pb212"
    ));
}

#[test]
fn shared_provider_across_threads_loads_each_table_once() {
    let source = CountingSource::new(full_source());
    let provider = Arc::new(SValueProvider::new(Arc::clone(&source)));

    std::thread::scope(|scope| {
        for i in 0..16 {
            let provider = Arc::clone(&provider);
            scope.spawn(move || {
                let id = if i % 2 == 0 { "F18" } else { "Zr89" };
                provider.get(id).unwrap();
            });
        }
    });

    assert_eq!(source.loads(), 2);
    assert_eq!(provider.cached(), 2);
}
