//! Dose engine properties through the public API

use approx::assert_relative_eq;
use organdose::data::auc::{MBQ_TO_BQ, SECONDS_PER_HOUR};
use organdose::prelude::*;

use crate::common::*;

#[test]
fn zero_input_zero_output() {
    let calc = calculator();
    for (id, _) in organdose::data::RADIONUCLIDES {
        let result = calc
            .compute_from_cumulated(&CumulatedActivity::new(), id)
            .unwrap();
        assert_eq!(result.len(), 25);
        for dose in &result {
            assert_eq!(dose.dose_gy, 0.0, "{} {}", id, dose.organ);
        }
    }
}

#[test]
fn two_point_ramp_integrates_to_trapezoid() {
    let x = 12.0;
    let series = TimeActivitySeries::from_samples("Thyroid", &[(0.0, 0.0), (1.0, x)]).unwrap();
    assert_relative_eq!(
        series.cumulated_activity(),
        x / 2.0 * SECONDS_PER_HOUR * MBQ_TO_BQ,
        max_relative = 1e-12
    );
}

#[test]
fn wall_dose_includes_both_contents_terms() {
    let calc = calculator();
    for (wall, contents) in ICRP89.wall_contents_pairs() {
        let a = 7.0e8;
        let result = calc
            .compute_from_cumulated(&CumulatedActivity::new().with(contents, a), "Lu177")
            .unwrap();

        assert_relative_eq!(
            result.get(wall).unwrap(),
            a * s(wall, contents) * (1.0 + 1e-3),
            max_relative = 1e-12
        );
        for target in ICRP89.targets() {
            if target == wall {
                continue;
            }
            assert_relative_eq!(
                result.get(target).unwrap(),
                a * s(target, contents) * 1e-3,
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn dose_is_linear_in_activity() {
    let calc = calculator();
    let a = CumulatedActivity::new()
        .with("Liver", 1e9)
        .with("Red Marrow", 2e8);
    let doubled = CumulatedActivity::new()
        .with("Liver", 2e9)
        .with("Red Marrow", 4e8);

    let base = calc.compute_from_cumulated(&a, "Ac225").unwrap();
    let twice = calc.compute_from_cumulated(&doubled, "Ac225").unwrap();
    for (x, y) in base.iter().zip(&twice) {
        assert_relative_eq!(y.dose_gy, 2.0 * x.dose_gy, max_relative = 1e-12);
    }
}

#[test]
fn non_ascending_series_is_rejected() {
    let err = TimeActivitySeries::from_samples("Liver", &[(1.0, 0.0), (0.0, 0.0)]).unwrap_err();
    assert!(matches!(
        err,
        DosimetryError::InvalidSeries {
            ref organ,
            reason: SeriesError::NonAscendingTime { .. },
        } if organ == "Liver"
    ));
}

#[test]
fn non_finite_activity_is_rejected() {
    let calc = calculator();
    let err = calc
        .compute_from_cumulated(&CumulatedActivity::new().with("Brain", f64::NAN), "F18")
        .unwrap_err();
    assert!(matches!(err, DosimetryError::InvalidActivity { ref organ, .. } if organ == "Brain"));
}

#[test]
fn series_and_cumulated_paths_agree() {
    let calc = calculator();
    let table = TimeActivityTable::from_columns(
        &[0.0, 1.0, 4.0, 24.0],
        [
            ("Liver", vec![10.0, 8.0, 5.0, 1.0]),
            ("Heart Contents", vec![20.0, 10.0, 2.0, 0.0]),
        ],
    )
    .unwrap();

    let activity = CumulatedActivity::new()
        .with("Liver", table.get("Liver").unwrap().cumulated_activity())
        .with(
            "Heart Contents",
            table.get("Heart Contents").unwrap().cumulated_activity(),
        );

    assert_eq!(
        calc.compute_from_series(&table, "Cu64").unwrap(),
        calc.compute_from_cumulated(&activity, "Cu64").unwrap()
    );
}
