//! Integration tests: CSV in, transforms, CSV out.

use approx::assert_relative_eq;
use compositions::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tempfile::NamedTempFile;

/// Random strictly positive compositions, `n_obs` x `n_parts`.
fn create_synthetic_compositions(n_obs: usize, n_parts: usize, seed: u64) -> Matrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows: Vec<Vec<f64>> = (0..n_obs)
        .map(|_| (0..n_parts).map(|_| rng.gen_range(0.01..100.0)).collect())
        .collect();
    Matrix::from_rows(rows).unwrap()
}

#[test]
fn test_csv_file_through_every_transform() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "0.2,0.3,0.5").unwrap();
    writeln!(file, "10,20,70").unwrap();
    writeln!(file, "1,1,1").unwrap();
    file.flush().unwrap();

    let data = Matrix::from_csv_path(file.path()).unwrap();
    assert_eq!(data.dims(), (3, 3));

    let config = TransformConfig::default();
    for kind in Transform::ALL {
        let out = transform(kind, &data, &config).unwrap();
        assert_eq!(out.dims(), kind.output_dims(3, 3));
        assert!(out.as_slice().iter().all(|v| v.is_finite()), "{}", kind);
    }
}

#[test]
fn test_shape_contracts() {
    let data = create_synthetic_compositions(12, 5, 1);

    let mut same = Matrix::new(12, 5);
    clo(&data, &mut same).unwrap();
    clr(&data, &mut same).unwrap();
    cpt(&data, &mut same).unwrap();
    apt(&data, &mut same).unwrap();

    let mut reduced = Matrix::new(12, 4);
    alr(&data, &mut reduced).unwrap();

    assert!(alr(&data, &mut same).is_err());
    for f in [clo, clr, cpt, apt] {
        assert!(matches!(
            f(&data, &mut reduced),
            Err(CompositionError::DimensionMismatch { .. })
        ));
    }
}

#[test]
fn test_mismatch_leaves_output_untouched() {
    let data = create_synthetic_compositions(3, 3, 2);
    let mut out = Matrix::from_rows(vec![vec![9.0, 9.0], vec![9.0, 9.0]]).unwrap();
    let snapshot = out.clone();

    for kind in Transform::ALL {
        let result = kind.apply(&data, &mut out, &TransformConfig::default());
        assert!(
            matches!(result, Err(CompositionError::DimensionMismatch { .. })),
            "{} accepted a mis-shaped output",
            kind
        );
        assert!(out.equals(&snapshot), "{} modified a mis-shaped output", kind);
    }
}

#[test]
fn test_log_ratio_relationships() {
    // alr_j = clr_j - clr_last for every leading part
    let data = create_synthetic_compositions(20, 4, 3);
    let mut clr_out = Matrix::new(20, 4);
    let mut alr_out = Matrix::new(20, 3);
    clr(&data, &mut clr_out).unwrap();
    alr(&data, &mut alr_out).unwrap();

    for i in 0..20 {
        for j in 0..3 {
            assert_relative_eq!(
                alr_out[(i, j)],
                clr_out[(i, j)] - clr_out[(i, 3)],
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_closure_then_log_ratio_unchanged() {
    // log-ratios ignore the total, so closing first changes nothing
    let data = create_synthetic_compositions(15, 6, 4);
    let closed = transform(Transform::Clo, &data, &TransformConfig::default()).unwrap();

    for kind in [Transform::Clr, Transform::Alr, Transform::Cpt] {
        let direct = transform(kind, &data, &TransformConfig::default()).unwrap();
        let via_closed = transform(kind, &closed, &TransformConfig::default()).unwrap();
        for (a, b) in direct.as_slice().iter().zip(via_closed.as_slice()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_large_parallel_matches_sequential() {
    let data = create_synthetic_compositions(500, 8, 5);
    let seq = TransformConfig::default();
    let par = TransformConfig::new().parallel(true);

    for kind in Transform::ALL {
        let a = transform(kind, &data, &seq).unwrap();
        let b = transform(kind, &data, &par).unwrap();
        assert!(a.equals(&b), "{} differs in parallel", kind);
    }
}

#[test]
fn test_fail_fast_from_yaml_config() {
    let config = TransformConfig::from_yaml("degeneracy: fail_fast\n").unwrap();
    let data = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![1.0, 0.0, 3.0]]).unwrap();

    let mut out = Matrix::new(2, 3);
    let err = clr_with(&data, &mut out, &config).unwrap_err();
    match err {
        CompositionError::NumericDegeneracy { transform: name, row, .. } => {
            assert_eq!(name, "clr");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(out.as_slice().iter().all(|&v| v == 0.0));

    // closure handles a zero part fine
    clo_with(&data, &mut out, &config).unwrap();
    assert_relative_eq!(out[(1, 1)], 0.0);
}

#[test]
fn test_transformed_output_csv_roundtrip() {
    let data = create_synthetic_compositions(10, 3, 6);
    let out = transform(Transform::Clr, &data, &TransformConfig::default()).unwrap();

    let file = NamedTempFile::new().unwrap();
    out.to_csv_path(file.path()).unwrap();
    let loaded = Matrix::from_csv_path(file.path()).unwrap();
    assert!(loaded.equals(&out));
}

#[test]
fn test_malformed_csv_returns_no_matrix() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,five,6").unwrap();
    file.flush().unwrap();

    let err = Matrix::from_csv_path(file.path()).unwrap_err();
    assert!(matches!(err, CompositionError::InvalidValue { row: 1, col: 1, .. }));
}
