use nalgebra::*;
use rand::{SeedableRng, rngs::StdRng};
use approx::assert_abs_diff_eq;
use lda::{LinearDiscriminant, Estimator, Classifier, LdaError};
use lda::calc;
use lda::decision::{argmax, DecisionGrid};
use lda::distr::{Distribution, MultiNormal};
use lda::sample::{Array, train_test_split};
use lda::sim::*;

const EPS : f64 = 10E-8;

/// Stacks the rows of a over the rows of b.
fn stack(a : &DMatrix<f64>, b : &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows() + b.nrows(), a.ncols(), |i, j| {
        if i < a.nrows() { a[(i, j)] } else { b[(i - a.nrows(), j)] }
    })
}

fn two_class_labels(n0 : usize, n1 : usize) -> Vec<u8> {
    (0..(n0 + n1)).map(|i| if i < n0 { 0 } else { 1 } ).collect()
}

#[test]
fn shifted_standard_normals() {
    // Class 0 is a centered draw from N(0, I); class 1 is the same draw shifted to [3,3,3,3],
    // so both classes have exactly the same scatter and [1.5,1.5,1.5,1.5] is equidistant.
    let mut rng = StdRng::seed_from_u64(42);
    let standard = MultiNormal::new(DVector::zeros(4), DMatrix::identity(4, 4)).unwrap();
    let mut class0 = standard.sample(100, &mut rng).unwrap();
    let means = calc::column_means(&class0);
    for (mut col, m) in class0.column_iter_mut().zip(means.iter()) {
        col.add_scalar_mut(-m);
    }
    let class1 = class0.add_scalar(3.);
    let x = stack(&class0, &class1);
    let y = two_class_labels(100, 100);

    let mut lda = LinearDiscriminant::new();
    lda.fit(&x, &y[..]).unwrap();
    let fitted_means = lda.means().unwrap();
    for j in 0..4 {
        assert_abs_diff_eq!(fitted_means[0][j], 0.0, epsilon = EPS);
        assert_abs_diff_eq!(fitted_means[1][j], 3.0, epsilon = EPS);
    }
    let cov = lda.covariance().unwrap();
    let ident = DMatrix::<f64>::identity(4, 4);
    for (c, i) in cov.iter().zip(ident.iter()) {
        assert_abs_diff_eq!(*c, *i, epsilon = 0.5);
    }

    let proba = lda.predict_proba(&DMatrix::from_element(1, 4, 1.5)).unwrap();
    assert_abs_diff_eq!(proba[(0, 0)], 0.5, epsilon = 1E-6);
    assert_abs_diff_eq!(proba[(0, 1)], 0.5, epsilon = 1E-6);
}

#[test]
fn well_separated_accuracy() {
    let mut rng = StdRng::seed_from_u64(3);
    let sigma = DMatrix::<f64>::identity(2, 2) * 0.5;
    let c0 = MultiNormal::new(DVector::from_column_slice(&[0., 0.]), sigma.clone()).unwrap();
    let c1 = MultiNormal::new(DVector::from_column_slice(&[3., 3.]), sigma).unwrap();
    let x = stack(&c0.sample(200, &mut rng).unwrap(), &c1.sample(200, &mut rng).unwrap());
    let y = two_class_labels(200, 200);
    let split = train_test_split(&x, &y[..], 0.25, 7).unwrap();

    let mut lda = LinearDiscriminant::new();
    lda.fit(&split.train_x, &split.train_y[..]).unwrap();
    assert!(lda.score(&split.test_x, &split.test_y[..]).unwrap() > 0.9);
}

#[test]
fn probabilities_are_normalized() {
    for seed in [11, 13, 17].iter() {
        for dataset in [Dataset::One, Dataset::Two].iter() {
            let (x, y) = dataset.generate(400, *seed).unwrap();
            let mut lda = LinearDiscriminant::new();
            let params = lda.fit(&x, &y[..]).unwrap();
            assert_abs_diff_eq!(params.priors.sum(), 1.0, epsilon = 1E-9);
            let proba = lda.predict_proba(&x).unwrap();
            assert_eq!(proba.shape(), (400, 2));
            for row in proba.row_iter() {
                assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1E-6);
            }
        }
    }
}

#[test]
fn decision_follows_posterior() {
    let (x, y) = make_dataset2(300, 23).unwrap();
    let mut lda = LinearDiscriminant::new();
    lda.fit(&x, &y[..]).unwrap();
    let classes = lda.classes().unwrap().to_vec();
    let proba = lda.predict_proba(&x).unwrap();
    let pred = lda.predict(&x).unwrap();
    assert_eq!(pred.len(), 300);
    for (row, label) in proba.row_iter().zip(pred.iter()) {
        assert_eq!(classes[argmax(row.iter().cloned())], *label);
    }
}

#[test]
fn unfitted_model() {
    let lda = LinearDiscriminant::<u32>::new();
    let x = DMatrix::from_element(3, 2, 0.0);
    assert!(!lda.is_fitted());
    assert!(matches!(lda.predict(&x), Err(LdaError::Unfitted)));
    assert!(matches!(lda.predict_proba(&x), Err(LdaError::Unfitted)));
    assert!(matches!(lda.density_at(&[0., 0.], 0), Err(LdaError::Unfitted)));
    assert!(lda.classes().is_none());
}

#[test]
fn mismatched_lengths() {
    let x = DMatrix::from_element(4, 2, 1.0);
    let y = [0, 1, 0];
    let mut lda = LinearDiscriminant::new();
    let res = lda.fit(&x, &y[..]);
    assert!(matches!(res, Err(LdaError::MismatchedLength { samples : 4, labels : 3 })));
}

#[test]
fn invalid_shapes() {
    let mut lda = LinearDiscriminant::new();
    let y = [0, 1];

    let flat = Array::new(vec![2], vec![0., 1.]).unwrap();
    assert!(matches!(lda.fit(&flat, &y[..]), Err(LdaError::InvalidShape { ndim : 1 })));

    let cube = Array::new(vec![2, 2, 2], vec![0.; 8]).unwrap();
    assert!(matches!(lda.fit(&cube, &y[..]), Err(LdaError::InvalidShape { ndim : 3 })));

    let values = [0.5, 1.5];
    assert!(matches!(lda.fit(&values[..], &y[..]), Err(LdaError::InvalidShape { ndim : 1 })));
    assert!(!lda.is_fitted());
}

#[test]
fn refit_replaces_parameters() {
    let (x1, y1) = make_dataset1(200, 11).unwrap();
    let mut lda = LinearDiscriminant::new();
    lda.fit(&x1, &y1[..]).unwrap();

    // Three classes with different labels and locations.
    let mut rng = StdRng::seed_from_u64(5);
    let sigma = DMatrix::<f64>::identity(2, 2);
    let mut x2 = DMatrix::zeros(0, 2);
    let mut y2 = Vec::new();
    for (label, loc) in [(5u32, 0.), (7, 4.), (9, 8.)].iter() {
        let mn = MultiNormal::new(DVector::from_element(2, *loc), sigma.clone()).unwrap();
        x2 = stack(&x2, &mn.sample(30, &mut rng).unwrap());
        y2.extend(std::iter::repeat(*label).take(30));
    }
    lda.fit(&x2, &y2[..]).unwrap();

    let mut fresh = LinearDiscriminant::new();
    fresh.fit(&x2, &y2[..]).unwrap();
    assert_eq!(lda.classes().unwrap(), &[5, 7, 9]);
    assert_eq!(lda.predict_proba(&x1).unwrap(), fresh.predict_proba(&x1).unwrap());
    assert_eq!(lda.predict(&x2).unwrap(), fresh.predict(&x2).unwrap());
    assert_eq!(lda.priors().unwrap().len(), 3);
}

#[test]
fn failed_fit_keeps_parameters() {
    let (x, y) = make_dataset1(100, 13).unwrap();
    let mut lda = LinearDiscriminant::new();
    lda.fit(&x, &y[..]).unwrap();
    let before = lda.predict_proba(&x).unwrap();
    assert!(lda.fit(&x, &y[1..]).is_err());
    assert_eq!(lda.predict_proba(&x).unwrap(), before);
}

#[test]
fn lexicographic_registry() {
    let x = vec![vec![4.0, 0.1], vec![4.2, -0.1], vec![3.9, 0.2], vec![0.1, 0.0], vec![-0.2, 0.3], vec![0.0, -0.2]];
    let y = ["dog", "dog", "dog", "cat", "cat", "cat"];
    let mut lda = LinearDiscriminant::new();
    lda.fit(&x, &y[..]).unwrap();
    assert_eq!(lda.classes().unwrap(), &["cat", "dog"]);
    let proba = lda.predict_proba(&vec![vec![0.0, 0.0]]).unwrap();
    assert!(proba[(0, 0)] > proba[(0, 1)]);
    assert_eq!(lda.predict(&vec![vec![4.0, 0.0]]).unwrap(), vec!["dog"]);
}

#[test]
fn singular_covariance() {
    // The second feature duplicates the first one.
    let x = DMatrix::from_row_slice(6, 2, &[0., 0., 1., 1., 2., 2., 5., 5., 6., 6., 7., 7.]);
    let y = [0, 0, 0, 1, 1, 1];
    let mut lda = LinearDiscriminant::new();
    assert!(lda.fit(&x, &y[..]).is_ok());
    assert!(matches!(lda.predict_proba(&x), Err(LdaError::SingularCovariance { .. })));
    assert!(matches!(lda.predict(&x), Err(LdaError::SingularCovariance { .. })));

    // A class with a single sample has an undefined unbiased covariance.
    let x = DMatrix::from_row_slice(4, 1, &[0., 0.5, 1., 9.]);
    let y = [0, 0, 0, 1];
    lda.fit(&x, &y[..]).unwrap();
    assert!(matches!(lda.predict(&x), Err(LdaError::SingularCovariance { .. })));
}

#[test]
fn vanishing_densities() {
    let x = DMatrix::from_row_slice(6, 1, &[-1.1, -0.9, -1.0, 1.0, 0.9, 1.1]);
    let y = [0, 0, 0, 1, 1, 1];
    let mut lda = LinearDiscriminant::new();
    lda.fit(&x, &y[..]).unwrap();
    let far = DMatrix::from_element(1, 1, 1E6);
    let proba = lda.predict_proba(&far).unwrap();
    assert!(proba.iter().all(|p| p.is_nan() ));
    assert_eq!(lda.predict(&far).unwrap(), vec![0]);
}

#[test]
fn predict_dimension_mismatch() {
    let (x, y) = make_dataset1(100, 17).unwrap();
    let mut lda = LinearDiscriminant::new();
    lda.fit(&x, &y[..]).unwrap();
    let wide = DMatrix::from_element(2, 3, 0.0);
    assert!(matches!(lda.predict(&wide), Err(LdaError::DimensionMismatch { expected : 2, found : 3 })));
}

#[test]
fn repeated_trials() {
    let settings = TrialSettings { n_points : 300, ..Default::default() };
    let report = run_trials(make_dataset1, &settings).unwrap();
    assert_eq!(report.accuracies.len(), 5);
    assert!(report.mean > 0.9);
    assert!(report.std >= 0.0);
    assert!(report.accuracies.iter().all(|a| *a >= 0.0 && *a <= 1.0 ));

    let (first, second) = compute_statistics(&settings).unwrap();
    assert_eq!(first.accuracies, report.accuracies);
    assert_eq!(second.accuracies.len(), 5);
}

#[test]
fn boundary_tables() {
    let (x, y) = make_dataset1(200, 27).unwrap();
    let split = train_test_split(&x, &y[..], 0.2, 27).unwrap();
    let mut lda = LinearDiscriminant::new();
    lda.fit(&split.train_x, &split.train_y[..]).unwrap();
    let grid = DecisionGrid::around(&lda, &split.test_x, 0.5, 0.25).unwrap();
    assert_eq!(grid.proba.nrows(), grid.len());
    assert_eq!(grid.labels.len(), grid.len());

    let dir = std::env::temp_dir().join(format!("lda-boundary-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("grid.csv");
    grid.write_csv(&path).unwrap();
    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["x0", "x1", "p_0", "p_1", "label"]);
    assert_eq!(rdr.records().count(), grid.len());
    std::fs::remove_dir_all(&dir).unwrap();
}
