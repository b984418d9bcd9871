use lda::{LinearDiscriminant, Estimator, Classifier};
use lda::decision::argmax;
use lda::sample::train_test_split;
use lda::sim::{make_dataset1, make_dataset2};
use nalgebra::DMatrix;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_posterior_consistency(seed in 0u64..1000, n in 20usize..200, second in any::<bool>()) {
        let (x, y) = if second { make_dataset2(n, seed).unwrap() } else { make_dataset1(n, seed).unwrap() };
        let mut lda = LinearDiscriminant::new();
        let params = lda.fit(&x, &y[..]).unwrap();
        prop_assert!((params.priors.sum() - 1.0).abs() < 1E-9);
        let classes = params.classes.clone();

        let proba = lda.predict_proba(&x).unwrap();
        let pred = lda.predict(&x).unwrap();
        prop_assert_eq!(pred.len(), n);
        for (row, label) in proba.row_iter().zip(pred.iter()) {
            prop_assert!((row.sum() - 1.0).abs() < 1E-6);
            prop_assert_eq!(classes[argmax(row.iter().cloned())], *label);
        }
    }

    #[test]
    fn prop_split_partitions_rows(n in 10usize..300, test_size in 0.05f64..0.9, seed in any::<u64>()) {
        let x = DMatrix::from_fn(n, 1, |i, _| i as f64 );
        let y : Vec<usize> = (0..n).collect();
        let split = train_test_split(&x, &y[..], test_size, seed).unwrap();
        prop_assert_eq!(split.test_y.len(), (test_size * n as f64).ceil() as usize);
        prop_assert_eq!(split.train_y.len() + split.test_y.len(), n);

        let mut all : Vec<usize> = split.train_y.iter().chain(split.test_y.iter()).cloned().collect();
        all.sort();
        prop_assert_eq!(all, y);
    }
}
