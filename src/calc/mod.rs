use nalgebra::*;

/* Sample statistics over design matrices (observations over rows, features over columns)
and over plain sequences of scalars. None of these functions validate their input: an empty
design yields non-finite means, and a design with a single row yields a non-finite unbiased
covariance, which is propagated to the caller. */

/// Single-pass univariate statistical calculations.
pub mod running {

    use std::borrow::Borrow;

    pub fn mean(d : impl Iterator<Item=f64>, count : usize) -> f64 {
        d.sum::<f64>() / count as f64
    }

    pub fn mean_variance(d : impl Iterator<Item=f64>, count : usize, unbiased : bool) -> (f64, f64) {
        let (sum, sum_sq) = d.map(|s| (s, s.powf(2.)) )
            .fold((0.0, 0.0), |acc, s| (acc.0 + s.0, acc.1 + s.1) );
        let n = count as f64;
        let mean = sum / n;
        let var = (sum_sq - sum.powf(2.) / n) / if unbiased { n - 1. } else { n };
        (mean, var)
    }

    pub fn mean_variance_from_slice(d : &[f64], unbiased : bool) -> (f64, f64) {
        mean_variance(d.iter().cloned(), d.len(), unbiased)
    }

    /// Mean and standard deviation of the sample, where the deviation is calculated
    /// from the biased (ddof = 0) or unbiased (ddof = 1) variance.
    pub fn mean_stddev(sample : impl IntoIterator<Item=impl Borrow<f64>>, unbiased : bool) -> (f64, f64) {
        let vals : Vec<f64> = sample.into_iter().map(|v| *v.borrow() ).collect();
        let (mean, var) = mean_variance_from_slice(&vals[..], unbiased);
        // Guards against tiny negative variances from cancellation.
        (mean, var.max(0.0).sqrt())
    }

}

/// Arithmetic mean of each feature (column) of the design matrix.
pub fn column_means(x : &DMatrix<f64>) -> DVector<f64> {
    DVector::from_iterator(x.ncols(), x.column_iter().map(|c| c.sum() / x.nrows() as f64 ))
}

/// Pairwise feature covariance of the observations at the rows of x. Features are centered
/// at their column means, and the cross-product matrix is divided by n-1 (unbiased) or n.
pub fn covariance(x : &DMatrix<f64>, unbiased : bool) -> DMatrix<f64> {
    let n = x.nrows() as f64;
    let means = column_means(x);
    let mut centered = x.clone();
    for (mut col, m) in centered.column_iter_mut().zip(means.iter()) {
        col.add_scalar_mut(-m);
    }
    let cross = centered.transpose() * &centered;
    cross.unscale(if unbiased { n - 1. } else { n })
}

/// Element-wise unweighted average of a set of same-sized matrices.
/// Returns None if the set is empty.
pub fn average(ms : &[DMatrix<f64>]) -> Option<DMatrix<f64>> {
    let first = ms.first()?;
    let sum = ms.iter().skip(1).fold(first.clone(), |acc, m| acc + m );
    Some(sum.unscale(ms.len() as f64))
}

#[test]
fn unbiased_covariance() {
    // Check against numpy.cov([[1., 2.], [2., 4.5], [3., 5.5]], rowvar=False)
    let x = DMatrix::from_row_slice(3, 2, &[1., 2., 2., 4.5, 3., 5.5]);
    let cov = covariance(&x, true);
    assert!((cov[(0, 0)] - 1.0).abs() < 1E-12);
    assert!((cov[(0, 1)] - 1.75).abs() < 1E-12);
    assert!((cov[(1, 0)] - 1.75).abs() < 1E-12);
    assert!((cov[(1, 1)] - 3.25).abs() < 1E-12);
    let means = column_means(&x);
    assert!((means[1] - 4.0).abs() < 1E-12);
}

#[test]
fn matrix_average() {
    let a = DMatrix::from_element(2, 2, 1.);
    let b = DMatrix::from_element(2, 2, 3.);
    assert_eq!(average(&[a, b]).unwrap(), DMatrix::from_element(2, 2, 2.));
    assert!(average(&[]).is_none());
}

#[test]
fn population_stddev() {
    let (m, s) = running::mean_stddev(&[2., 4., 4., 4., 5., 5., 7., 9.], false);
    assert!((m - 5.).abs() < 1E-12);
    assert!((s - 2.).abs() < 1E-12);
}
