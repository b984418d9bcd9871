use nalgebra::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display};
use super::*;
use crate::calc;
use crate::decision::{self, argmax};
use crate::distr::{Covariance, density};
use crate::error::{LdaError, Result};
use crate::sample::Sample;

/// Parameters of a fitted linear discriminant: the sorted class registry, one mean vector per
/// class, the covariance shared by all classes and the class prior probabilities. All
/// per-class quantities are indexed by the position of the class in the registry.
#[derive(Debug, Clone)]
pub struct LdaParams<L> {

    pub classes : Vec<L>,

    pub means : Vec<DVector<f64>>,

    /// Unweighted element-wise average of the unbiased covariance of each class.
    pub covariance : Covariance,

    /// Class frequencies at the training sample (sums to one).
    pub priors : DVector<f64>,

    index : BTreeMap<L, usize>,

    n_features : usize

}

impl<L> LdaParams<L>
where
    L : Ord + Clone
{

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Position of the label at the class registry, if it was observed at fit time.
    pub fn class_index(&self, label : &L) -> Option<usize> {
        self.index.get(label).cloned()
    }

    /// Gaussian density f_k(x) of the feature vector x under the mean of class k and the
    /// shared covariance. Fails if k is not a registry index, if x does not have one entry per
    /// feature, or if the shared covariance is singular.
    pub fn density_at(&self, x : &DVector<f64>, class_ix : usize) -> Result<f64> {
        let mu = self.means.get(class_ix)
            .ok_or(LdaError::ClassIndex { index : class_ix, n_classes : self.n_classes() })?;
        density(x, mu, &self.covariance)
    }

    /// Bayes rule over the registry: P(y=k|x) = f_k(x) prior_k / Σ_j f_j(x) prior_j.
    /// When all weighted densities are zero the result holds NaN entries.
    pub fn posterior(&self, x : &DVector<f64>) -> Result<DVector<f64>> {
        let mut joint = DVector::zeros(self.n_classes());
        for (k, prior) in self.priors.iter().enumerate() {
            joint[k] = self.density_at(x, k)? * prior;
        }
        let denom = joint.sum();
        if denom == 0.0 {
            tracing::warn!("all class densities vanished; posterior is undefined");
        }
        Ok(joint.unscale(denom))
    }

}

impl<L> Display for LdaParams<L>
where
    L : Debug
{

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "classes = {:?}", self.classes)?;
        for (c, m) in self.classes.iter().zip(self.means.iter()) {
            write!(f, "mean[{:?}] = {}", c, m.transpose())?;
        }
        write!(f, "covariance = {}", self.covariance.matrix())?;
        write!(f, "priors = {}", self.priors.transpose())
    }

}

/// Linear discriminant analysis classifier. Each class is modelled as a multivariate normal
/// with its own location but with a covariance shared by all classes (homoscedasticity),
/// and classification follows from the posterior class probabilities given by Bayes rule. Since
/// the classes differ only in location, the boundaries between classes are linear.
///
/// The label type can be anything with a total order (integer codes, strings, enums), since
/// the class registry is the sorted set of observed labels. The model starts unfitted, and any
/// inference before fit(.) returns LdaError::Unfitted.
///
/// ```rust
/// use nalgebra::DMatrix;
/// use lda::fit::{LinearDiscriminant, Estimator, Classifier};
///
/// let x = DMatrix::from_row_slice(6, 1, &[-1.1, -0.9, -1.0, 1.0, 0.9, 1.2]);
/// let y = ["a", "a", "a", "b", "b", "b"];
/// let mut lda = LinearDiscriminant::new();
/// lda.fit(&x, &y[..]).unwrap();
/// let pred = lda.predict(&DMatrix::from_row_slice(2, 1, &[-2., 2.])).unwrap();
/// assert_eq!(pred, vec!["a", "b"]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearDiscriminant<L> {
    params : Option<LdaParams<L>>
}

impl<L> Default for LinearDiscriminant<L> {

    fn default() -> Self {
        Self { params : None }
    }

}

impl<L> LinearDiscriminant<L>
where
    L : Ord + Clone
{

    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    pub fn means(&self) -> Option<&[DVector<f64>]> {
        self.params.as_ref().map(|p| &p.means[..] )
    }

    pub fn covariance(&self) -> Option<&DMatrix<f64>> {
        self.params.as_ref().map(|p| p.covariance.matrix() )
    }

    pub fn priors(&self) -> Option<&DVector<f64>> {
        self.params.as_ref().map(|p| &p.priors )
    }

    /// Density f_k(x) of the feature vector x under the class at position class_ix
    /// of the registry.
    pub fn density_at(&self, x : &[f64], class_ix : usize) -> Result<f64> {
        let params = self.params.as_ref().ok_or(LdaError::Unfitted)?;
        if x.len() != params.n_features() {
            return Err(LdaError::DimensionMismatch { expected : params.n_features(), found : x.len() });
        }
        params.density_at(&DVector::from_column_slice(x), class_ix)
    }

    /// Fraction of samples at x whose predicted label equals the label at y.
    pub fn score<S>(&self, x : &S, y : &[L]) -> Result<f64>
    where
        S : Sample + ?Sized
    {
        let pred = self.predict(x)?;
        decision::accuracy(y, &pred[..])
    }

}

/// Splits the row indices of the sample by class, preserving the sample order inside each class.
fn partition<L>(y : &[L], index : &BTreeMap<L, usize>) -> Vec<Vec<usize>>
where
    L : Ord
{
    let mut members = vec![Vec::new(); index.len()];
    for (row, label) in y.iter().enumerate() {
        members[index[label]].push(row);
    }
    members
}

impl<L> Estimator<L> for LinearDiscriminant<L>
where
    L : Ord + Clone
{

    type Params = LdaParams<L>;

    /// Estimates class means, the shared covariance and the class priors. The sample is validated
    /// before any state changes, so a failed call preserves any previously fitted parameters.
    fn fit<'a, S>(&'a mut self, x : &S, y : &[L]) -> Result<&'a LdaParams<L>>
    where
        S : Sample + ?Sized
    {
        if x.ndim() != 2 {
            return Err(LdaError::InvalidShape { ndim : x.ndim() });
        }
        let x = x.design()?;
        if y.len() != x.nrows() {
            return Err(LdaError::MismatchedLength { samples : x.nrows(), labels : y.len() });
        }
        if y.is_empty() {
            return Err(LdaError::EmptyInput);
        }

        let classes : Vec<L> = y.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        let index : BTreeMap<L, usize> = classes.iter().cloned().enumerate().map(|(i, c)| (c, i) ).collect();
        let members = partition(y, &index);

        let mut means = Vec::with_capacity(classes.len());
        let mut covs = Vec::with_capacity(classes.len());
        for rows in members.iter() {
            let xk = x.select_rows(rows.iter());
            means.push(calc::column_means(&xk));
            covs.push(calc::covariance(&xk, true));
        }

        // Homoscedasticity: a single covariance, regardless of class sizes.
        let sigma = calc::average(&covs[..]).ok_or(LdaError::EmptyInput)?;
        let n = y.len() as f64;
        let priors = DVector::from_iterator(classes.len(), members.iter().map(|m| m.len() as f64 / n ));

        tracing::debug!(
            n_samples = x.nrows(),
            n_features = x.ncols(),
            n_classes = classes.len(),
            "fitted linear discriminant"
        );

        let params = LdaParams {
            classes,
            means,
            covariance : Covariance::new(sigma),
            priors,
            index,
            n_features : x.ncols()
        };
        Ok(&*self.params.insert(params))
    }

    fn params<'a>(&'a self) -> Option<&'a LdaParams<L>> {
        self.params.as_ref()
    }

}

impl<L> Classifier<L> for LinearDiscriminant<L>
where
    L : Ord + Clone
{

    fn classes(&self) -> Option<&[L]> {
        self.params.as_ref().map(|p| &p.classes[..] )
    }

    fn predict_proba<S>(&self, x : &S) -> Result<DMatrix<f64>>
    where
        S : Sample + ?Sized
    {
        let params = self.params.as_ref().ok_or(LdaError::Unfitted)?;
        let x = x.design()?;
        if x.nrows() > 0 && x.ncols() != params.n_features() {
            return Err(LdaError::DimensionMismatch { expected : params.n_features(), found : x.ncols() });
        }
        let mut proba = DMatrix::zeros(x.nrows(), params.n_classes());
        for (i, row) in x.row_iter().enumerate() {
            let post = params.posterior(&row.transpose())?;
            proba.row_mut(i).copy_from(&post.transpose());
        }
        Ok(proba)
    }

    fn predict<S>(&self, x : &S) -> Result<Vec<L>>
    where
        S : Sample + ?Sized
    {
        let proba = self.predict_proba(x)?;
        let classes = self.classes().ok_or(LdaError::Unfitted)?;
        Ok(proba.row_iter().map(|row| classes[argmax(row.iter().cloned())].clone() ).collect())
    }

}

#[test]
fn registry_order() {
    let x = DMatrix::from_row_slice(6, 1, &[5., 5.2, 0.1, -0.1, 4.8, 0.]);
    let y = [2u8, 2, 1, 1, 2, 1];
    let mut lda = LinearDiscriminant::new();
    let params = lda.fit(&x, &y[..]).unwrap();
    assert_eq!(params.classes, vec![1, 2]);
    assert_eq!(params.class_index(&2), Some(1));
    assert!((params.means[0][0] - 0.0).abs() < 1E-12);
    assert!((params.means[1][0] - 5.0).abs() < 1E-12);

    // Class variances 0.01 and 0.04 (n-1 normalized), averaged.
    assert!((params.covariance.matrix()[(0, 0)] - 0.025).abs() < 1E-12);
    assert!(matches!(lda.density_at(&[0.], 2), Err(LdaError::ClassIndex { index : 2, n_classes : 2 })));
    assert!(matches!(lda.density_at(&[0., 1.], 0), Err(LdaError::DimensionMismatch { .. })));
}

#[test]
fn unweighted_pooling() {
    // Class 0 has variance 1 over 3 samples; class 1 has variance 8 over 2 samples.
    let x = DMatrix::from_row_slice(5, 1, &[-1., 0., 1., 8., 12.]);
    let y = [0, 0, 0, 1, 1];
    let mut lda = LinearDiscriminant::new();
    let params = lda.fit(&x, &y[..]).unwrap();
    assert!((params.covariance.matrix()[(0, 0)] - 4.5).abs() < 1E-12);
    assert!((params.priors[0] - 0.6).abs() < 1E-12);
}
