use nalgebra::*;
use crate::sample::Sample;
use crate::error::Result;

/// Linear discriminant analysis (gaussian classes sharing a covariance matrix).
pub mod lda;

pub use self::lda::*;

/// Trait shared by supervised estimation algorithms, parametrized by the label type. The
/// estimated parameters are produced at once by fit(.) and are immutable afterwards:
/// a new call to fit(.) replaces them entirely. Estimators do not care how the
/// feature sample is represented, as long as it can be packed into a design matrix.
pub trait Estimator<L> {

    type Params;

    /// Runs the estimation algorithm for the informed sample (observations over rows)
    /// and labels (one per observation), returning a reference to the estimated parameters.
    fn fit<'a, S>(&'a mut self, x : &S, y : &[L]) -> Result<&'a Self::Params>
    where
        S : Sample + ?Sized;

    /// If fit(.) has been called successfully at least once, returns the current state
    /// of the parameters, whithout changing the algorithm state.
    fn params<'a>(&'a self) -> Option<&'a Self::Params>;

}

/// Estimators which assign posterior probabilities over a finite set of classes.
pub trait Classifier<L> : Estimator<L> {

    /// Sorted labels observed at fit time, which index the columns of predict_proba(.).
    fn classes(&self) -> Option<&[L]>;

    /// Posterior class probabilities, with samples over rows and classes over columns.
    fn predict_proba<S>(&self, x : &S) -> Result<DMatrix<f64>>
    where
        S : Sample + ?Sized;

    /// Most probable label of each sample.
    fn predict<S>(&self, x : &S) -> Result<Vec<L>>
    where
        S : Sample + ?Sized;

}
