use nalgebra::*;
use std::fmt::Debug;
use crate::error::Result;

pub mod multinormal;

pub use multinormal::*;

/// Trait shared by continuous distributions over fixed-length real vectors. The
/// distribution state is fixed at construction, so evaluation and sampling only
/// read it; evaluation can still fail when the state is numerically invalid
/// (a covariance without inverse, for instance), and this failure is reported
/// at every call instead of at construction.
pub trait Distribution
    where Self : Debug
{

    /// Dimensionality p of the realizations.
    fn dim(&self) -> usize;

    /// Expected value of the distribution.
    fn mean<'a>(&'a self) -> &'a DVector<f64>;

    /// Normalized probability density at the realization x.
    fn prob(&self, x : &DVector<f64>) -> Result<f64>;

    /// Draws n independent realizations, arranged over the rows of the output.
    fn sample<R>(&self, n : usize, rng : &mut R) -> Result<DMatrix<f64>>
        where R : rand::Rng;

}
