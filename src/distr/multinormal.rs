use nalgebra::*;
use super::*;
use std::f64::consts::PI;
use std::fmt::{self, Display};
use rand_distr::StandardNormal;
use crate::error::{LdaError, Result};

/// Covariance matrix Σ (pxp) factored once at construction. The determinant
/// and the precision (inverse covariance) are cached, so that repeated density
/// evaluations only perform a quadratic form. Construction never fails: a
/// singular or non-positive-definite covariance is kept as-is, and the failure is
/// reported whenever the precision is requested.
#[derive(Debug, Clone)]
pub struct Covariance {

    sigma : DMatrix<f64>,

    /// None when the LU factorization has a zero pivot.
    sigma_inv : Option<DMatrix<f64>>,

    det : f64

}

impl Covariance {

    pub fn new(sigma : DMatrix<f64>) -> Self {
        assert!(sigma.nrows() == sigma.ncols());
        let sigma_lu = sigma.clone().lu();
        let det = sigma_lu.determinant();
        let sigma_inv = sigma_lu.try_inverse();
        Self { sigma, sigma_inv, det }
    }

    pub fn dim(&self) -> usize {
        self.sigma.nrows()
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.sigma
    }

    pub fn determinant(&self) -> f64 {
        self.det
    }

    /// Returns Σ⁻¹, or LdaError::SingularCovariance if Σ has no inverse or if det(Σ) is not
    /// a positive finite value (in which case the density normalization is undefined).
    pub fn precision(&self) -> Result<&DMatrix<f64>> {
        match self.sigma_inv {
            Some(ref inv) if self.det.is_finite() && self.det > 0.0 => Ok(inv),
            _ => Err(LdaError::SingularCovariance { det : self.det })
        }
    }

    /// Squared Mahalanobis distance (x-μ)ᵀ Σ⁻¹ (x-μ).
    pub fn mahalanobis(&self, x : &DVector<f64>, mu : &DVector<f64>) -> Result<f64> {
        let sigma_inv = self.precision()?;
        let diff = x - mu;
        Ok(diff.dot(&(sigma_inv * &diff)))
    }

}

/// Evaluates the multivariate normal density
/// f(x) = (2π)^(-p/2) det(Σ)^(-1/2) exp(-½ (x-μ)ᵀ Σ⁻¹ (x-μ))
/// of the realization x, with location mu and covariance cov. The expression is evaluated
/// in the probability scale, so densities far from the location underflow to zero.
pub fn density(x : &DVector<f64>, mu : &DVector<f64>, cov : &Covariance) -> Result<f64> {
    if x.nrows() != mu.nrows() {
        return Err(LdaError::DimensionMismatch { expected : mu.nrows(), found : x.nrows() });
    }
    let p = x.nrows() as f64;
    let exp_arg = -0.5 * cov.mahalanobis(x, mu)?;
    let coef = 1. / ((2. * PI).powf(p / 2.) * cov.determinant().sqrt());
    Ok(coef * exp_arg.exp())
}

/// Multivariate normal parametrized by μ (px1) and Σ (pxp). Besides density evaluation,
/// holds the lower Cholesky factor of Σ (when it exists) to generate realizations
/// as μ + L z, where z is a vector of independent standard normal draws.
#[derive(Debug, Clone)]
pub struct MultiNormal {

    mu : DVector<f64>,

    cov : Covariance,

    lower : Option<DMatrix<f64>>

}

impl MultiNormal {

    pub fn new(mu : DVector<f64>, sigma : DMatrix<f64>) -> Result<Self> {
        if mu.nrows() != sigma.nrows() || sigma.nrows() != sigma.ncols() {
            return Err(LdaError::DimensionMismatch { expected : mu.nrows(), found : sigma.nrows() });
        }
        let lower = sigma.clone().cholesky().map(|chol| chol.l() );
        Ok(Self { mu, cov : Covariance::new(sigma), lower })
    }

    /// Bivariate normal with independent axes of standard deviations (s0, s1), rotated
    /// counter-clockwise by angle (radians) around its location: Σ = R diag(s0², s1²) Rᵀ.
    pub fn rotated(mu : [f64; 2], std : [f64; 2], angle : f64) -> Result<Self> {
        let (sin, cos) = angle.sin_cos();
        let rot = DMatrix::from_row_slice(2, 2, &[cos, -sin, sin, cos]);
        let scale = DMatrix::from_diagonal(&DVector::from_column_slice(&[std[0].powf(2.), std[1].powf(2.)]));
        let sigma = &rot * scale * rot.transpose();
        Self::new(DVector::from_column_slice(&mu), sigma)
    }

    pub fn cov(&self) -> &Covariance {
        &self.cov
    }

}

impl Distribution for MultiNormal {

    fn dim(&self) -> usize {
        self.mu.nrows()
    }

    fn mean<'a>(&'a self) -> &'a DVector<f64> {
        &self.mu
    }

    fn prob(&self, x : &DVector<f64>) -> Result<f64> {
        density(x, &self.mu, &self.cov)
    }

    fn sample<R>(&self, n : usize, rng : &mut R) -> Result<DMatrix<f64>>
        where R : rand::Rng
    {
        let lower = self.lower.as_ref()
            .ok_or(LdaError::SingularCovariance { det : self.cov.determinant() })?;
        let p = self.dim();
        let mut out = DMatrix::zeros(n, p);
        for mut row in out.row_iter_mut() {
            let z = DVector::from_fn(p, |_, _| rng.sample::<f64, _>(StandardNormal) );
            let draw = &self.mu + lower * z;
            row.copy_from(&draw.transpose());
        }
        Ok(out)
    }

}

impl Display for MultiNormal {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MNorm({})", self.mu.nrows())
    }

}

#[test]
fn standard_density() {
    // (2π)^(-1) at the origin of a standard bivariate normal.
    let mut sigma = DMatrix::zeros(2, 2);
    sigma.fill_with_identity();
    let mn = MultiNormal::new(DVector::zeros(2), sigma).unwrap();
    let p = mn.prob(&DVector::zeros(2)).unwrap();
    assert!((p - 1. / (2. * PI)).abs() < 1E-12);

    // Check against scipy.stats.multivariate_normal.pdf([1., -1.], [0., 0.], [[2., 0.5], [0.5, 1.]])
    let sigma = DMatrix::from_row_slice(2, 2, &[2., 0.5, 0.5, 1.]);
    let mn = MultiNormal::new(DVector::zeros(2), sigma).unwrap();
    let p = mn.prob(&DVector::from_column_slice(&[1., -1.])).unwrap();
    assert!((p - 0.03836759318252469).abs() < 1E-10);
}

#[test]
fn singular_density() {
    let sigma = DMatrix::from_row_slice(2, 2, &[1., 1., 1., 1.]);
    let cov = Covariance::new(sigma);
    let res = density(&DVector::zeros(2), &DVector::zeros(2), &cov);
    assert!(matches!(res, Err(LdaError::SingularCovariance { .. })));
}
