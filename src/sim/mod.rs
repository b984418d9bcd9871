use nalgebra::*;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::f64::consts::FRAC_PI_4;
use std::fmt::{self, Display};
use std::str::FromStr;
use crate::distr::{Distribution, MultiNormal};
use crate::error::{LdaError, Result};

/// Repeated fit/evaluate cycles over generated datasets, summarized by accuracy statistics.
pub mod trials;

pub use trials::*;

/// Standard deviations of the gaussian classes along their principal axes.
const AXIS_STD : [f64; 2] = [1.5, 0.5];

const CLASS_MEANS : [[f64; 2]; 2] = [[0.0, 0.0], [1.5, -1.5]];

/// Draws n two-feature observations, the first n/2 from class 0 and the remaining from class 1.
/// Each class is a bivariate normal with axis deviations AXIS_STD, rotated by the corresponding
/// entry of angles (radians). Rows are shuffled, and the whole draw is a function of the seed.
pub fn make_data(n : usize, angles : [f64; 2], seed : u64) -> Result<(DMatrix<f64>, Vec<u32>)> {
    if n < 2 {
        return Err(LdaError::InvalidParameter { name : "n", message : "at least one point per class" });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let n0 = n / 2;
    let class0 = MultiNormal::rotated(CLASS_MEANS[0], AXIS_STD, angles[0])?;
    let class1 = MultiNormal::rotated(CLASS_MEANS[1], AXIS_STD, angles[1])?;
    let mut x = DMatrix::zeros(n, 2);
    x.rows_mut(0, n0).copy_from(&class0.sample(n0, &mut rng)?);
    x.rows_mut(n0, n - n0).copy_from(&class1.sample(n - n0, &mut rng)?);
    let y : Vec<u32> = (0..n).map(|i| if i < n0 { 0 } else { 1 } ).collect();

    let mut order : Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    let x = x.select_rows(order.iter());
    let y = order.iter().map(|i| y[*i] ).collect();
    Ok((x, y))
}

/// Both classes share the same orientation, so they share one covariance matrix and the
/// optimal boundary is linear.
pub fn make_dataset1(n : usize, seed : u64) -> Result<(DMatrix<f64>, Vec<u32>)> {
    make_data(n, [FRAC_PI_4, FRAC_PI_4], seed)
}

/// Classes have orthogonal orientations, so their covariances differ.
pub fn make_dataset2(n : usize, seed : u64) -> Result<(DMatrix<f64>, Vec<u32>)> {
    make_data(n, [FRAC_PI_4, -FRAC_PI_4], seed)
}

/// Selects one of the synthetic generators by name ("1" or "2").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    One,
    Two
}

impl Dataset {

    pub fn generate(&self, n : usize, seed : u64) -> Result<(DMatrix<f64>, Vec<u32>)> {
        match self {
            Dataset::One => make_dataset1(n, seed),
            Dataset::Two => make_dataset2(n, seed)
        }
    }

    /// Stem used to name output files produced from this dataset.
    pub fn stem(&self) -> &'static str {
        match self {
            Dataset::One => "lda_dataset1",
            Dataset::Two => "lda_dataset2"
        }
    }

}

impl FromStr for Dataset {

    type Err = LdaError;

    fn from_str(s : &str) -> Result<Self> {
        match s.trim() {
            "1" | "dataset1" => Ok(Dataset::One),
            "2" | "dataset2" => Ok(Dataset::Two),
            _ => Err(LdaError::InvalidParameter { name : "dataset", message : "expected 1 or 2" })
        }
    }

}

impl Display for Dataset {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem())
    }

}

#[test]
fn balanced_classes() {
    let (x, y) = make_dataset1(101, 11).unwrap();
    assert_eq!(x.shape(), (101, 2));
    assert_eq!(y.iter().filter(|l| **l == 0 ).count(), 50);
    assert_eq!(y.iter().filter(|l| **l == 1 ).count(), 51);

    let (x2, y2) = make_dataset1(101, 11).unwrap();
    assert_eq!(x, x2);
    assert_eq!(y, y2);
    assert!(make_dataset2(1, 11).is_err());
}
