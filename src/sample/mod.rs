use nalgebra::*;
use crate::error::{LdaError, Result};

/// Seeded partition of a labelled sample into train and test sets.
pub mod split;

pub use split::*;

/// Samples are types which hold independent observations (the rows of a design
/// matrix), and interface directly with the estimators of this crate. Any implementor
/// must be convertible into a dynamically-allocated matrix with observations
/// over rows and features over columns, which is the representation against
/// which means, covariances and densities are calculated.
///
/// Implementors that do not have exactly two dimensions (a flat vector of values,
/// or a stack of matrices) can still be informed, but will be rejected at
/// conversion with LdaError::InvalidShape, so that shape errors are reported eagerly
/// by the estimators instead of silently reinterpreting the buffer.
pub trait Sample {

    /// Number of axes of the implementor (2 for a valid design matrix).
    fn ndim(&self) -> usize;

    /// Number of observations (length of the first axis).
    fn nrows(&self) -> usize;

    /// Packs the observations into a row-major design matrix.
    fn design(&self) -> Result<DMatrix<f64>>;

}

impl Sample for DMatrix<f64> {

    fn ndim(&self) -> usize {
        2
    }

    fn nrows(&self) -> usize {
        self.shape().0
    }

    fn design(&self) -> Result<DMatrix<f64>> {
        Ok(self.clone())
    }

}

/// Vectors of rows are valid design matrices only if all rows share the same length.
impl Sample for [Vec<f64>] {

    fn ndim(&self) -> usize {
        2
    }

    fn nrows(&self) -> usize {
        self.len()
    }

    fn design(&self) -> Result<DMatrix<f64>> {
        let ncols = self.first().map(|r| r.len() ).unwrap_or(0);
        if let Some(row) = self.iter().find(|r| r.len() != ncols ) {
            return Err(LdaError::DimensionMismatch { expected : ncols, found : row.len() });
        }
        let data : Vec<f64> = self.iter().flat_map(|r| r.iter().cloned() ).collect();
        Ok(DMatrix::from_row_slice(self.len(), ncols, &data[..]))
    }

}

impl Sample for Vec<Vec<f64>> {

    fn ndim(&self) -> usize {
        2
    }

    fn nrows(&self) -> usize {
        self.len()
    }

    fn design(&self) -> Result<DMatrix<f64>> {
        self[..].design()
    }

}

/// A flat sequence of values is a one-dimensional array, and never a valid design.
impl Sample for [f64] {

    fn ndim(&self) -> usize {
        1
    }

    fn nrows(&self) -> usize {
        self.len()
    }

    fn design(&self) -> Result<DMatrix<f64>> {
        Err(LdaError::InvalidShape { ndim : 1 })
    }

}

/// Dense n-dimensional array of real values stored in row-major order, used to
/// receive feature buffers whose dimensionality is only known at runtime
/// (e.g. deserialized or produced by external tools).
#[derive(Debug, Clone, PartialEq)]
pub struct Array {

    shape : Vec<usize>,

    data : Vec<f64>

}

impl Array {

    /// Builds an array from its shape and row-major buffer. The buffer length
    /// must equal the product of the shape entries.
    pub fn new(shape : Vec<usize>, data : Vec<f64>) -> Result<Self> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(LdaError::DimensionMismatch { expected, found : data.len() });
        }
        Ok(Self { shape, data })
    }

    pub fn from_rows(rows : &[Vec<f64>]) -> Result<Self> {
        let m = rows.design()?;
        let (nrows, ncols) = m.shape();
        let data = m.transpose().as_slice().to_vec();
        Self::new(vec![nrows, ncols], data)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape[..]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data[..]
    }

}

impl Sample for Array {

    fn ndim(&self) -> usize {
        self.shape.len()
    }

    fn nrows(&self) -> usize {
        self.shape.first().cloned().unwrap_or(0)
    }

    fn design(&self) -> Result<DMatrix<f64>> {
        match self.shape[..] {
            [nrows, ncols] => Ok(DMatrix::from_row_slice(nrows, ncols, &self.data[..])),
            _ => Err(LdaError::InvalidShape { ndim : self.ndim() })
        }
    }

}

impl From<DMatrix<f64>> for Array {

    fn from(m : DMatrix<f64>) -> Self {
        let (nrows, ncols) = m.shape();
        let data = m.transpose().as_slice().to_vec();
        Self { shape : vec![nrows, ncols], data }
    }

}

#[test]
fn array_design() {
    let arr = Array::new(vec![2, 3], vec![1., 2., 3., 4., 5., 6.]).unwrap();
    let m = arr.design().unwrap();
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m[(1, 0)], 4.);
    assert_eq!(Array::from(m.clone()), arr);

    let cube = Array::new(vec![2, 1, 3], vec![0.; 6]).unwrap();
    assert!(matches!(cube.design(), Err(LdaError::InvalidShape { ndim : 3 })));
    assert!(Array::new(vec![2, 2], vec![0.; 3]).is_err());
}

#[test]
fn ragged_rows() {
    let rows = vec![vec![1., 2.], vec![3.]];
    assert!(matches!(rows.design(), Err(LdaError::DimensionMismatch { expected : 2, found : 1 })));
}
