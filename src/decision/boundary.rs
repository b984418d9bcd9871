use nalgebra::*;
use std::fmt::Display;
use std::path::Path;
use crate::fit::Classifier;
use crate::error::{LdaError, Result};
use super::argmax;

/// Posterior probabilities and decisions of a two-feature classifier over a regular
/// mesh. Rendering is left to external plotting tools, which receive the mesh as
/// a CSV table (one row per mesh point).
#[derive(Debug, Clone)]
pub struct DecisionGrid<L> {

    /// Mesh points (m x 2), with the first coordinate varying fastest.
    pub points : DMatrix<f64>,

    /// Posterior probabilities (m x k), columns following the class registry.
    pub proba : DMatrix<f64>,

    pub labels : Vec<L>,

    pub classes : Vec<L>

}

fn axis(range : (f64, f64), step : f64) -> Result<Vec<f64>> {
    if !(step > 0.0) || !(range.1 >= range.0) || !range.0.is_finite() || !range.1.is_finite() {
        return Err(LdaError::InvalidParameter {
            name : "range",
            message : "mesh requires finite increasing bounds and a positive step"
        });
    }
    let n = ((range.1 - range.0) / step).floor() as usize + 1;
    Ok((0..n).map(|i| range.0 + i as f64 * step ).collect())
}

impl<L> DecisionGrid<L>
where
    L : Clone
{

    /// Evaluates the classifier at the mesh spanned by x_range (first feature) and
    /// y_range (second feature), with points separated by step along both axes.
    pub fn evaluate<C>(model : &C, x_range : (f64, f64), y_range : (f64, f64), step : f64) -> Result<Self>
    where
        C : Classifier<L>
    {
        let classes = model.classes().ok_or(LdaError::Unfitted)?.to_vec();
        let xs = axis(x_range, step)?;
        let ys = axis(y_range, step)?;
        let mut points = DMatrix::zeros(xs.len() * ys.len(), 2);
        for (i, y) in ys.iter().enumerate() {
            for (j, x) in xs.iter().enumerate() {
                let r = i * xs.len() + j;
                points[(r, 0)] = *x;
                points[(r, 1)] = *y;
            }
        }
        let proba = model.predict_proba(&points)?;
        let labels = proba.row_iter()
            .map(|row| classes[argmax(row.iter().cloned())].clone() )
            .collect();
        Ok(Self { points, proba, labels, classes })
    }

    /// Sizes the mesh from the bounding box of the two-feature sample x, extended
    /// by margin on all sides.
    pub fn around<C>(model : &C, x : &DMatrix<f64>, margin : f64, step : f64) -> Result<Self>
    where
        C : Classifier<L>
    {
        if x.ncols() != 2 {
            return Err(LdaError::DimensionMismatch { expected : 2, found : x.ncols() });
        }
        if x.nrows() == 0 {
            return Err(LdaError::EmptyInput);
        }
        let x0 = x.column(0);
        let x1 = x.column(1);
        Self::evaluate(
            model,
            (x0.min() - margin, x0.max() + margin),
            (x1.min() - margin, x1.max() + margin),
            step
        )
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

}

impl<L> DecisionGrid<L>
where
    L : Clone + Display
{

    /// Writes the table x0,x1,p_<class>...,label to the informed path.
    pub fn write_csv(&self, path : impl AsRef<Path>) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        let mut header = vec![String::from("x0"), String::from("x1")];
        header.extend(self.classes.iter().map(|c| format!("p_{}", c) ));
        header.push(String::from("label"));
        wtr.write_record(&header)?;
        for ((pt, p), label) in self.points.row_iter().zip(self.proba.row_iter()).zip(self.labels.iter()) {
            let mut record : Vec<String> = pt.iter().chain(p.iter()).map(|v| v.to_string() ).collect();
            record.push(label.to_string());
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

}

/// Writes the labelled two-feature sample as the table x0,x1,label, so that it can be
/// overlaid on the decision regions.
pub fn write_points_csv<L>(path : impl AsRef<Path>, x : &DMatrix<f64>, y : &[L]) -> Result<()>
where
    L : Display
{
    if x.nrows() != y.len() {
        return Err(LdaError::MismatchedLength { samples : x.nrows(), labels : y.len() });
    }
    let mut wtr = csv::Writer::from_path(path)?;
    let header : Vec<String> = (0..x.ncols()).map(|j| format!("x{}", j) )
        .chain(std::iter::once(String::from("label")))
        .collect();
    wtr.write_record(&header)?;
    for (row, label) in x.row_iter().zip(y.iter()) {
        let mut record : Vec<String> = row.iter().map(|v| v.to_string() ).collect();
        record.push(label.to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[test]
fn mesh_axis() {
    let ax = axis((0., 1.), 0.25).unwrap();
    assert_eq!(ax.len(), 5);
    assert!((ax[4] - 1.).abs() < 1E-12);
    assert!(axis((1., 0.), 0.1).is_err());
    assert!(axis((0., 1.), 0.).is_err());
}
