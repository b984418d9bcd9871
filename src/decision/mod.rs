use crate::error::{LdaError, Result};

/// Evaluation of a fitted classifier over a regular two-dimensional mesh, used to
/// draw its decision regions.
pub mod boundary;

pub use boundary::*;

/// Index of the maximum value. Ties are resolved in favour of the first occurrence, and
/// a NaN at the first position is never displaced (a row of undefined probabilities
/// decides for the first class). Returns zero for an empty sequence.
pub fn argmax(vals : impl IntoIterator<Item=f64>) -> usize {
    let mut vals = vals.into_iter().enumerate();
    let mut best = match vals.next() {
        Some(first) => first,
        None => return 0
    };
    for (ix, v) in vals {
        if v > best.1 {
            best = (ix, v);
        }
    }
    best.0
}

/// Fraction of positions at which the predicted label equals the true label.
pub fn accuracy<L>(y_true : &[L], y_pred : &[L]) -> Result<f64>
where
    L : PartialEq
{
    if y_true.len() != y_pred.len() {
        return Err(LdaError::MismatchedLength { samples : y_true.len(), labels : y_pred.len() });
    }
    if y_true.is_empty() {
        return Err(LdaError::EmptyInput);
    }
    let n_correct = y_true.iter().zip(y_pred.iter()).filter(|(t, p)| t == p ).count();
    Ok(n_correct as f64 / y_true.len() as f64)
}

#[test]
fn first_maximum() {
    assert_eq!(argmax(vec![0.2, 0.4, 0.4]), 1);
    assert_eq!(argmax(vec![0.5, 0.5]), 0);
    assert_eq!(argmax(vec![f64::NAN, f64::NAN]), 0);
    assert_eq!(argmax(vec![0.1, 0.7, 0.2]), 1);
}

#[test]
fn fraction_correct() {
    assert_eq!(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap(), 0.75);
    assert!(matches!(accuracy(&[0, 1], &[0]), Err(LdaError::MismatchedLength { .. })));
    assert!(matches!(accuracy::<u8>(&[], &[]), Err(LdaError::EmptyInput)));
}
