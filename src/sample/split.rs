use nalgebra::*;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use crate::error::{LdaError, Result};
use super::Sample;

/// Disjoint train/test partition of a labelled sample. Rows keep their
/// (shuffled) order inside each subset, and labels stay aligned with their rows.
#[derive(Debug, Clone)]
pub struct Split<L> {

    pub train_x : DMatrix<f64>,

    pub test_x : DMatrix<f64>,

    pub train_y : Vec<L>,

    pub test_y : Vec<L>

}

/// Shuffles the row indices of (x, y) with a generator seeded by seed, and assigns
/// the first ceil(test_size * n) shuffled rows to the test set and the remaining rows to
/// the training set. Calling this twice with the same seed yields the same partition.
pub fn train_test_split<S, L>(x : &S, y : &[L], test_size : f64, seed : u64) -> Result<Split<L>>
where
    S : Sample + ?Sized,
    L : Clone
{
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(LdaError::InvalidParameter {
            name : "test_size",
            message : "must be in the open interval (0, 1)"
        });
    }
    let x = x.design()?;
    let n = x.nrows();
    if y.len() != n {
        return Err(LdaError::MismatchedLength { samples : n, labels : y.len() });
    }
    let n_test = (test_size * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(LdaError::InvalidParameter {
            name : "test_size",
            message : "leaves one of the subsets empty"
        });
    }
    let mut ixs : Vec<usize> = (0..n).collect();
    ixs.shuffle(&mut StdRng::seed_from_u64(seed));
    let (test_ix, train_ix) = ixs.split_at(n_test);
    Ok(Split {
        train_x : x.select_rows(train_ix.iter()),
        test_x : x.select_rows(test_ix.iter()),
        train_y : train_ix.iter().map(|i| y[*i].clone() ).collect(),
        test_y : test_ix.iter().map(|i| y[*i].clone() ).collect()
    })
}

#[test]
fn split_sizes() {
    let x = DMatrix::from_fn(10, 2, |i, j| (i * 2 + j) as f64 );
    let y : Vec<usize> = (0..10).collect();
    let split = train_test_split(&x, &y[..], 0.2, 11).unwrap();
    assert_eq!(split.test_x.nrows(), 2);
    assert_eq!(split.train_x.nrows(), 8);

    // Labels travel with their rows.
    for (row, label) in split.train_x.row_iter().zip(split.train_y.iter()) {
        assert_eq!(row[0], (*label * 2) as f64);
    }

    let again = train_test_split(&x, &y[..], 0.2, 11).unwrap();
    assert_eq!(split.test_y, again.test_y);
    assert!(train_test_split(&x, &y[..], 1.0, 11).is_err());
}
