//! Linear discriminant analysis: a generative classifier that models each class as a
//! multivariate normal sharing one covariance matrix, and applies Bayes rule to produce
//! posterior class probabilities.

/// Error type shared by all modules.
pub mod error;

/// Feature sample representations accepted by the estimators, and the seeded train/test split.
pub mod sample;

/// Sample statistics (means, unbiased covariances, matrix averages).
pub mod calc;

/// Multivariate normal distribution, with density evaluation under a cached covariance
/// factorization and sampling via the Cholesky factor.
pub mod distr;

/// Estimator and classifier traits, and the linear discriminant analysis classifier.
pub mod fit;

/// Decision rules over posterior probabilities, accuracy scoring and decision-region meshes.
pub mod decision;

/// Synthetic two-class datasets and repeated-trial accuracy statistics.
pub mod sim;

pub use error::{LdaError, Result};

pub use fit::{Classifier, Estimator, LdaParams, LinearDiscriminant};
