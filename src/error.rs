use thiserror::Error;

/// Errors returned by estimation, inference and the dataset utilities of this crate.
/// Structural errors (shape, length) are detected when fit(.) is called; numerical
/// errors (singular covariance) only surface when the density is evaluated.
#[derive(Debug, Error)]
pub enum LdaError {

    /// The feature array is not two-dimensional.
    #[error("X must be 2 dimensional (found {ndim} dimension(s))")]
    InvalidShape {
        ndim : usize
    },

    /// The label vector does not have one entry per sample.
    #[error("The number of samples differs between X ({samples}) and y ({labels})")]
    MismatchedLength {
        samples : usize,
        labels : usize
    },

    #[error("empty input")]
    EmptyInput,

    /// A feature vector (or an array buffer) does not have the expected length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        expected : usize,
        found : usize
    },

    #[error("class index {index} outside registry of {n_classes} classes")]
    ClassIndex {
        index : usize,
        n_classes : usize
    },

    /// The shared covariance cannot be inverted, or its determinant is not positive.
    #[error("Shared covariance is singular (determinant {det})")]
    SingularCovariance {
        det : f64
    },

    /// predict(.), predict_proba(.) or density_at(.) called before fit(.).
    #[error("Model is not fitted")]
    Unfitted,

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name : &'static str,
        message : &'static str
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error)

}

pub type Result<T> = std::result::Result<T, LdaError>;
