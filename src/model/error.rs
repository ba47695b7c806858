use thiserror::Error;

/// Errors that can occur while building the design matrix or fitting a
/// model. None of these are recovered from; a fitting failure aborts the
/// run.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("column '{0}' referenced by the formula is not in the prepared dataset")]
    MissingColumn(String),

    #[error("column '{0}' is not numeric and cannot enter the design matrix")]
    NonNumericColumn(String),

    #[error("no rows remain after removing observations with missing values")]
    NoValidData,

    #[error("insufficient data: {rows} rows for {params} parameters")]
    InsufficientData { rows: usize, params: usize },

    #[error("normal equations are singular or not positive definite")]
    SingularMatrix,

    #[error("IRLS failed to converge after {iterations} iterations (tolerance {tolerance})")]
    NotConverged { iterations: usize, tolerance: f64 },

    #[error("invalid response for {family} regression: {message}")]
    InvalidResponse {
        family: &'static str,
        message: String,
    },
}

/// Result type for the model-fitting layer
pub type ModelResult<T> = Result<T, ModelError>;
