use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplineError {
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Missing rotation target: {0}")]
    MissingTarget(String),

    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),
}

pub type Result<T> = std::result::Result<T, SplineError>;
