use crate::error::Result;

/// Validate structural integrity of a spline or walker data structure.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
