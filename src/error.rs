use thiserror::Error;

/// Errors raised when constructing obstacles, frames or vehicles from invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObstacleError {
    #[error("{name} must be a finite, non-negative number (got {value})")]
    NegativeDimension { name: &'static str, value: f64 },
    #[error("vehicle mass must be positive")]
    ZeroMass,
    #[error("frame axes are not orthonormal")]
    DegenerateFrame,
}

/// Checks that a shape dimension is finite and non-negative.
pub(crate) fn check_dimension(name: &'static str, value: f64) -> Result<f64, ObstacleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ObstacleError::NegativeDimension { name, value })
    }
}
