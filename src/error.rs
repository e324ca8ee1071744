use thiserror::Error;

/// Contract violations raised by the calibration core.
///
/// None of these are transient: retrying with the same input and the same
/// configuration reproduces the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("shape mismatch: {what} has {actual} entries, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("degenerate distribution: adjusted mass {sum} is not positive")]
    DegenerateDistribution { sum: f64 },
}

impl CalibrationError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CalibrationError::InvalidParameter(msg.into())
    }

    pub fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        CalibrationError::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalibrationError>;
