//! Error type shared by every stage component.

use thiserror::Error;

/// Errors raised while configuring or ticking a stage.
///
/// A ray that misses everything is never an error; hit tests return an empty list instead.
#[derive(Error, Debug)]
pub enum StageError {
    /// A numeric argument fell outside its accepted range.
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidArgument {
        /// Parameter name, e.g. `"scale_factor"`.
        name: &'static str,
        /// The rejected value.
        value: f32,
        /// Human readable range, e.g. `"a value in (0, 1)"`.
        expected: &'static str,
    },

    /// A rotation axis name other than `x`, `y` or `z`.
    #[error("invalid axis '{0}': must be 'x', 'y' or 'z'")]
    InvalidAxis(String),

    /// The stage cannot proceed with its current wiring (e.g. no next scene to swap to).
    #[error("configuration fault: {0}")]
    Configuration(String),

    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid RON for [`StageConfig`](crate::StageConfig).
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl StageError {
    /// Whether the animation loop may log this fault and keep running.
    ///
    /// Recoverable faults skip the pose update for the current frame only.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StageError::InvalidArgument { .. } | StageError::InvalidAxis(_)
        )
    }
}

/// Reject anything outside the open interval (0, 1).
pub(crate) fn check_unit_factor(name: &'static str, value: f32) -> Result<f32, StageError> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(StageError::InvalidArgument {
            name,
            value,
            expected: "a value in (0, 1)",
        })
    }
}

/// Reject non-finite or non-positive values.
pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<f32, StageError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StageError::InvalidArgument {
            name,
            value,
            expected: "a finite value greater than 0",
        })
    }
}

/// Reject NaN and infinities.
pub(crate) fn check_finite(name: &'static str, value: f32) -> Result<f32, StageError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StageError::InvalidArgument {
            name,
            value,
            expected: "a finite value",
        })
    }
}
