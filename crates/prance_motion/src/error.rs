//! Configuration validation errors
//!
//! The runtime paths never fail; these errors only come out of the
//! explicit `validate()` calls made by whoever authors the input.

use thiserror::Error;

/// Range-sanity failures in authored motion data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A numeric parameter is negative
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    /// A numeric parameter is NaN or infinite
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },

    /// A timeline segment has no duration
    #[error("segment {index} has zero duration")]
    ZeroDuration { index: usize },

    /// An explicit frame sequence has no frames
    #[error("explicit frame sequence is empty")]
    EmptySequence,

    /// Prescribed order and durations are not indexed together
    #[error("frame order has {order} entries but {durations} durations were given")]
    LengthMismatch { order: usize, durations: usize },

    /// A frame index points past the frame library
    #[error("{context} frame index {index} is out of range for {len} frames")]
    FrameOutOfRange {
        context: &'static str,
        index: usize,
        len: usize,
    },
}

/// Result type for validation
pub type Result<T> = std::result::Result<T, MotionError>;

/// Check that a signed parameter is finite.
pub(crate) fn check_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MotionError::NonFinite { field, value })
    }
}

/// Check that a parameter is finite and non-negative.
pub(crate) fn check_param(field: &'static str, value: f32) -> Result<()> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(MotionError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_param() {
        assert!(check_param("speed", 0.0).is_ok());
        assert!(check_param("speed", 12.5).is_ok());
        assert_eq!(
            check_param("speed", -1.0),
            Err(MotionError::Negative {
                field: "speed",
                value: -1.0
            })
        );
        assert!(matches!(
            check_param("speed", f32::INFINITY),
            Err(MotionError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_messages() {
        let err = MotionError::FrameOutOfRange {
            context: "blink",
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "blink frame index 4 is out of range for 2 frames"
        );
    }
}
