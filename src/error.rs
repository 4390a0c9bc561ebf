//! Error types for probability table computation.
//!
//! Every failure is local to a single computation call: either the caller
//! handed in a value outside the modeled ranges, or an exact-arithmetic
//! step produced something that cannot be exact.

use thiserror::Error;

/// Errors that can occur while building probability tables.
///
/// # Examples
///
/// ```rust
/// use combat_odds::{DiceError, Threshold};
///
/// let err = Threshold::new(7).unwrap_err();
/// assert!(matches!(err, DiceError::InvalidParameter { .. }));
/// println!("{}", err); // "Invalid parameter threshold: expected 2..=6, got 7"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiceError {
    /// A parameter lies outside the range the engine models.
    ///
    /// Thresholds must be 2..=6, dice must be D3 or D6 and success
    /// probabilities must lie in `[0, 1]`.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An operation that must produce an exact integer did not.
    ///
    /// Indicates a precision bug, never a caller mistake.
    #[error("Arithmetic invariant violated: {0}")]
    ArithmeticInvariantViolation(String),

    /// A scenario description could not be parsed or validated.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

impl DiceError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        DiceError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
