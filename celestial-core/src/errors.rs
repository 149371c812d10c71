//! Error types shared by the astrometry crates.
//!
//! [`AstroError`] covers the failure modes below the domain layer: numbers
//! outside the range an algorithm supports, and unusable input data.
//! `celestial-time` wraps it in `TimeError::Core` with `#[from]`, and the
//! astrometry crate reaches it through that.
//!
//! | Variant | Use Case | Recoverable? |
//! |---------|----------|--------------|
//! | [`MathError`](AstroError::MathError) | Non-finite values, out-of-range inputs | No |
//! | [`DataError`](AstroError::DataError) | Malformed tables or caller-supplied data | Yes |
//!
//! ```
//! use celestial_core::{AstroError, MathErrorKind};
//!
//! fn checked_days(days: f64) -> Result<f64, AstroError> {
//!     if !days.is_finite() {
//!         return Err(AstroError::math_error(
//!             "checked_days",
//!             MathErrorKind::NotFinite,
//!             "day count is not finite",
//!         ));
//!     }
//!     Ok(days)
//! }
//!
//! assert!(checked_days(f64::NAN).is_err());
//! ```

use thiserror::Error;

/// Classification of numerical failures, carried by [`AstroError::MathError`].
#[derive(Debug, Clone, PartialEq)]
pub enum MathErrorKind {
    /// Result or input is NaN or infinity.
    NotFinite,
    /// Value outside the domain the algorithm supports.
    OutOfRange,
}

/// Error type for the core numerical layer.
#[derive(Error, Debug)]
pub enum AstroError {
    /// Numerical computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },

    /// Unusable input data, such as a malformed Earth orientation table.
    ///
    /// This is the only recoverable variant: another data source may succeed.
    #[error("Data error ({source_name} - {operation}): {message}")]
    DataError {
        source_name: String,
        operation: String,
        message: String,
    },
}

/// Convenience alias for `Result<T, AstroError>`.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }

    pub fn data_error(source_name: &str, operation: &str, reason: &str) -> Self {
        Self::DataError {
            source_name: source_name.to_string(),
            operation: operation.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns `true` if retrying with other data might succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DataError { .. })
    }
}
