use celestial_time::TimeError;
use thiserror::Error;

pub type AstrometryResult<T> = Result<T, AstrometryError>;

#[derive(Debug, Error)]
pub enum AstrometryError {
    /// A required piece of context (site, time, epoch) was not supplied.
    #[error("{operation}: cannot run without {what}")]
    MissingContext {
        operation: &'static str,
        what: &'static str,
    },

    /// Batch arrays of unequal length.
    #[error("{operation}: {counts}")]
    LengthMismatch {
        operation: &'static str,
        counts: String,
    },

    #[error("Invalid site: {message}")]
    InvalidSite { message: String },

    #[error("Time conversion failed: {0}")]
    Time(#[from] TimeError),
}

impl AstrometryError {
    pub fn missing_context(operation: &'static str, what: &'static str) -> Self {
        Self::MissingContext { operation, what }
    }

    /// `counts` is a list of `(count, plural label)` pairs, RA first.
    pub fn length_mismatch(operation: &'static str, counts: &[(usize, &str)]) -> Self {
        let counts = counts
            .iter()
            .map(|(n, label)| format!("{} {}", n, label))
            .collect::<Vec<_>>()
            .join(", ");
        Self::LengthMismatch { operation, counts }
    }

    pub fn invalid_site(message: impl Into<String>) -> Self {
        Self::InvalidSite {
            message: message.into(),
        }
    }

    /// Caller errors that no retry can fix.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingContext { .. } | Self::LengthMismatch { .. } | Self::InvalidSite { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_lists_every_count() {
        let err =
            AstrometryError::length_mismatch("app_geo_from_icrs", &[(5, "RAs"), (4, "Decs")]);
        assert_eq!(err.to_string(), "app_geo_from_icrs: 5 RAs, 4 Decs");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_missing_context_message() {
        let err = AstrometryError::missing_context("refraction_coefficients", "a site");
        assert!(err.to_string().contains("refraction_coefficients"));
        assert!(err.to_string().contains("a site"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_wrapped_errors_are_not_configuration_errors() {
        let err: AstrometryError = TimeError::ConversionError("boom".to_string()).into();
        assert!(!err.is_configuration_error());
        assert!(err.to_string().contains("boom"));
    }
}
