use crate::codes;
use crate::context::ErrorContext;
use thiserror::Error;

/// Errors raised at the triage engine boundary
#[derive(Error, Debug)]
pub enum TriageError {
    /// A measurement, age or height outside its declared display domain
    #[error("{field} = {value} is outside the accepted range {min}..={max}")]
    OutOfRangeInput {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    
    /// Structured discriminator answers with unset ids while strict mode is on
    #[error("discriminator answers incomplete, {} unanswered: {}", missing.len(), missing.join(", "))]
    IncompleteAnswers { missing: Vec<String> },
    
    /// Id not present in the discriminator catalogue
    #[error("unknown discriminator id: {0}")]
    UnknownDiscriminator(String),
    
    /// A required encounter input was never supplied
    #[error("missing required input: {0}")]
    MissingInput(&'static str),
    
    /// Malformed patient identifier
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    
    /// Wrapped external errors
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TriageError {
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRangeInput { field, value, min, max }
    }
    
    /// Stable code for API and UI consumers
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRangeInput { .. } => codes::validation::OUT_OF_RANGE,
            Self::MissingInput(_) => codes::validation::MISSING_REQUIRED_FIELD,
            Self::InvalidIdentifier(_) => codes::validation::INVALID_IDENTIFIER,
            Self::IncompleteAnswers { .. } => codes::discriminator::INCOMPLETE_ANSWERS,
            Self::UnknownDiscriminator(_) => codes::discriminator::UNKNOWN_ID,
            Self::Internal(_) => codes::system::INTERNAL,
        }
    }
    
    /// True when the caller should correct its input and retry
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Log an error with its code and context
pub fn log_error(context: &ErrorContext, error: &TriageError) {
    tracing::error!(
        error_code = error.code(),
        encounter_id = ?context.encounter_id,
        field = ?context.field,
        error = %error,
        "triage error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_out_of_range_message_and_code() {
        let err = TriageError::out_of_range("respiratory_rate", 61.0, 5.0, 60.0);
        assert_eq!(err.code(), codes::validation::OUT_OF_RANGE);
        assert!(err.to_string().contains("respiratory_rate = 61"));
        assert!(err.is_input_error());
    }
    
    #[test]
    fn test_incomplete_answers_lists_missing_ids() {
        let err = TriageError::IncompleteAnswers {
            missing: vec!["cardiac_arrest".to_string(), "chest_pain".to_string()],
        };
        assert_eq!(err.to_string(), "discriminator answers incomplete, 2 unanswered: cardiac_arrest, chest_pain");
    }
    
    #[test]
    fn test_internal_errors_are_not_input_errors() {
        let err = TriageError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.code(), codes::system::INTERNAL);
        assert!(!err.is_input_error());
    }
    
    #[test]
    fn test_context_serializes() {
        let ctx = ErrorContext::new()
            .with_field("heart_rate")
            .add_context("variant", "adult");
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["field"], "heart_rate");
        assert_eq!(json["additional"]["variant"], "adult");
    }
}
