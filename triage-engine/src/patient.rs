//! Patient context, identity and banding-variant selection.

use error_common::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_AGE_YEARS: u8 = 120;
pub const MIN_HEIGHT_CM: f64 = 30.0;
pub const MAX_HEIGHT_CM: f64 = 250.0;

/// Below this age every patient is banded as a child
pub const PEDIATRIC_AGE_LIMIT: u8 = 12;
/// Children at or below this height use the younger-child tables
pub const YOUNGER_CHILD_MAX_HEIGHT_CM: f64 = 95.0;

/// Banding table set applied to a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Adult,
    PediatricYounger,
    PediatricOlder,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Adult => write!(f, "adult"),
            Variant::PediatricYounger => write!(f, "pediatric (younger, ≤95 cm)"),
            Variant::PediatricOlder => write!(f, "pediatric (older, >95 cm)"),
        }
    }
}

/// Age and optional height used for variant selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientContext {
    pub age_years: u8,
    pub height_cm: Option<f64>,
}

impl PatientContext {
    pub fn new(age_years: u8, height_cm: Option<f64>) -> Result<Self> {
        let context = Self { age_years, height_cm };
        context.validate()?;
        Ok(context)
    }

    pub fn validate(&self) -> Result<()> {
        if self.age_years > MAX_AGE_YEARS {
            return Err(TriageError::out_of_range(
                "age_years",
                f64::from(self.age_years),
                0.0,
                f64::from(MAX_AGE_YEARS),
            ));
        }
        if let Some(height) = self.height_cm {
            if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height) {
                return Err(TriageError::out_of_range("height_cm", height, MIN_HEIGHT_CM, MAX_HEIGHT_CM));
            }
        }
        Ok(())
    }

    /// Select the banding variant.
    ///
    /// Adult from 12 years on, whatever the height. Height only picks the
    /// child table set; children with no recorded height use the
    /// younger-child tables.
    pub fn variant(&self) -> Variant {
        if self.age_years >= PEDIATRIC_AGE_LIMIT {
            return Variant::Adult;
        }

        match self.height_cm {
            Some(h) if h > YOUNGER_CHILD_MAX_HEIGHT_CM => Variant::PediatricOlder,
            _ => Variant::PediatricYounger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
    NotSpecified,
}

/// Who the encounter is for. Only the masked id leaves the engine in summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIdentity {
    pub health_id: String,
    pub name: String,
    pub sex: Sex,
}

impl PatientIdentity {
    /// Health ids (HealthID / SA ID) are at least ten ASCII digits
    pub fn new(health_id: impl Into<String>, name: impl Into<String>, sex: Sex) -> Result<Self> {
        let health_id = health_id.into();
        if health_id.len() < 10 || !health_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TriageError::InvalidIdentifier(format!(
                "health id must be at least 10 digits, got {} characters",
                health_id.chars().count()
            )));
        }
        Ok(Self {
            health_id,
            name: name.into(),
            sex,
        })
    }

    pub fn masked_health_id(&self) -> String {
        logger_redacted::mask_health_id(&self.health_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(age: u8, height: Option<f64>) -> Variant {
        PatientContext::new(age, height).unwrap().variant()
    }

    #[test]
    fn test_adult_regardless_of_height_above_limit() {
        assert_eq!(variant(30, None), Variant::Adult);
        assert_eq!(variant(30, Some(180.0)), Variant::Adult);
        assert_eq!(variant(12, Some(150.0)), Variant::Adult);
        assert_eq!(variant(12, Some(100.0)), Variant::Adult);
    }

    #[test]
    fn test_young_child_without_height_uses_younger_tables() {
        assert_eq!(variant(5, None), Variant::PediatricYounger);
        assert_eq!(variant(5, Some(95.0)), Variant::PediatricYounger);
    }

    #[test]
    fn test_child_above_95cm_uses_older_tables() {
        assert_eq!(variant(5, Some(95.1)), Variant::PediatricOlder);
        assert_eq!(variant(11, Some(149.9)), Variant::PediatricOlder);
    }

    #[test]
    fn test_short_adult_keeps_adult_tables() {
        assert_eq!(variant(30, Some(140.0)), Variant::Adult);
        assert_eq!(variant(14, Some(90.0)), Variant::Adult);
    }

    #[test]
    fn test_out_of_range_context_rejected() {
        assert!(matches!(
            PatientContext::new(121, None),
            Err(TriageError::OutOfRangeInput { field: "age_years", .. })
        ));
        assert!(matches!(
            PatientContext::new(40, Some(20.0)),
            Err(TriageError::OutOfRangeInput { field: "height_cm", .. })
        ));
        assert!(PatientContext::new(40, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_identity_validation() {
        let identity = PatientIdentity::new("8203155017089", "Thabo Mokoena", Sex::Male).unwrap();
        assert_eq!(identity.masked_health_id(), "…7089");
        assert!(matches!(
            PatientIdentity::new("12345", "Too Short", Sex::NotSpecified),
            Err(TriageError::InvalidIdentifier(_))
        ));
        assert!(PatientIdentity::new("82031550170AB", "Letters", Sex::Other).is_err());
    }
}
