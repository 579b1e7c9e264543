//! Encounter lifecycle: an editable draft and the frozen assessment record.

use crate::discriminator::{DiscriminatorAnswers, DiscriminatorEvaluator, DiscriminatorFindings, Tier, CATALOGUE_VERSION};
use crate::keywords::FreeTextSignal;
use crate::patient::{PatientContext, PatientIdentity, Variant};
use crate::priority::{self, Priority};
use crate::score::{self, ContributingFactor, Score, ScoreBreakdown};
use crate::vitals::VitalReadings;
use chrono::{DateTime, Utc};
use error_common::{Result, TriageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// How discriminator input is accepted during assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Reject structured answers with unset ids instead of reading them as "no"
    pub require_complete_answers: bool,
    /// Use chief-complaint keywords when no structured answers exist
    pub keyword_fallback: bool,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            require_complete_answers: false,
            keyword_fallback: true,
        }
    }
}

/// An open encounter, filled in by the intake form.
///
/// The banding variant is derived once, when the encounter begins, and does
/// not follow later edits to age or height.
#[derive(Debug, Clone)]
pub struct Encounter {
    id: Uuid,
    identity: PatientIdentity,
    patient: PatientContext,
    variant: Variant,
    opened_at: DateTime<Utc>,
    vitals: Option<VitalReadings>,
    answers: Option<DiscriminatorAnswers>,
    free_text: Option<FreeTextSignal>,
}

impl Encounter {
    pub fn begin(identity: PatientIdentity, patient: PatientContext) -> Result<Self> {
        patient.validate()?;
        let variant = patient.variant();
        let id = Uuid::new_v4();
        debug!(encounter_id = %id, %variant, "encounter opened");

        Ok(Self {
            id,
            identity,
            patient,
            variant,
            opened_at: Utc::now(),
            vitals: None,
            answers: None,
            free_text: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn identity(&self) -> &PatientIdentity {
        &self.identity
    }

    pub fn patient(&self) -> &PatientContext {
        &self.patient
    }

    pub fn free_text(&self) -> Option<&FreeTextSignal> {
        self.free_text.as_ref()
    }

    /// Replace age/height. The variant stays as selected at `begin`.
    pub fn update_patient(&mut self, patient: PatientContext) -> Result<()> {
        patient.validate()?;
        let derived = patient.variant();
        if derived != self.variant {
            warn!(
                encounter_id = %self.id,
                kept = %self.variant,
                derived = %derived,
                "patient context edited mid-encounter; banding variant unchanged"
            );
        }
        self.patient = patient;
        Ok(())
    }

    pub fn record_vitals(&mut self, vitals: VitalReadings) -> &mut Self {
        self.vitals = Some(vitals);
        self
    }

    pub fn record_answers(&mut self, answers: DiscriminatorAnswers) -> &mut Self {
        self.answers = Some(answers);
        self
    }

    pub fn record_free_text(&mut self, free_text: FreeTextSignal) -> &mut Self {
        self.free_text = Some(free_text);
        self
    }

    /// Structured answers win; keywords only when allowed and nothing structured exists.
    fn findings(&self, policy: &ScoringPolicy) -> Result<DiscriminatorFindings> {
        if let Some(answers) = &self.answers {
            if policy.require_complete_answers {
                answers.ensure_complete()?;
            }
            return Ok(answers.findings());
        }

        match &self.free_text {
            Some(text) if policy.keyword_fallback => Ok(text.findings()),
            _ => Ok(DiscriminatorFindings::not_assessed()),
        }
    }

    /// Run the scoring pipeline and produce a frozen record.
    ///
    /// The draft is left untouched, so a rejected input can be corrected
    /// and assessed again.
    pub fn assess(&self, policy: &ScoringPolicy) -> Result<EncounterRecord> {
        let vitals = self.vitals.clone().ok_or(TriageError::MissingInput("vitals"))?;

        let breakdown = score::breakdown(&vitals, self.variant)?;
        let findings = self.findings(policy)?;
        let score = breakdown.total();
        let resolution = priority::resolve(score, &findings.flags);

        debug!(
            encounter_id = %self.id,
            variant = %self.variant,
            score = score.value(),
            base = %resolution.base,
            priority = %resolution.priority,
            source = ?findings.source,
            "encounter assessed"
        );

        Ok(EncounterRecord {
            encounter_id: self.id,
            identity: self.identity.clone(),
            patient: self.patient,
            variant: self.variant,
            vitals,
            answers: self.answers.clone(),
            free_text: self.free_text.clone(),
            breakdown,
            score,
            findings,
            base_priority: resolution.base,
            priority: resolution.priority,
            raised_by: resolution.raised_by,
            catalogue_version: CATALOGUE_VERSION.to_string(),
            opened_at: self.opened_at,
            assessed_at: Utc::now(),
        })
    }
}

/// Immutable result of an assessment, handed to report and history collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterRecord {
    encounter_id: Uuid,
    identity: PatientIdentity,
    patient: PatientContext,
    variant: Variant,
    vitals: VitalReadings,
    answers: Option<DiscriminatorAnswers>,
    free_text: Option<FreeTextSignal>,
    breakdown: ScoreBreakdown,
    score: Score,
    findings: DiscriminatorFindings,
    base_priority: Priority,
    priority: Priority,
    raised_by: Option<Tier>,
    catalogue_version: String,
    opened_at: DateTime<Utc>,
    assessed_at: DateTime<Utc>,
}

impl EncounterRecord {
    pub fn encounter_id(&self) -> Uuid {
        self.encounter_id
    }

    pub fn identity(&self) -> &PatientIdentity {
        &self.identity
    }

    pub fn patient(&self) -> &PatientContext {
        &self.patient
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn vitals(&self) -> &VitalReadings {
        &self.vitals
    }

    pub fn answers(&self) -> Option<&DiscriminatorAnswers> {
        self.answers.as_ref()
    }

    pub fn free_text(&self) -> Option<&FreeTextSignal> {
        self.free_text.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }

    pub fn contributing_factors(&self) -> Vec<ContributingFactor> {
        self.breakdown.contributing_factors()
    }

    pub fn findings(&self) -> &DiscriminatorFindings {
        &self.findings
    }

    pub fn triggered_tiers(&self) -> Vec<Tier> {
        self.findings.flags.triggered()
    }

    pub fn base_priority(&self) -> Priority {
        self.base_priority
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn raised_by(&self) -> Option<Tier> {
        self.raised_by
    }

    pub fn catalogue_version(&self) -> &str {
        &self.catalogue_version
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn assessed_at(&self) -> DateTime<Utc> {
        self.assessed_at
    }

    /// Read-only summary for the encounter history
    pub fn summary(&self) -> EncounterSummary {
        EncounterSummary {
            encounter_id: self.encounter_id,
            name: self.identity.name.clone(),
            masked_health_id: self.identity.masked_health_id(),
            priority: self.priority,
            score: self.score,
            recorded_at: self.assessed_at,
        }
    }
}

/// What the history collaborator keeps about an encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub encounter_id: Uuid,
    pub name: String,
    pub masked_health_id: String,
    pub priority: Priority,
    pub score: Score,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discriminator::{Discriminator, EvidenceSource};
    use crate::patient::Sex;

    fn open(age: u8, height: Option<f64>) -> Encounter {
        let identity = PatientIdentity::new("9112240123456", "Sarah Naidoo", Sex::Female).unwrap();
        Encounter::begin(identity, PatientContext::new(age, height).unwrap()).unwrap()
    }

    #[test]
    fn test_missing_vitals_rejected() {
        let encounter = open(31, None);
        assert!(matches!(
            encounter.assess(&ScoringPolicy::default()),
            Err(TriageError::MissingInput("vitals"))
        ));
    }

    #[test]
    fn test_variant_frozen_at_begin() {
        let mut encounter = open(6, Some(110.0));
        assert_eq!(encounter.variant(), Variant::PediatricOlder);

        encounter.update_patient(PatientContext::new(40, Some(175.0)).unwrap()).unwrap();
        assert_eq!(encounter.variant(), Variant::PediatricOlder);
        assert_eq!(encounter.patient().age_years, 40);
    }

    #[test]
    fn test_invalid_patient_edit_rejected() {
        let mut encounter = open(40, None);
        assert!(encounter.update_patient(PatientContext { age_years: 130, height_cm: None }).is_err());
        assert_eq!(encounter.patient().age_years, 40);
    }

    #[test]
    fn test_structured_answers_win_over_keywords() {
        let mut encounter = open(40, None);
        encounter
            .record_vitals(VitalReadings::new(16, 80, 120, 37.0))
            .record_free_text(FreeTextSignal::new("seizure at home", ""))
            .record_answers(DiscriminatorAnswers::all_negative());

        let record = encounter.assess(&ScoringPolicy::default()).unwrap();
        assert_eq!(record.findings().source, EvidenceSource::Structured);
        assert_eq!(record.priority(), Priority::Green);
    }

    #[test]
    fn test_keyword_fallback_can_be_disabled() {
        let mut encounter = open(40, None);
        encounter
            .record_vitals(VitalReadings::new(16, 80, 120, 37.0))
            .record_free_text(FreeTextSignal::new("seizure at home", ""));

        let with_fallback = encounter.assess(&ScoringPolicy::default()).unwrap();
        assert_eq!(with_fallback.priority(), Priority::Red);
        assert_eq!(with_fallback.findings().source, EvidenceSource::KeywordFallback);

        let policy = ScoringPolicy { keyword_fallback: false, ..Default::default() };
        let without = encounter.assess(&policy).unwrap();
        assert_eq!(without.priority(), Priority::Green);
        assert_eq!(without.findings().source, EvidenceSource::NotAssessed);
    }

    #[test]
    fn test_strict_policy_rejects_partial_answers() {
        let mut encounter = open(40, None);
        encounter
            .record_vitals(VitalReadings::new(16, 80, 120, 37.0))
            .record_answers(DiscriminatorAnswers::new().with(Discriminator::ChestPain, false));

        assert!(encounter.assess(&ScoringPolicy::default()).is_ok());
        let strict = ScoringPolicy { require_complete_answers: true, ..Default::default() };
        assert!(matches!(
            encounter.assess(&strict),
            Err(TriageError::IncompleteAnswers { .. })
        ));
    }

    #[test]
    fn test_rejected_input_can_be_corrected() {
        let mut encounter = open(40, None);
        encounter.record_vitals(VitalReadings::new(16, 80, 120, 44.0));
        assert!(encounter.assess(&ScoringPolicy::default()).is_err());

        encounter.record_vitals(VitalReadings::new(16, 80, 120, 39.0));
        let record = encounter.assess(&ScoringPolicy::default()).unwrap();
        assert_eq!(record.score(), Score::new(2));
    }

    #[test]
    fn test_summary_masks_health_id() {
        let mut encounter = open(31, None);
        encounter.record_vitals(VitalReadings::new(16, 80, 120, 37.0));
        let record = encounter.assess(&ScoringPolicy::default()).unwrap();
        let summary = record.summary();
        assert_eq!(summary.masked_health_id, "…3456");
        assert_eq!(summary.name, "Sarah Naidoo");
        assert_eq!(summary.encounter_id, encounter.id());
        assert_eq!(summary.recorded_at, record.assessed_at());
    }
}
