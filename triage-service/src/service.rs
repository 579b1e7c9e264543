use crate::advisory::{request_advice, AdvisoryAssistant, AdvisoryOutcome, AdvisoryRequest};
use crate::error::ServiceResult;
use crate::history::EncounterHistory;
use config_engine::validation::validate;
use config_engine::TriageConfig;
use error_common::{log_error, ErrorContext};
use logger_redacted::{PiiRedactor, RedactionConfig};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use triage_engine::{Encounter, EncounterRecord, EncounterSummary, ScoringPolicy};

/// Authoritative record plus whatever the advisory assistant had to say
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    pub record: EncounterRecord,
    pub advisory: AdvisoryOutcome,
}

/// Triage service
pub struct TriageService {
    config: TriageConfig,
    history: Arc<EncounterHistory>,
    assistant: Option<Arc<dyn AdvisoryAssistant>>,
    redactor: PiiRedactor,
}

impl TriageService {
    /// Create a service with its own history log
    pub fn new(config: TriageConfig) -> ServiceResult<Self> {
        let history = Arc::new(EncounterHistory::from_config(&config.history));
        Self::with_history(config, history)
    }

    /// Create a service writing to a shared history log
    pub fn with_history(config: TriageConfig, history: Arc<EncounterHistory>) -> ServiceResult<Self> {
        validate(&config)?;
        let redactor = PiiRedactor::new(RedactionConfig::from(&config.logging));
        Ok(Self {
            config,
            history,
            assistant: None,
            redactor,
        })
    }

    /// Attach an advisory assistant. It is only consulted when advisory
    /// assist is enabled in the configuration.
    pub fn with_assistant(mut self, assistant: Arc<dyn AdvisoryAssistant>) -> Self {
        self.assistant = Some(assistant);
        self
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn history(&self) -> Arc<EncounterHistory> {
        Arc::clone(&self.history)
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            require_complete_answers: self.config.discriminators.require_complete_answers,
            keyword_fallback: self.config.discriminators.keyword_fallback,
        }
    }

    /// Assess an encounter, log it to history, then ask for advice.
    ///
    /// The record is final before the assistant is called. Advisory
    /// timeouts and failures are reported in the outcome, never as errors.
    pub async fn triage(&self, encounter: &Encounter) -> ServiceResult<TriageOutcome> {
        if let Some(text) = encounter.free_text() {
            debug!(
                encounter_id = %encounter.id(),
                chief_complaint = %self.redactor.redact(&text.chief_complaint),
                "assessing encounter"
            );
        }

        let record = encounter.assess(&self.scoring_policy()).map_err(|e| {
            log_error(&ErrorContext::new().with_encounter(encounter.id()), &e);
            e
        })?;

        info!(
            encounter_id = %record.encounter_id(),
            patient = %record.identity().masked_health_id(),
            variant = %record.variant(),
            score = record.score().value(),
            priority = %record.priority(),
            raised_by = ?record.raised_by(),
            "encounter triaged"
        );

        self.history.append(record.summary());
        let advisory = self.advise(&record).await;

        Ok(TriageOutcome { record, advisory })
    }

    async fn advise(&self, record: &EncounterRecord) -> AdvisoryOutcome {
        if !self.config.advisory.enabled {
            return AdvisoryOutcome::Disabled;
        }
        let Some(assistant) = &self.assistant else {
            return AdvisoryOutcome::Disabled;
        };

        let request = AdvisoryRequest::from_record(record);
        request_advice(assistant.as_ref(), &request, self.config.advisory.timeout()).await
    }

    /// Newest assessments, up to the configured replay window
    pub fn recent_patients(&self) -> Vec<EncounterSummary> {
        self.history.recent(self.config.history.recent_limit)
    }
}
