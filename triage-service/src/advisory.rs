//! Optional advisory assist.
//!
//! An external model may propose a priority and a rationale for display
//! next to the computed one. Its suggestion is never written into the
//! encounter record, and a slow or failing assistant cannot hold up triage:
//! every call is bounded by the configured timeout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use triage_engine::{EncounterRecord, FreeTextSignal, Priority, Score, Variant, VitalReadings};
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("Advisory assistant unavailable: {0}")]
    Unavailable(String),

    #[error("Advisory assistant returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// What the assistant is shown about an encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub encounter_id: Uuid,
    pub age_years: u8,
    pub variant: Variant,
    pub vitals: VitalReadings,
    pub free_text: Option<FreeTextSignal>,
    /// The engine's own result, for the assistant to agree or disagree with
    pub computed_score: Score,
    pub computed_priority: Priority,
}

impl AdvisoryRequest {
    /// Built from an assessed record. Identity fields are left out.
    pub fn from_record(record: &EncounterRecord) -> Self {
        Self {
            encounter_id: record.encounter_id(),
            age_years: record.patient().age_years,
            variant: record.variant(),
            vitals: record.vitals().clone(),
            free_text: record.free_text().cloned(),
            computed_score: record.score(),
            computed_priority: record.priority(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorySuggestion {
    /// `None` when the assistant only offers commentary
    pub suggested_priority: Option<Priority>,
    pub rationale: String,
}

/// Port to an external decision-support model
#[async_trait]
pub trait AdvisoryAssistant: Send + Sync {
    /// Assistant name, for logs
    fn name(&self) -> &str;

    async fn suggest(&self, request: &AdvisoryRequest) -> Result<AdvisorySuggestion, AdvisoryError>;
}

/// Result of asking for advice, shown alongside the authoritative priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvisoryOutcome {
    /// Advisory assist is switched off or no assistant is attached
    Disabled,
    Suggested(AdvisorySuggestion),
    TimedOut { after_ms: u64 },
    Failed { reason: String },
}

impl AdvisoryOutcome {
    pub fn suggestion(&self) -> Option<&AdvisorySuggestion> {
        match self {
            AdvisoryOutcome::Suggested(suggestion) => Some(suggestion),
            _ => None,
        }
    }

    /// Whether the assistant proposed the same priority. `None` when it
    /// proposed none.
    pub fn agrees_with(&self, priority: Priority) -> Option<bool> {
        self.suggestion()
            .and_then(|s| s.suggested_priority)
            .map(|suggested| suggested == priority)
    }
}

/// Ask `assistant` for a suggestion, giving up after `timeout`
pub async fn request_advice(
    assistant: &dyn AdvisoryAssistant,
    request: &AdvisoryRequest,
    timeout: Duration,
) -> AdvisoryOutcome {
    match tokio::time::timeout(timeout, assistant.suggest(request)).await {
        Ok(Ok(suggestion)) => {
            debug!(
                assistant = assistant.name(),
                encounter_id = %request.encounter_id,
                suggested = ?suggestion.suggested_priority,
                "advisory suggestion received"
            );
            AdvisoryOutcome::Suggested(suggestion)
        }
        Ok(Err(e)) => {
            warn!(
                assistant = assistant.name(),
                encounter_id = %request.encounter_id,
                error = %e,
                "advisory assistant failed"
            );
            AdvisoryOutcome::Failed { reason: e.to_string() }
        }
        Err(_) => {
            let after_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(
                assistant = assistant.name(),
                encounter_id = %request.encounter_id,
                after_ms,
                "advisory assistant timed out"
            );
            AdvisoryOutcome::TimedOut { after_ms }
        }
    }
}
