//! Free-text keyword fallback for discriminators.
//!
//! Used only when an intake form collects no structured discriminator
//! answers. It is a literal, case-insensitive substring match over the chief
//! complaint (symptom text is ignored) and is strictly lower fidelity than
//! structured answers: negations ("no chest pain") still match, synonyms do
//! not. Findings produced here are tagged [`EvidenceSource::KeywordFallback`]
//! and never name a specific discriminator.

use crate::discriminator::{DiscriminatorEvaluator, DiscriminatorFindings, EvidenceSource, Tier, TierFlags};
use serde::{Deserialize, Serialize};

/// Keyword → tier it raises
pub const KEYWORDS: &[(&str, Tier)] = &[
    ("not breathing", Tier::Emergency),
    ("seizure", Tier::Emergency),
    ("unconscious", Tier::VeryUrgent),
    ("massive bleed", Tier::VeryUrgent),
    ("chest pain", Tier::VeryUrgent),
];

/// Chief complaint and other symptoms as typed by the triage nurse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextSignal {
    pub chief_complaint: String,
    pub symptoms: String,
}

impl FreeTextSignal {
    pub fn new(chief_complaint: impl Into<String>, symptoms: impl Into<String>) -> Self {
        Self {
            chief_complaint: chief_complaint.into(),
            symptoms: symptoms.into(),
        }
    }

    /// Keywords found in the chief complaint, in catalogue order
    pub fn matched_keywords(&self) -> Vec<(&'static str, Tier)> {
        let complaint = self.chief_complaint.to_lowercase();
        KEYWORDS
            .iter()
            .filter(|(keyword, _)| complaint.contains(keyword))
            .copied()
            .collect()
    }
}

impl DiscriminatorEvaluator for FreeTextSignal {
    fn findings(&self) -> DiscriminatorFindings {
        let matched = self.matched_keywords();
        let mut flags = TierFlags::default();
        for (_, tier) in &matched {
            flags.raise(*tier);
        }
        DiscriminatorFindings {
            flags,
            source: EvidenceSource::KeywordFallback,
            evidence: matched.iter().map(|(keyword, _)| keyword.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let signal = FreeTextSignal::new("Sudden CHEST PAIN radiating to left arm", "");
        let findings = signal.findings();
        assert!(findings.flags.very_urgent);
        assert!(!findings.flags.emergency);
        assert_eq!(findings.evidence, vec!["chest pain".to_string()]);
        assert_eq!(findings.source, EvidenceSource::KeywordFallback);
    }

    #[test]
    fn test_symptom_text_is_ignored() {
        let signal = FreeTextSignal::new("headache", "had a seizure yesterday");
        assert!(signal.matched_keywords().is_empty());
        assert!(!signal.findings().flags.any());
    }

    #[test]
    fn test_multiple_keywords_raise_multiple_tiers() {
        let signal = FreeTextSignal::new("found unconscious after seizure", "");
        let flags = signal.findings().flags;
        assert!(flags.emergency);
        assert!(flags.very_urgent);
        assert_eq!(
            signal.matched_keywords(),
            vec![("seizure", Tier::Emergency), ("unconscious", Tier::VeryUrgent)]
        );
    }

    #[test]
    fn test_negation_still_matches() {
        // Literal matching cannot read "denies"; documented limitation.
        let signal = FreeTextSignal::new("denies chest pain", "");
        assert!(signal.findings().flags.very_urgent);
    }
}
