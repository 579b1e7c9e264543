//! Clinical discriminators: red-flag findings that set a minimum priority.
//!
//! The catalogue is closed and versioned with the triage manual it
//! implements. Each id belongs to exactly one [`Tier`].

use crate::priority::Priority;
use error_common::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Manual edition the discriminator list follows
pub const CATALOGUE_VERSION: &str = "sats-2012";

/// Severity tier of a discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Urgent,
    VeryUrgent,
    Emergency,
}

impl Tier {
    /// Lowest priority a triggered tier allows
    pub fn minimum_priority(&self) -> Priority {
        match self {
            Tier::Emergency => Priority::Red,
            Tier::VeryUrgent => Priority::Orange,
            Tier::Urgent => Priority::Yellow,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Emergency => write!(f, "emergency"),
            Tier::VeryUrgent => write!(f, "very urgent"),
            Tier::Urgent => write!(f, "urgent"),
        }
    }
}

macro_rules! discriminators {
    ($( $tier:ident => { $( $variant:ident = $id:literal ),+ $(,)? } )+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Discriminator {
            $( $( $variant, )+ )+
        }

        impl Discriminator {
            /// Every id in the catalogue, grouped by tier
            pub const ALL: &'static [Discriminator] = &[ $( $( Discriminator::$variant, )+ )+ ];

            pub fn tier(&self) -> Tier {
                match self {
                    $( $( Discriminator::$variant => Tier::$tier, )+ )+
                }
            }

            /// Stable id used by intake forms and serialized records
            pub fn id(&self) -> &'static str {
                match self {
                    $( $( Discriminator::$variant => $id, )+ )+
                }
            }
        }

        impl FromStr for Discriminator {
            type Err = TriageError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $( $( $id => Ok(Discriminator::$variant), )+ )+
                    other => Err(TriageError::UnknownDiscriminator(other.to_string())),
                }
            }
        }
    };
}

discriminators! {
    Emergency => {
        ObstructedAirway = "obstructed_airway",
        CurrentSeizure = "current_seizure",
        FacialBurnInhalation = "facial_burn_inhalation",
        Hypoglycaemia = "hypoglycaemia",
        CardiacArrest = "cardiac_arrest",
        SevereDehydrationChild = "severe_dehydration_child",
    }
    VeryUrgent => {
        HighEnergyTransfer = "high_energy_transfer",
        FocalNeurologyAcute = "focal_neurology_acute",
        BurnCircumferential = "burn_circumferential",
        BurnChemical = "burn_chemical",
        BurnElectrical = "burn_electrical",
        BurnLarge = "burn_large",
        ShortnessOfBreathAcute = "shortness_of_breath_acute",
        ReducedConsciousness = "reduced_consciousness",
        ThreatenedLimb = "threatened_limb",
        Poisoning = "poisoning",
        CoughingBlood = "coughing_blood",
        EyeInjury = "eye_injury",
        DiabeticUncontrolled = "diabetic_uncontrolled",
        ChestPain = "chest_pain",
        DislocationLargeJoint = "dislocation_large_joint",
        VomitingBlood = "vomiting_blood",
        PenetratingNeckTrauma = "penetrating_neck_trauma",
        OpenFracture = "open_fracture",
        PregnancyWithTrauma = "pregnancy_with_trauma",
        PregnancyWithAbdominalPain = "pregnancy_with_abdominal_pain",
        UncontrolledHaemorrhage = "uncontrolled_haemorrhage",
        PostIctal = "post_ictal",
        SeverePain = "severe_pain",
    }
    Urgent => {
        ControlledHaemorrhage = "controlled_haemorrhage",
        AbdominalPain = "abdominal_pain",
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Which tiers fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierFlags {
    pub emergency: bool,
    pub very_urgent: bool,
    pub urgent: bool,
}

impl TierFlags {
    pub fn raise(&mut self, tier: Tier) {
        match tier {
            Tier::Emergency => self.emergency = true,
            Tier::VeryUrgent => self.very_urgent = true,
            Tier::Urgent => self.urgent = true,
        }
    }

    pub fn is_raised(&self, tier: Tier) -> bool {
        match tier {
            Tier::Emergency => self.emergency,
            Tier::VeryUrgent => self.very_urgent,
            Tier::Urgent => self.urgent,
        }
    }

    /// Raised tiers, most severe first
    pub fn triggered(&self) -> Vec<Tier> {
        [Tier::Emergency, Tier::VeryUrgent, Tier::Urgent]
            .into_iter()
            .filter(|tier| self.is_raised(*tier))
            .collect()
    }

    pub fn highest(&self) -> Option<Tier> {
        self.triggered().first().copied()
    }

    pub fn any(&self) -> bool {
        self.emergency || self.very_urgent || self.urgent
    }
}

/// Where the tier flags came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    /// Explicit yes/no answers per discriminator
    Structured,
    /// Chief-complaint keyword match; approximate, see [`crate::keywords`]
    KeywordFallback,
    /// No discriminator input was used
    NotAssessed,
}

/// Output of discriminator evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminatorFindings {
    pub flags: TierFlags,
    pub source: EvidenceSource,
    /// Triggered discriminator ids, or matched keywords for the fallback path
    pub evidence: Vec<String>,
}

impl DiscriminatorFindings {
    pub fn not_assessed() -> Self {
        Self {
            flags: TierFlags::default(),
            source: EvidenceSource::NotAssessed,
            evidence: Vec::new(),
        }
    }
}

/// Anything that can produce discriminator findings.
///
/// Structured answers and the free-text fallback both sit behind this
/// trait, so a caller with structured input never touches keyword matching.
pub trait DiscriminatorEvaluator {
    fn findings(&self) -> DiscriminatorFindings;
}

/// Yes/no answers keyed by discriminator. Unset ids count as "no".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscriminatorAnswers {
    answers: BTreeMap<Discriminator, bool>,
}

impl DiscriminatorAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every catalogue id answered "no"
    pub fn all_negative() -> Self {
        Self {
            answers: Discriminator::ALL.iter().map(|d| (*d, false)).collect(),
        }
    }

    /// Parse `(id, answer)` pairs as submitted by an intake form
    pub fn from_ids<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut answers = Self::new();
        for (id, value) in pairs {
            answers.set(id.parse()?, value);
        }
        Ok(answers)
    }

    pub fn set(&mut self, discriminator: Discriminator, present: bool) -> &mut Self {
        self.answers.insert(discriminator, present);
        self
    }

    pub fn with(mut self, discriminator: Discriminator, present: bool) -> Self {
        self.set(discriminator, present);
        self
    }

    pub fn answer(&self, discriminator: Discriminator) -> Option<bool> {
        self.answers.get(&discriminator).copied()
    }

    pub fn is_present(&self, discriminator: Discriminator) -> bool {
        self.answer(discriminator).unwrap_or(false)
    }

    pub fn unanswered(&self) -> Vec<Discriminator> {
        Discriminator::ALL
            .iter()
            .copied()
            .filter(|d| !self.answers.contains_key(d))
            .collect()
    }

    /// Fail with `IncompleteAnswers` when any catalogue id is unset
    pub fn ensure_complete(&self) -> Result<()> {
        let missing = self.unanswered();
        if missing.is_empty() {
            return Ok(());
        }
        Err(TriageError::IncompleteAnswers {
            missing: missing.iter().map(|d| d.id().to_string()).collect(),
        })
    }

    pub fn present(&self) -> impl Iterator<Item = Discriminator> + '_ {
        self.answers
            .iter()
            .filter(|(_, present)| **present)
            .map(|(d, _)| *d)
    }
}

impl DiscriminatorEvaluator for DiscriminatorAnswers {
    fn findings(&self) -> DiscriminatorFindings {
        DiscriminatorFindings {
            flags: evaluate(self),
            source: EvidenceSource::Structured,
            evidence: self.present().map(|d| d.id().to_string()).collect(),
        }
    }
}

/// A tier is raised when any of its discriminators is answered "yes"
pub fn evaluate(answers: &DiscriminatorAnswers) -> TierFlags {
    let mut flags = TierFlags::default();
    for discriminator in answers.present() {
        flags.raise(discriminator.tier());
    }
    flags
}
