//! Triage priority engine
//! 
//! Computes a South African Triage Scale style early-warning score from
//! banded vital signs, mobility, mental status and trauma history, then
//! resolves the final priority with discriminator overrides.
//! 
//! # Pipeline
//! 
//! 1. **Variant selection**: adult, younger child (≤95 cm) or older child
//! 2. **Banding**: each vital mapped to points by the variant's tables
//! 3. **Aggregation**: points summed into the early-warning score
//! 4. **Discriminators**: structured yes/no answers, or chief-complaint
//!    keywords as a low-fidelity fallback, raise severity tiers
//! 5. **Resolution**: score thresholds (≥7 Red, ≥5 Orange, ≥3 Yellow) then
//!    upgrade-only overrides (Emergency → Red, Very urgent → Orange,
//!    Urgent → Yellow)
//! 
//! The pipeline is synchronous and holds no shared state; encounters can be
//! assessed concurrently without coordination.
//! 
//! # Boundary values
//! 
//! Every band spells out its inclusive bounds and the tables partition each
//! display domain exactly. Older published variants of these tables
//! disagree on which side of a boundary a value falls and some summed
//! overlapping bands; this crate uses single-match banding throughout.
//! 
//! # Example
//! 
//! ```rust
//! use triage_engine::{
//!     Encounter, PatientContext, PatientIdentity, Priority, ScoringPolicy, Sex,
//!     VitalReadings, Mobility, FreeTextSignal,
//! };
//! 
//! let identity = PatientIdentity::new("8203155017089", "Thabo Mokoena", Sex::Male)?;
//! let mut encounter = Encounter::begin(identity, PatientContext::new(42, None)?)?;
//! encounter
//!     .record_vitals(VitalReadings::new(35, 150, 80, 39.0).with_mobility(Mobility::Immobile))
//!     .record_free_text(FreeTextSignal::new("crushing chest pain", ""));
//! 
//! let record = encounter.assess(&ScoringPolicy::default())?;
//! assert_eq!(record.score().value(), 14);
//! assert_eq!(record.priority(), Priority::Red);
//! # Ok::<(), error_common::TriageError>(())
//! ```

pub mod banding;
pub mod discriminator;
pub mod encounter;
pub mod keywords;
pub mod patient;
pub mod priority;
pub mod score;
pub mod vitals;

pub use banding::{tables_for, Band, BandTable, Upper, VariantTables, Vital};
pub use discriminator::{
    evaluate, Discriminator, DiscriminatorAnswers, DiscriminatorEvaluator, DiscriminatorFindings,
    EvidenceSource, Tier, TierFlags, CATALOGUE_VERSION,
};
pub use encounter::{Encounter, EncounterRecord, EncounterSummary, ScoringPolicy};
pub use keywords::FreeTextSignal;
pub use patient::{PatientContext, PatientIdentity, Sex, Variant};
pub use priority::{resolve, Priority, Resolution};
pub use score::{breakdown, score, Component, ContributingFactor, Score, ScoreBreakdown};
pub use vitals::{MentalStatus, Mobility, VitalReadings};
