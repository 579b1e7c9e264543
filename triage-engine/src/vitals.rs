//! Vital-sign readings as entered on the intake form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Level of consciousness (AVPU with a separate "confused" step)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentalStatus {
    Alert,
    Confused,
    RespondsToVoice,
    RespondsToPain,
    Unresponsive,
}

impl MentalStatus {
    /// Same for every variant
    pub fn points(&self) -> u8 {
        match self {
            MentalStatus::Alert => 0,
            MentalStatus::Confused => 1,
            MentalStatus::RespondsToVoice => 2,
            MentalStatus::RespondsToPain | MentalStatus::Unresponsive => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mobility {
    Unaided,
    WithHelp,
    Immobile,
}

impl Mobility {
    /// Same for every variant
    pub fn points(&self) -> u8 {
        match self {
            Mobility::Unaided => 0,
            Mobility::WithHelp => 1,
            Mobility::Immobile => 3,
        }
    }
}

impl fmt::Display for Mobility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mobility::Unaided => write!(f, "walks unaided"),
            Mobility::WithHelp => write!(f, "walks with help"),
            Mobility::Immobile => write!(f, "stretcher / immobile"),
        }
    }
}

/// One set of observations.
///
/// Values are taken as entered. Range checks happen when the readings are
/// banded, never here, and nothing is clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReadings {
    /// breaths/min
    pub respiratory_rate: u16,
    /// beats/min
    pub heart_rate: u16,
    /// mmHg
    pub systolic_bp: u16,
    pub temperature_c: f64,
    pub mental_status: MentalStatus,
    pub mobility: Mobility,
    pub trauma_last_48h: bool,
}

impl VitalReadings {
    /// Alert, walking, no trauma; other fields as given
    pub fn new(respiratory_rate: u16, heart_rate: u16, systolic_bp: u16, temperature_c: f64) -> Self {
        Self {
            respiratory_rate,
            heart_rate,
            systolic_bp,
            temperature_c,
            mental_status: MentalStatus::Alert,
            mobility: Mobility::Unaided,
            trauma_last_48h: false,
        }
    }

    pub fn with_mental_status(mut self, mental_status: MentalStatus) -> Self {
        self.mental_status = mental_status;
        self
    }

    pub fn with_mobility(mut self, mobility: Mobility) -> Self {
        self.mobility = mobility;
        self
    }

    pub fn with_trauma(mut self, trauma_last_48h: bool) -> Self {
        self.trauma_last_48h = trauma_last_48h;
        self
    }

    pub fn trauma_points(&self) -> u8 {
        u8::from(self.trauma_last_48h)
    }
}
