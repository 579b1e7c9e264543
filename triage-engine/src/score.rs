//! Early-warning score aggregation.

use crate::banding::tables_for;
use crate::patient::Variant;
use crate::vitals::VitalReadings;
use error_common::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate early-warning score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub const fn new(points: u32) -> Self {
        Self(points)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scored observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    RespiratoryRate,
    HeartRate,
    SystolicBp,
    Temperature,
    MentalStatus,
    Mobility,
    Trauma,
}

/// A component that added points to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub component: Component,
    pub points: u8,
}

/// Points contributed by each component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub respiratory_rate: u8,
    pub heart_rate: u8,
    pub systolic_bp: u8,
    pub temperature: u8,
    pub mental_status: u8,
    pub mobility: u8,
    pub trauma: u8,
}

impl ScoreBreakdown {
    fn components(&self) -> [(Component, u8); 7] {
        [
            (Component::RespiratoryRate, self.respiratory_rate),
            (Component::HeartRate, self.heart_rate),
            (Component::SystolicBp, self.systolic_bp),
            (Component::Temperature, self.temperature),
            (Component::MentalStatus, self.mental_status),
            (Component::Mobility, self.mobility),
            (Component::Trauma, self.trauma),
        ]
    }

    pub fn total(&self) -> Score {
        Score(self.components().iter().map(|(_, points)| u32::from(*points)).sum())
    }

    /// Non-zero components, in form order
    pub fn contributing_factors(&self) -> Vec<ContributingFactor> {
        self.components()
            .into_iter()
            .filter(|(_, points)| *points > 0)
            .map(|(component, points)| ContributingFactor { component, points })
            .collect()
    }
}

/// Band every reading for `variant`.
///
/// Every component is evaluated before any error is reported; the first
/// out-of-range reading (in form order) is returned.
pub fn breakdown(vitals: &VitalReadings, variant: Variant) -> Result<ScoreBreakdown> {
    let tables = tables_for(variant);

    let respiratory_rate = tables.respiratory_rate.points(vitals.respiratory_rate);
    let heart_rate = tables.heart_rate.points(vitals.heart_rate);
    let systolic_bp = tables.systolic_bp.points(vitals.systolic_bp);
    let temperature = tables.temperature.points(vitals.temperature_c);

    Ok(ScoreBreakdown {
        respiratory_rate: respiratory_rate?,
        heart_rate: heart_rate?,
        systolic_bp: systolic_bp?,
        temperature: temperature?,
        mental_status: vitals.mental_status.points(),
        mobility: vitals.mobility.points(),
        trauma: vitals.trauma_points(),
    })
}

pub fn score(vitals: &VitalReadings, variant: Variant) -> Result<Score> {
    breakdown(vitals, variant).map(|b| b.total())
}
