//! Banding tables: raw measurement to early-warning points.
//!
//! Every table partitions its display domain exactly. Integer tables use
//! inclusive bounds on both ends; the temperature tables are half-open
//! except for the final band, which closes on the domain maximum. When
//! more than one band could claim a value the most severe one wins and
//! points are never summed across bands.
//!
//! Pediatric tables are independent data, not transforms of the adult ones.

use crate::patient::Variant;
use anyhow::anyhow;
use error_common::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const RESPIRATORY_RATE_DOMAIN: (u16, u16) = (5, 60);
pub const HEART_RATE_DOMAIN: (u16, u16) = (30, 200);
pub const SYSTOLIC_BP_DOMAIN: (u16, u16) = (50, 250);
pub const TEMPERATURE_DOMAIN: (f64, f64) = (30.0, 43.0);

/// Banded physiological measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    RespiratoryRate,
    HeartRate,
    SystolicBp,
    Temperature,
}

impl Vital {
    pub fn field_name(&self) -> &'static str {
        match self {
            Vital::RespiratoryRate => "respiratory_rate",
            Vital::HeartRate => "heart_rate",
            Vital::SystolicBp => "systolic_bp",
            Vital::Temperature => "temperature_c",
        }
    }
}

/// Upper edge of a band
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Upper<T> {
    Inclusive(T),
    Exclusive(T),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band<T> {
    pub lower: T,
    pub upper: Upper<T>,
    pub points: u8,
}

impl<T> Band<T> {
    /// `lower..=upper`
    pub const fn closed(lower: T, upper: T, points: u8) -> Self {
        Self { lower, upper: Upper::Inclusive(upper), points }
    }

    /// `lower..upper`
    pub const fn half_open(lower: T, upper: T, points: u8) -> Self {
        Self { lower, upper: Upper::Exclusive(upper), points }
    }
}

impl<T: PartialOrd + Copy> Band<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.lower
            && match self.upper {
                Upper::Inclusive(upper) => value <= upper,
                Upper::Exclusive(upper) => value < upper,
            }
    }
}

/// Ordered bands for one vital over its display domain
#[derive(Debug, Clone, Copy)]
pub struct BandTable<T: 'static> {
    pub vital: Vital,
    pub min: T,
    pub max: T,
    pub bands: &'static [Band<T>],
}

impl<T> BandTable<T>
where
    T: PartialOrd + Copy + Into<f64> + fmt::Display,
{
    pub fn in_domain(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Points for `value`, or `OutOfRangeInput` outside the display domain.
    pub fn points(&self, value: T) -> Result<u8> {
        if !self.in_domain(value) {
            return Err(TriageError::out_of_range(
                self.vital.field_name(),
                value.into(),
                self.min.into(),
                self.max.into(),
            ));
        }

        // most severe matching band wins
        self.bands
            .iter()
            .filter(|band| band.contains(value))
            .map(|band| band.points)
            .max()
            .ok_or_else(|| {
                TriageError::Internal(anyhow!(
                    "{} table has no band covering {}",
                    self.vital.field_name(),
                    value
                ))
            })
    }

    /// How many bands claim `value`; exactly one for a well-formed table
    pub fn matching_bands(&self, value: T) -> usize {
        self.bands.iter().filter(|band| band.contains(value)).count()
    }
}

/// The four banded vitals for one variant
#[derive(Debug, Clone, Copy)]
pub struct VariantTables {
    pub variant: Variant,
    pub respiratory_rate: BandTable<u16>,
    pub heart_rate: BandTable<u16>,
    pub systolic_bp: BandTable<u16>,
    pub temperature: BandTable<f64>,
}

pub fn tables_for(variant: Variant) -> &'static VariantTables {
    match variant {
        Variant::Adult => &ADULT,
        Variant::PediatricYounger => &PEDIATRIC_YOUNGER,
        Variant::PediatricOlder => &PEDIATRIC_OLDER,
    }
}

const fn rr_table(bands: &'static [Band<u16>]) -> BandTable<u16> {
    BandTable {
        vital: Vital::RespiratoryRate,
        min: RESPIRATORY_RATE_DOMAIN.0,
        max: RESPIRATORY_RATE_DOMAIN.1,
        bands,
    }
}

const fn hr_table(bands: &'static [Band<u16>]) -> BandTable<u16> {
    BandTable {
        vital: Vital::HeartRate,
        min: HEART_RATE_DOMAIN.0,
        max: HEART_RATE_DOMAIN.1,
        bands,
    }
}

const fn sbp_table(bands: &'static [Band<u16>]) -> BandTable<u16> {
    BandTable {
        vital: Vital::SystolicBp,
        min: SYSTOLIC_BP_DOMAIN.0,
        max: SYSTOLIC_BP_DOMAIN.1,
        bands,
    }
}

const fn temp_table(bands: &'static [Band<f64>]) -> BandTable<f64> {
    BandTable {
        vital: Vital::Temperature,
        min: TEMPERATURE_DOMAIN.0,
        max: TEMPERATURE_DOMAIN.1,
        bands,
    }
}

// Same temperature bands for all variants, kept as separate tables so they
// can diverge with the manual.
const ADULT_TEMPERATURE: &[Band<f64>] = &[
    Band::half_open(30.0, 35.0, 2),
    Band::half_open(35.0, 38.5, 0),
    Band::closed(38.5, 43.0, 2),
];

const PEDIATRIC_YOUNGER_TEMPERATURE: &[Band<f64>] = &[
    Band::half_open(30.0, 35.0, 2),
    Band::half_open(35.0, 38.5, 0),
    Band::closed(38.5, 43.0, 2),
];

const PEDIATRIC_OLDER_TEMPERATURE: &[Band<f64>] = &[
    Band::half_open(30.0, 35.0, 2),
    Band::half_open(35.0, 38.5, 0),
    Band::closed(38.5, 43.0, 2),
];

const ADULT_RESPIRATORY_RATE: &[Band<u16>] = &[
    Band::closed(5, 8, 3),
    Band::closed(9, 10, 2),
    Band::closed(11, 11, 1),
    Band::closed(12, 22, 0),
    Band::closed(23, 24, 1),
    Band::closed(25, 30, 2),
    Band::closed(31, 60, 3),
];

const ADULT_HEART_RATE: &[Band<u16>] = &[
    Band::closed(30, 39, 3),
    Band::closed(40, 100, 0),
    Band::closed(101, 110, 1),
    Band::closed(111, 140, 2),
    Band::closed(141, 200, 3),
];

const ADULT_SYSTOLIC_BP: &[Band<u16>] = &[
    Band::closed(50, 89, 3),
    Band::closed(90, 250, 0),
];

const PEDIATRIC_YOUNGER_RESPIRATORY_RATE: &[Band<u16>] = &[
    Band::closed(5, 19, 3),
    Band::closed(20, 25, 2),
    Band::closed(26, 39, 0),
    Band::closed(40, 49, 1),
    Band::closed(50, 59, 2),
    Band::closed(60, 60, 3),
];

const PEDIATRIC_YOUNGER_HEART_RATE: &[Band<u16>] = &[
    Band::closed(30, 69, 3),
    Band::closed(70, 79, 2),
    Band::closed(80, 130, 0),
    Band::closed(131, 159, 1),
    Band::closed(160, 169, 2),
    Band::closed(170, 200, 3),
];

const PEDIATRIC_YOUNGER_SYSTOLIC_BP: &[Band<u16>] = &[
    Band::closed(50, 69, 3),
    Band::closed(70, 250, 0),
];

const PEDIATRIC_OLDER_RESPIRATORY_RATE: &[Band<u16>] = &[
    Band::closed(5, 14, 3),
    Band::closed(15, 16, 2),
    Band::closed(17, 21, 0),
    Band::closed(22, 26, 1),
    Band::closed(27, 60, 3),
];

const PEDIATRIC_OLDER_HEART_RATE: &[Band<u16>] = &[
    Band::closed(30, 59, 3),
    Band::closed(60, 79, 2),
    Band::closed(80, 99, 0),
    Band::closed(100, 129, 1),
    Band::closed(130, 139, 2),
    Band::closed(140, 200, 3),
];

const PEDIATRIC_OLDER_SYSTOLIC_BP: &[Band<u16>] = &[
    Band::closed(50, 79, 3),
    Band::closed(80, 250, 0),
];

pub static ADULT: VariantTables = VariantTables {
    variant: Variant::Adult,
    respiratory_rate: rr_table(ADULT_RESPIRATORY_RATE),
    heart_rate: hr_table(ADULT_HEART_RATE),
    systolic_bp: sbp_table(ADULT_SYSTOLIC_BP),
    temperature: temp_table(ADULT_TEMPERATURE),
};

pub static PEDIATRIC_YOUNGER: VariantTables = VariantTables {
    variant: Variant::PediatricYounger,
    respiratory_rate: rr_table(PEDIATRIC_YOUNGER_RESPIRATORY_RATE),
    heart_rate: hr_table(PEDIATRIC_YOUNGER_HEART_RATE),
    systolic_bp: sbp_table(PEDIATRIC_YOUNGER_SYSTOLIC_BP),
    temperature: temp_table(PEDIATRIC_YOUNGER_TEMPERATURE),
};

pub static PEDIATRIC_OLDER: VariantTables = VariantTables {
    variant: Variant::PediatricOlder,
    respiratory_rate: rr_table(PEDIATRIC_OLDER_RESPIRATORY_RATE),
    heart_rate: hr_table(PEDIATRIC_OLDER_HEART_RATE),
    systolic_bp: sbp_table(PEDIATRIC_OLDER_SYSTOLIC_BP),
    temperature: temp_table(PEDIATRIC_OLDER_TEMPERATURE),
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VARIANTS: [Variant; 3] = [Variant::Adult, Variant::PediatricYounger, Variant::PediatricOlder];

    fn integer_tables(tables: &VariantTables) -> [&BandTable<u16>; 3] {
        [&tables.respiratory_rate, &tables.heart_rate, &tables.systolic_bp]
    }

    #[test]
    fn test_integer_tables_partition_every_value() {
        for variant in VARIANTS {
            for table in integer_tables(tables_for(variant)) {
                for value in table.min..=table.max {
                    assert_eq!(
                        table.matching_bands(value),
                        1,
                        "{variant:?} {} = {value}",
                        table.vital.field_name()
                    );
                }
                assert_eq!(table.matching_bands(table.min - 1), 0);
                assert_eq!(table.matching_bands(table.max + 1), 0);
            }
        }
    }

    #[test]
    fn test_temperature_edges() {
        for variant in VARIANTS {
            let table = &tables_for(variant).temperature;
            assert_eq!(table.points(30.0).unwrap(), 2);
            assert_eq!(table.points(34.9).unwrap(), 2);
            assert_eq!(table.points(35.0).unwrap(), 0);
            assert_eq!(table.points(38.4).unwrap(), 0);
            assert_eq!(table.points(38.5).unwrap(), 2);
            assert_eq!(table.points(43.0).unwrap(), 2);
        }
    }

    #[test]
    fn test_adult_boundaries_belong_to_declared_band() {
        let rr = &ADULT.respiratory_rate;
        assert_eq!(rr.points(8).unwrap(), 3);
        assert_eq!(rr.points(9).unwrap(), 2);
        assert_eq!(rr.points(22).unwrap(), 0);
        assert_eq!(rr.points(23).unwrap(), 1);
        assert_eq!(rr.points(30).unwrap(), 2);
        assert_eq!(rr.points(31).unwrap(), 3);

        let hr = &ADULT.heart_rate;
        assert_eq!(hr.points(39).unwrap(), 3);
        assert_eq!(hr.points(40).unwrap(), 0);
        assert_eq!(hr.points(100).unwrap(), 0);
        assert_eq!(hr.points(101).unwrap(), 1);
        assert_eq!(hr.points(140).unwrap(), 2);
        assert_eq!(hr.points(141).unwrap(), 3);

        assert_eq!(ADULT.systolic_bp.points(89).unwrap(), 3);
        assert_eq!(ADULT.systolic_bp.points(90).unwrap(), 0);
    }

    #[test]
    fn test_pediatric_tables_differ_from_adult() {
        // 30 breaths/min: abnormal for an adult, normal for a toddler
        assert_eq!(ADULT.respiratory_rate.points(30).unwrap(), 2);
        assert_eq!(PEDIATRIC_YOUNGER.respiratory_rate.points(30).unwrap(), 0);
        assert_eq!(PEDIATRIC_OLDER.respiratory_rate.points(30).unwrap(), 3);

        assert_eq!(ADULT.heart_rate.points(125).unwrap(), 2);
        assert_eq!(PEDIATRIC_YOUNGER.heart_rate.points(125).unwrap(), 0);
        assert_eq!(PEDIATRIC_OLDER.heart_rate.points(125).unwrap(), 1);
    }

    #[test]
    fn test_out_of_domain_rejected_not_clamped() {
        let err = ADULT.respiratory_rate.points(61).unwrap_err();
        assert!(matches!(
            err,
            TriageError::OutOfRangeInput { field: "respiratory_rate", value, .. } if value == 61.0
        ));
        assert!(ADULT.temperature.points(29.9).is_err());
        assert!(ADULT.temperature.points(43.1).is_err());
        assert!(ADULT.temperature.points(f64::NAN).is_err());
        assert!(PEDIATRIC_OLDER.systolic_bp.points(49).is_err());
    }

    proptest! {
        #[test]
        fn prop_temperature_partition(t in 30.0f64..=43.0, v in 0usize..3) {
            let table = &tables_for(VARIANTS[v]).temperature;
            prop_assert_eq!(table.matching_bands(t), 1);
            prop_assert!(table.points(t).is_ok());
        }

        #[test]
        fn prop_in_domain_integer_readings_always_band(
            rr in 5u16..=60,
            hr in 30u16..=200,
            sbp in 50u16..=250,
            v in 0usize..3,
        ) {
            let tables = tables_for(VARIANTS[v]);
            prop_assert!(tables.respiratory_rate.points(rr).unwrap() <= 3);
            prop_assert!(tables.heart_rate.points(hr).unwrap() <= 3);
            prop_assert!(tables.systolic_bp.points(sbp).unwrap() <= 3);
        }
    }
}
