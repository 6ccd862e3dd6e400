//! Tiered fine rate tables, one per company category.
//!
//! Rates are expressed in UIT multiples, following the published scale:
//! the amount in soles is the multiple times the UIT value in force. Band
//! boundaries are deliberately kept as an explicit ordered list; the upper
//! bound of each named band is inclusive and the last band is open-ended.

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared_types::{CompanyCategory, Severity};

/// One worker-count band with its per-violation rates in UIT multiples.
#[derive(Debug, Clone)]
pub struct RateBand {
    pub label: &'static str,
    /// Inclusive upper worker count; `None` marks the open-ended top band.
    upper: Option<u32>,
    minor: Decimal,
    serious: Decimal,
    very_serious: Decimal,
}

impl RateBand {
    fn new(
        label: &'static str,
        upper: Option<u32>,
        minor: Decimal,
        serious: Decimal,
        very_serious: Decimal,
    ) -> Self {
        Self {
            label,
            upper,
            minor,
            serious,
            very_serious,
        }
    }

    pub fn covers(&self, workers: u32) -> bool {
        self.upper.map_or(true, |max| workers <= max)
    }

    /// Per-violation rate in UIT multiples.
    pub fn rate(&self, severity: Severity) -> Decimal {
        match severity {
            Severity::Minor => self.minor,
            Severity::Serious => self.serious,
            Severity::VerySerious => self.very_serious,
        }
    }
}

/// Ordered band list for one company category.
#[derive(Debug)]
pub struct RateTable {
    bands: Vec<RateBand>,
}

impl RateTable {
    /// Strict ascending scan: the first band whose upper bound reaches
    /// `workers` wins; the open-ended band catches everything else.
    pub fn band_for(&self, workers: u32) -> Option<&RateBand> {
        self.bands.iter().find(|band| band.covers(workers))
    }
}

lazy_static! {
    static ref MICRO: RateTable = RateTable {
        bands: vec![
            RateBand::new("1", Some(1), dec!(0.045), dec!(0.11), dec!(0.23)),
            RateBand::new("2", Some(2), dec!(0.05), dec!(0.14), dec!(0.25)),
            RateBand::new("3", Some(3), dec!(0.07), dec!(0.16), dec!(0.29)),
            RateBand::new("4", Some(4), dec!(0.08), dec!(0.18), dec!(0.32)),
            RateBand::new("5", Some(5), dec!(0.09), dec!(0.20), dec!(0.36)),
            RateBand::new("6", Some(6), dec!(0.11), dec!(0.25), dec!(0.41)),
            RateBand::new("7", Some(7), dec!(0.14), dec!(0.29), dec!(0.47)),
            RateBand::new("8", Some(8), dec!(0.16), dec!(0.34), dec!(0.54)),
            RateBand::new("9", Some(9), dec!(0.18), dec!(0.38), dec!(0.61)),
            RateBand::new("10 or more", None, dec!(0.23), dec!(0.45), dec!(0.68)),
        ],
    };

    static ref SMALL: RateTable = RateTable {
        bands: vec![
            RateBand::new("1-5", Some(5), dec!(0.09), dec!(0.45), dec!(0.77)),
            RateBand::new("6-10", Some(10), dec!(0.14), dec!(0.59), dec!(0.99)),
            RateBand::new("11-20", Some(20), dec!(0.18), dec!(0.77), dec!(1.28)),
            RateBand::new("21-30", Some(30), dec!(0.23), dec!(0.97), dec!(1.64)),
            RateBand::new("31-40", Some(40), dec!(0.32), dec!(1.26), dec!(2.14)),
            RateBand::new("41-50", Some(50), dec!(0.45), dec!(1.62), dec!(2.75)),
            RateBand::new("51-60", Some(60), dec!(0.61), dec!(2.09), dec!(3.56)),
            RateBand::new("61-70", Some(70), dec!(0.83), dec!(2.43), dec!(4.32)),
            RateBand::new("71-99", Some(99), dec!(1.01), dec!(2.81), dec!(4.95)),
            RateBand::new("100 or more", None, dec!(2.25), dec!(4.50), dec!(7.65)),
        ],
    };

    static ref GENERAL: RateTable = RateTable {
        bands: vec![
            RateBand::new("1-10", Some(10), dec!(0.26), dec!(1.57), dec!(2.63)),
            RateBand::new("11-25", Some(25), dec!(0.89), dec!(3.92), dec!(5.25)),
            RateBand::new("26-50", Some(50), dec!(1.26), dec!(5.22), dec!(7.88)),
            RateBand::new("51-100", Some(100), dec!(2.33), dec!(6.53), dec!(10.50)),
            RateBand::new("101-200", Some(200), dec!(3.10), dec!(7.83), dec!(13.12)),
            RateBand::new("201-300", Some(300), dec!(3.73), dec!(10.45), dec!(15.75)),
            RateBand::new("301-400", Some(400), dec!(5.30), dec!(13.06), dec!(18.38)),
            RateBand::new("401-500", Some(500), dec!(7.61), dec!(18.28), dec!(21.00)),
            RateBand::new("501-600", Some(600), dec!(9.91), dec!(20.89), dec!(23.63)),
            RateBand::new("601-700", Some(700), dec!(12.22), dec!(23.50), dec!(26.25)),
            RateBand::new("701-800", Some(800), dec!(14.52), dec!(26.12), dec!(28.88)),
            RateBand::new("801-900", Some(900), dec!(16.83), dec!(28.71), dec!(31.50)),
            RateBand::new("901 or more", None, dec!(22.14), dec!(52.53), dec!(78.75)),
        ],
    };
}

/// Rate table for a company category.
pub fn table_for(category: CompanyCategory) -> &'static RateTable {
    match category {
        CompanyCategory::Micro => &MICRO,
        CompanyCategory::Small => &SMALL,
        CompanyCategory::General => &GENERAL,
    }
}
