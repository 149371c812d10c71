//! Two-part Julian Dates.
//!
//! A single `f64` Julian Date near 2.45 million days only resolves about 40
//! microseconds. Splitting it as `jd1 + jd2` keeps the large, usually integral
//! part in `jd1` and the fraction in `jd2`, so arithmetic on the fraction keeps
//! full precision. The time-scale conversions operate on this type; the public
//! surface of the crate speaks Modified Julian Date (`MJD = JD - 2400000.5`).

use celestial_core::constants::{J2000_JD, MJD_ZERO_POINT, SECONDS_PER_DAY_F64};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    /// Splits an MJD as `(2400000.5, mjd)`, the ERFA convention.
    pub fn from_mjd(mjd: f64) -> Self {
        Self::new(MJD_ZERO_POINT, mjd)
    }

    pub fn jd1(&self) -> f64 {
        self.jd1
    }

    pub fn jd2(&self) -> f64 {
        self.jd2
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn to_mjd(&self) -> f64 {
        (self.jd1 - MJD_ZERO_POINT) + self.jd2
    }

    /// Adds days to whichever part is smaller in magnitude.
    pub fn add_days(&self, days: f64) -> Self {
        if self.jd1.abs() >= self.jd2.abs() {
            Self::new(self.jd1, self.jd2 + days)
        } else {
            Self::new(self.jd1 + days, self.jd2)
        }
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY_F64)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}
