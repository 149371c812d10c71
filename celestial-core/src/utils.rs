use crate::constants::{DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_MILLENNIUM, J2000_JD};

/// Julian centuries since J2000.0 for a two-part Julian Date.
#[inline]
pub fn jd_to_centuries(jd1: f64, jd2: f64) -> f64 {
    ((jd1 - J2000_JD) + jd2) / DAYS_PER_JULIAN_CENTURY
}

/// Julian millennia since J2000.0 for a two-part Julian Date.
#[inline]
pub fn jd_to_millennia(jd1: f64, jd2: f64) -> f64 {
    ((jd1 - J2000_JD) + jd2) / DAYS_PER_JULIAN_MILLENNIUM
}
