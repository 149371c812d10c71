//! Earth rotation angle and Greenwich mean sidereal time (IAU 2006).
//!
//! GMST is the Earth rotation angle plus a polynomial in TT that accounts for
//! accumulated precession in right ascension:
//!
//! ```text
//! GMST = ERA(UT1) + 0.014506" + 4612.156534" T + 1.3915817" T² + ...
//! ```
//!
//! The TT argument only enters the polynomial, so passing UTC for it moves the
//! result by about 0.1 mas.

use crate::julian::JulianDate;
use crate::TimeResult;
use celestial_core::constants::{ARCSEC_TO_RAD, J2000_JD, TWOPI};
use celestial_core::math::{fmod, wrap_0_2pi};
use celestial_core::{AstroError, MathErrorKind};
use celestial_core::utils::jd_to_centuries;

/// Earth rotation angle (IAU 2000) in `[0, 2π)` from a two-part UT1 Julian Date.
pub fn earth_rotation_angle(ut1: JulianDate) -> TimeResult<f64> {
    let (d1, d2) = if ut1.jd1() < ut1.jd2() {
        (ut1.jd1(), ut1.jd2())
    } else {
        (ut1.jd2(), ut1.jd1())
    };

    let t = d1 + (d2 - J2000_JD);
    if !t.is_finite() || t.abs() > 1e12 {
        let kind = if t.is_finite() {
            MathErrorKind::OutOfRange
        } else {
            MathErrorKind::NotFinite
        };
        return Err(AstroError::math_error(
            "earth_rotation_angle",
            kind,
            &format!("{} days from J2000", t),
        )
        .into());
    }

    let f = fmod(d1, 1.0) + fmod(d2, 1.0);
    let theta = TWOPI * (f + 0.7790572732640 + 0.00273781191135448 * t);

    Ok(wrap_0_2pi(theta))
}

/// Greenwich mean sidereal time (radians, `[0, 2π)`), IAU 2006 expression.
pub fn gmst(ut1: JulianDate, tt: JulianDate) -> TimeResult<f64> {
    let t = jd_to_centuries(tt.jd1(), tt.jd2());
    let era = earth_rotation_angle(ut1)?;

    let polynomial_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 + t * (-0.0000000368)))));

    Ok(wrap_0_2pi(era + polynomial_arcsec * ARCSEC_TO_RAD))
}
