//! UTC <-> TAI through the leap-second table.
//!
//! TAI runs uniformly; UTC is TAI minus an offset that has been stepped by whole
//! seconds since 1972 and that drifted linearly between 1961 and 1972. The offset
//! is looked up by calendar date:
//!
//! ```text
//! TAI - UTC = base_offset                                  (1972 onwards)
//! TAI - UTC = base_offset + (MJD - reference_MJD) * rate   (1960 - 1971)
//! ```
//!
//! Before 1960 the offset is taken as zero.
//!
//! # Algorithms
//!
//! UTC -> TAI samples the offset at 0h, 12h and 24h of the UTC day. The 0h/12h
//! difference recovers the pre-1972 drift, and any remaining jump to the next
//! day's 0h is a leap second, which stretches the day fraction. This gives the
//! right answer inside a day that contains a leap second.
//!
//! TAI -> UTC has no closed form across a step, so it guesses UTC = TAI and
//! refines three times through the forward conversion, which converges well
//! below a picosecond.
//!
//! # References
//!
//! - IERS Bulletin C (leap second announcements)
//! - Explanatory Supplement to the Astronomical Almanac, 3rd ed., Chapter 3

use crate::julian::JulianDate;
use crate::TimeResult;
use celestial_core::constants::{MJD_ZERO_POINT, SECONDS_PER_DAY_F64};
use celestial_core::{AstroError, MathErrorKind};

/// `(year, month, TAI-UTC seconds)` at the start of each change.
#[rustfmt::skip]
const TAI_UTC_OFFSETS: [(i32, i32, f64); 42] = [
    (1960, 1, 1.4178180), (1961, 1, 1.4228180), (1961, 8, 1.3728180),
    (1962, 1, 1.8458580), (1963, 11, 1.9458580), (1964, 1, 3.2401300),
    (1964, 4, 3.3401300), (1964, 9, 3.4401300), (1965, 1, 3.5401300),
    (1965, 3, 3.6401300), (1965, 7, 3.7401300), (1965, 9, 3.8401300),
    (1966, 1, 4.3131700), (1968, 2, 4.2131700),
    (1972, 1, 10.0), (1972, 7, 11.0), (1973, 1, 12.0), (1974, 1, 13.0),
    (1975, 1, 14.0), (1976, 1, 15.0), (1977, 1, 16.0), (1978, 1, 17.0),
    (1979, 1, 18.0), (1980, 1, 19.0), (1981, 7, 20.0), (1982, 7, 21.0),
    (1983, 7, 22.0), (1985, 7, 23.0), (1988, 1, 24.0), (1990, 1, 25.0),
    (1991, 1, 26.0), (1992, 7, 27.0), (1993, 7, 28.0), (1994, 7, 29.0),
    (1996, 1, 30.0), (1997, 7, 31.0), (1999, 1, 32.0), (2006, 1, 33.0),
    (2009, 1, 34.0), (2012, 7, 35.0), (2015, 7, 36.0), (2017, 1, 37.0),
];

/// Entries of [`TAI_UTC_OFFSETS`] that carry a drift term.
const PRE_LEAP_SECOND_ENTRIES: usize = 14;

/// `(reference MJD, seconds per day)` for the drift entries.
#[rustfmt::skip]
const UTC_DRIFT_CORRECTIONS: [(f64, f64); PRE_LEAP_SECOND_ENTRIES] = [
    (37300.0, 0.0012960), (37300.0, 0.0012960), (37300.0, 0.0012960),
    (37665.0, 0.0011232), (37665.0, 0.0011232),
    (38761.0, 0.0012960), (38761.0, 0.0012960), (38761.0, 0.0012960),
    (38761.0, 0.0012960), (38761.0, 0.0012960), (38761.0, 0.0012960),
    (38761.0, 0.0012960),
    (39126.0, 0.0025920), (39126.0, 0.0025920),
];

/// TAI - UTC in seconds for a UTC calendar date and day fraction.
pub fn tai_minus_utc(year: i32, month: i32, day: i32, fraction: f64) -> f64 {
    if !(0.0..=1.0).contains(&fraction) {
        return 0.0;
    }

    let m = 12 * year + month;
    let i = match TAI_UTC_OFFSETS
        .binary_search_by(|&(entry_year, entry_month, _)| (12 * entry_year + entry_month).cmp(&m))
    {
        Ok(idx) => idx,
        Err(0) => return 0.0,
        Err(idx) => idx - 1,
    };

    let mut offset = TAI_UTC_OFFSETS[i].2;

    if i < PRE_LEAP_SECOND_ENTRIES {
        let (drift_mjd, drift_rate) = UTC_DRIFT_CORRECTIONS[i];
        let mjd = mjd_from_calendar(year, month, day) as f64;
        offset += (mjd + fraction - drift_mjd) * drift_rate;
    }

    offset
}

/// UTC Julian Date to TAI Julian Date.
pub fn utc_to_tai(utc: JulianDate) -> TimeResult<JulianDate> {
    let (utc_int, utc_frac, big1) = if utc.jd1().abs() >= utc.jd2().abs() {
        (utc.jd1(), utc.jd2(), true)
    } else {
        (utc.jd2(), utc.jd1(), false)
    };

    let (year, month, day, mut day_fraction) = julian_to_calendar(utc_int, utc_frac)?;

    let offset_0h = tai_minus_utc(year, month, day, 0.0);
    let offset_12h = tai_minus_utc(year, month, day, 0.5);
    let (next_year, next_month, next_day) = next_calendar_day(year, month, day);
    let offset_24h = tai_minus_utc(next_year, next_month, next_day, 0.0);

    let drift_rate = 2.0 * (offset_12h - offset_0h);
    let leap_amount = offset_24h - (offset_0h + drift_rate);

    day_fraction *= (SECONDS_PER_DAY_F64 + leap_amount) / SECONDS_PER_DAY_F64;
    day_fraction *= (SECONDS_PER_DAY_F64 + drift_rate) / SECONDS_PER_DAY_F64;

    let day_start = mjd_from_calendar(year, month, day) as f64;

    let mut tai_frac = MJD_ZERO_POINT - utc_int;
    tai_frac += day_start;
    tai_frac += day_fraction + offset_0h / SECONDS_PER_DAY_F64;

    Ok(if big1 {
        JulianDate::new(utc_int, tai_frac)
    } else {
        JulianDate::new(tai_frac, utc_int)
    })
}

/// TAI Julian Date to UTC Julian Date.
pub fn tai_to_utc(tai: JulianDate) -> TimeResult<JulianDate> {
    const ITERATIONS: usize = 3;

    let (tai_int, tai_frac, big1) = if tai.jd1().abs() >= tai.jd2().abs() {
        (tai.jd1(), tai.jd2(), true)
    } else {
        (tai.jd2(), tai.jd1(), false)
    };

    let utc_int = tai_int;
    let mut utc_frac = tai_frac;

    for _ in 0..ITERATIONS {
        let guess = utc_to_tai(JulianDate::new(utc_int, utc_frac))?;
        utc_frac += tai_int - guess.jd1();
        utc_frac += tai_frac - guess.jd2();
    }

    Ok(if big1 {
        JulianDate::new(utc_int, utc_frac)
    } else {
        JulianDate::new(utc_frac, utc_int)
    })
}

/// Two-part Julian Date to Gregorian `(year, month, day, day_fraction)`.
///
/// The fractional parts are summed with Kahan compensation so the day fraction
/// is exact to the last bit even when `jd2` carries a large offset.
pub fn julian_to_calendar(jd1: f64, jd2: f64) -> TimeResult<(i32, i32, i32, f64)> {
    const DJMIN: f64 = -68569.5;
    const DJMAX: f64 = 1e9;

    let dj = jd1 + jd2;
    if !(DJMIN..=DJMAX).contains(&dj) {
        return Err(AstroError::math_error(
            "julian_to_calendar",
            MathErrorKind::OutOfRange,
            &format!("Julian Date {} outside [{}, {}]", dj, DJMIN, DJMAX),
        )
        .into());
    }

    fn nearest_int(a: f64) -> f64 {
        if a.abs() < 0.5 {
            0.0
        } else if a < 0.0 {
            (a - 0.5).ceil()
        } else {
            (a + 0.5).floor()
        }
    }

    let whole_1 = nearest_int(jd1);
    let whole_2 = nearest_int(jd2);
    let mut jd = whole_1 as i64 + whole_2 as i64;

    let mut sum: f64 = 0.5;
    let mut correction = 0.0;
    for frac in [jd1 - whole_1, jd2 - whole_2] {
        let temp = sum + frac;
        correction += if sum.abs() >= frac.abs() {
            (sum - temp) + frac
        } else {
            (frac - temp) + sum
        };
        sum = temp;

        if sum >= 1.0 {
            jd += 1;
            sum -= 1.0;
        }
    }
    let mut fraction = sum + correction;
    correction = fraction - sum;

    if fraction < 0.0 {
        fraction = sum + 1.0;
        correction += (1.0 - fraction) + sum;
        sum = fraction;
        fraction = sum + correction;
        correction = fraction - sum;
        jd -= 1;
    }

    if (fraction - 1.0) >= -f64::EPSILON / 4.0 {
        let temp = sum - 1.0;
        correction += (sum - temp) - 1.0;
        sum = temp;
        fraction = sum + correction;

        if (-f64::EPSILON / 2.0) < fraction {
            jd += 1;
            fraction = fraction.max(0.0);
        }
    }

    let (year, month, day) = calendar_from_jd_number(jd);
    Ok((year, month, day, fraction))
}

/// Gregorian date of an integral Julian Day Number (Fliegel & Van Flandern).
fn calendar_from_jd_number(jd: i64) -> (i32, i32, i32) {
    let mut l = jd + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l -= (1461 * i) / 4 - 31;
    let k = (80 * l) / 2447;
    let day = (l - (2447 * k) / 80) as i32;
    let l = k / 11;
    let month = (k + 2 - 12 * l) as i32;
    let year = (100 * (n - 49) + i + l) as i32;
    (year, month, day)
}

/// MJD of 0h on a Gregorian calendar date.
pub fn mjd_from_calendar(year: i32, month: i32, day: i32) -> i64 {
    let my = (month - 14) / 12;
    let iypmy = (year + my) as i64;
    (1461 * (iypmy + 4800)) / 4 + (367 * (month as i64 - 2 - 12 * my as i64)) / 12
        - (3 * ((iypmy + 4900) / 100)) / 4
        + day as i64
        - 2432076
}

pub fn next_calendar_day(year: i32, month: i32, day: i32) -> (i32, i32, i32) {
    // JDN = MJD + 2400001 at noon of the same civil date.
    calendar_from_jd_number(mjd_from_calendar(year, month, day) + 1 + 2400001)
}
