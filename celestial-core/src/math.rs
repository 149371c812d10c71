//! Small numerical helpers used throughout the astrometry chain.

use crate::constants::{PI, TWOPI};

#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Normalizes an angle into `[0, 2π)`.
#[inline]
pub fn wrap_0_2pi(angle: f64) -> f64 {
    let w = fmod(angle, TWOPI);
    if w < 0.0 {
        w + TWOPI
    } else {
        w
    }
}

/// Normalizes an angle into `[-π, π)`.
#[inline]
pub fn wrap_pm_pi(angle: f64) -> f64 {
    let w = fmod(angle, TWOPI);
    if libm::fabs(w) >= PI {
        w - libm::copysign(TWOPI, angle)
    } else {
        w
    }
}

/// Great-circle separation between two points using the haversine formula.
///
/// All arguments and the result are in radians. Longitudes are RA-like,
/// latitudes Dec-like. Well conditioned for small separations, which is the
/// case that matters when comparing a star against its own transformed place.
///
/// ```
/// use celestial_core::math::haversine;
///
/// let sep = haversine(0.0, 0.0, 0.0, 0.1);
/// assert!((sep - 0.1).abs() < 1e-15);
/// ```
pub fn haversine(long1: f64, lat1: f64, long2: f64, lat2: f64) -> f64 {
    let half_dlat = 0.5 * (lat2 - lat1);
    let half_dlong = 0.5 * (long2 - long1);
    let s_lat = libm::sin(half_dlat);
    let s_long = libm::sin(half_dlong);
    let h = s_lat * s_lat + libm::cos(lat1) * libm::cos(lat2) * s_long * s_long;
    2.0 * libm::asin(libm::sqrt(h.clamp(0.0, 1.0)))
}
