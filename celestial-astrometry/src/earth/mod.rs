//! Earth position and velocity for annual parallax, light deflection and
//! aberration.
//!
//! The heliocentric Earth comes from a truncated VSOP87D series on the
//! ecliptic of date, rotated to the mean equator of date by the IAU 2006
//! obliquity and from there to the ICRS by the transposed bias-precession
//! matrix. The barycentric Earth adds the Sun's offset from the barycentre
//! (see [`giants`]). Velocity is a central difference over ±1 s.
//!
//! Directions are good to about 1" and the barycentric position to a few
//! 1e-5 AU, which keeps parallax and deflection errors well below a
//! milliarcsecond.
//!
//! # References
//!
//! - Bretagnon, P. & Francou, G. (1988), A&A 202, 309 (VSOP87)
//! - Meeus, J., Astronomical Algorithms, 2nd ed., chapters 25 and 32

mod giants;
mod vsop87;

use celestial_core::constants::{ARCSEC_TO_RAD, SECONDS_PER_DAY_F64};
use celestial_core::obliquity::iau_2006_mean_obliquity_centuries;
use celestial_core::precession::PrecessionIAU2006;
use celestial_core::utils::{jd_to_centuries, jd_to_millennia};
use celestial_core::{RotationMatrix3, Vector3};
use celestial_time::JulianDate;

pub use giants::solar_offset;

/// Half-width of the velocity difference (s).
const DT_SECONDS: f64 = 1.0;

/// VSOP87 dynamical equinox to the FK5 equinox, in longitude.
const FK5_LONGITUDE_CORRECTION: f64 = -0.09033 * ARCSEC_TO_RAD;

/// Earth position (AU) and velocity (AU/day), ICRS axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthState {
    pub heliocentric_position: Vector3,
    pub barycentric_position: Vector3,
    pub barycentric_velocity: Vector3,
}

/// Earth state at a TDB MJD.
pub fn earth_state(mjd_tdb: f64) -> EarthState {
    let date = JulianDate::from_mjd(mjd_tdb);
    let heliocentric = heliocentric_at(&date);

    let ahead = barycentric_at(&date.add_seconds(DT_SECONDS));
    let behind = barycentric_at(&date.add_seconds(-DT_SECONDS));
    let velocity = (ahead - behind) / (2.0 * DT_SECONDS / SECONDS_PER_DAY_F64);

    EarthState {
        heliocentric_position: heliocentric,
        barycentric_position: heliocentric + solar_offset(centuries(&date)),
        barycentric_velocity: velocity,
    }
}

/// Heliocentric Earth position (AU) at a TDB MJD, ICRS axes.
pub fn heliocentric_position(mjd_tdb: f64) -> Vector3 {
    heliocentric_at(&JulianDate::from_mjd(mjd_tdb))
}

fn centuries(date: &JulianDate) -> f64 {
    jd_to_centuries(date.jd1(), date.jd2())
}

fn heliocentric_at(date: &JulianDate) -> Vector3 {
    let tau = jd_to_millennia(date.jd1(), date.jd2());
    let t = centuries(date);

    let longitude = vsop87::evaluate(vsop87::LONGITUDE, tau) + FK5_LONGITUDE_CORRECTION;
    let latitude = vsop87::evaluate(vsop87::LATITUDE, tau);
    let radius = vsop87::evaluate(vsop87::RADIUS, tau);
    let ecliptic = Vector3::from_spherical(longitude, latitude) * radius;

    let mut to_equator = RotationMatrix3::identity();
    to_equator.rotate_x(-iau_2006_mean_obliquity_centuries(t));

    PrecessionIAU2006::new()
        .compute(date.jd1(), date.jd2())
        .bias_precession_matrix
        .apply_transpose(&to_equator.apply(&ecliptic))
}

fn barycentric_at(date: &JulianDate) -> Vector3 {
    heliocentric_at(date) + solar_offset(centuries(date))
}
