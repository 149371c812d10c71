//! Position of the Sun, and the angular distance of stars from it.
//!
//! The Sun's direction is the reversed heliocentric Earth direction from the
//! mean-to-apparent parameters, in the mean frame of the catalog epoch. It is
//! geometric: no aberration or light time is applied, which shifts it by about
//! 20" from the apparent Sun. That is ample for sun-avoidance decisions.
//!
//! All `mjd` arguments here are TDB.

use crate::apparent::MeanToApparent;
use crate::batch::check_lengths;
use crate::errors::AstrometryResult;
use celestial_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use celestial_core::math::{haversine, wrap_0_2pi};

/// Sun `(ra, dec)` in radians, RA in `[0, 2π)`.
pub fn solar_ra_dec_rad(mjd: f64, epoch: f64) -> (f64, f64) {
    let params = MeanToApparent::new(epoch, mjd);
    let (ra, dec) = (-params.earth_heliocentric_direction).to_spherical();
    (wrap_0_2pi(ra), dec)
}

/// Sun `(ra, dec)` in degrees.
pub fn solar_ra_dec(mjd: f64, epoch: f64) -> (f64, f64) {
    let (ra, dec) = solar_ra_dec_rad(mjd, epoch);
    (ra * RAD_TO_DEG, dec * RAD_TO_DEG)
}

/// Angular distance (radians) of one position from the Sun.
pub fn distance_to_sun_rad(ra: f64, dec: f64, mjd: f64, epoch: f64) -> f64 {
    let (sun_ra, sun_dec) = solar_ra_dec_rad(mjd, epoch);
    haversine(ra, dec, sun_ra, sun_dec)
}

/// Angular distance (degrees) of one position from the Sun.
pub fn distance_to_sun(ra: f64, dec: f64, mjd: f64, epoch: f64) -> f64 {
    distance_to_sun_rad(ra * DEG_TO_RAD, dec * DEG_TO_RAD, mjd, epoch) * RAD_TO_DEG
}

/// Batch form of [`distance_to_sun_rad`]; the Sun is computed once.
pub fn distance_to_sun_batch_rad(
    ra: &[f64],
    dec: &[f64],
    mjd: f64,
    epoch: f64,
) -> AstrometryResult<Vec<f64>> {
    check_lengths("distance_to_sun", ra, dec, None)?;
    let (sun_ra, sun_dec) = solar_ra_dec_rad(mjd, epoch);
    Ok(ra
        .iter()
        .zip(dec)
        .map(|(&r, &d)| haversine(r, d, sun_ra, sun_dec))
        .collect())
}

/// Degrees form of [`distance_to_sun_batch_rad`].
pub fn distance_to_sun_batch(
    ra: &[f64],
    dec: &[f64],
    mjd: f64,
    epoch: f64,
) -> AstrometryResult<Vec<f64>> {
    check_lengths("distance_to_sun", ra, dec, None)?;
    let ra: Vec<f64> = ra.iter().map(|r| r * DEG_TO_RAD).collect();
    let dec: Vec<f64> = dec.iter().map(|d| d * DEG_TO_RAD).collect();
    Ok(distance_to_sun_batch_rad(&ra, &dec, mjd, epoch)?
        .into_iter()
        .map(|d| d * RAD_TO_DEG)
        .collect())
}
