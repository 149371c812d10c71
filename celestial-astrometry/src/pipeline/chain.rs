use super::geocentric::{app_geo_from_icrs_rad, icrs_from_app_geo_rad};
use super::topocentric::{app_geo_from_observed_rad, observed_from_app_geo_rad};
use super::ObservedOptions;
use crate::batch::{check_lengths, scale, RaDec, SpaceMotion};
use crate::errors::{AstrometryError, AstrometryResult};
use crate::observation::ObservationContext;
use celestial_core::constants::DEG_TO_RAD;
use celestial_time::Instant;

/// Checks shared by both directions of the chain. Returns the instant.
fn require<'c>(
    operation: &'static str,
    ctx: &'c ObservationContext,
    epoch: Option<f64>,
) -> AstrometryResult<(&'c Instant, f64)> {
    let mjd = ctx.mjd(operation)?;
    ctx.site(operation)?;
    let epoch = epoch.ok_or_else(|| AstrometryError::missing_context(operation, "an epoch"))?;
    Ok((mjd, epoch))
}

fn options(include_refraction: bool) -> ObservedOptions {
    ObservedOptions {
        include_refraction,
        ..ObservedOptions::default()
    }
}

/// Mean (ICRS) place of `epoch` straight to observed place: the composition
/// of `app_geo_from_icrs_rad` and `observed_from_app_geo_rad` at the default
/// wavelength.
///
/// Accurate to tens of mas more than 45° from the Sun and above 15° altitude.
pub fn observed_from_icrs_rad(
    ra: &[f64],
    dec: &[f64],
    motion: &SpaceMotion<'_>,
    ctx: &ObservationContext,
    epoch: Option<f64>,
    include_refraction: bool,
) -> AstrometryResult<RaDec> {
    check_lengths("observed_from_icrs", ra, dec, Some(motion))?;
    let (mjd, epoch) = require("observed_from_icrs", ctx, epoch)?;

    let apparent = app_geo_from_icrs_rad(ra, dec, motion, epoch, mjd)?;
    observed_from_app_geo_rad(&apparent.ra, &apparent.dec, ctx, options(include_refraction))
}

/// Degrees form of [`observed_from_icrs_rad`]: proper motion in arcsec/yr,
/// parallax in arcsec.
pub fn observed_from_icrs(
    ra: &[f64],
    dec: &[f64],
    motion: &SpaceMotion<'_>,
    ctx: &ObservationContext,
    epoch: Option<f64>,
    include_refraction: bool,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("observed_from_icrs", ra, dec, Some(motion))?;
    let motion = motion.resolve(n).arcsec_to_radians();
    Ok(observed_from_icrs_rad(
        &scale(ra, DEG_TO_RAD),
        &scale(dec, DEG_TO_RAD),
        &motion.as_motion(),
        ctx,
        epoch,
        include_refraction,
    )?
    .to_degrees())
}

/// Observed place back to mean place of `epoch`. Space motion and parallax
/// are not removed.
pub fn icrs_from_observed_rad(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    epoch: Option<f64>,
    include_refraction: bool,
) -> AstrometryResult<RaDec> {
    check_lengths("icrs_from_observed", ra, dec, None)?;
    let (mjd, epoch) = require("icrs_from_observed", ctx, epoch)?;

    let apparent = app_geo_from_observed_rad(ra, dec, ctx, options(include_refraction))?;
    icrs_from_app_geo_rad(&apparent.ra, &apparent.dec, epoch, mjd)
}

/// Degrees form of [`icrs_from_observed_rad`].
pub fn icrs_from_observed(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    epoch: Option<f64>,
    include_refraction: bool,
) -> AstrometryResult<RaDec> {
    check_lengths("icrs_from_observed", ra, dec, None)?;
    Ok(icrs_from_observed_rad(
        &scale(ra, DEG_TO_RAD),
        &scale(dec, DEG_TO_RAD),
        ctx,
        epoch,
        include_refraction,
    )?
    .to_degrees())
}
