use super::ObservedOptions;
use crate::batch::{check_lengths, scale, AltAz, RaDec};
use crate::errors::AstrometryResult;
use crate::horizon::de2h;
use crate::observation::ObservationContext;
use crate::observed::{aopqk, oapqk, ObservatoryParameters};
use celestial_core::constants::DEG_TO_RAD;

fn parameters(
    operation: &'static str,
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<ObservatoryParameters> {
    ObservatoryParameters::build_for(
        operation,
        ctx,
        options.wavelength,
        options.include_refraction,
    )
}

/// Geocentric apparent place to observed place at the site and time of `ctx`.
///
/// Applies diurnal aberration and, unless switched off, refraction. The
/// result is the RA and Dec a telescope pointing at the star would read.
pub fn observed_from_app_geo_rad(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("observed_from_app_geo", ra, dec, None)?;
    let params = parameters("observed_from_app_geo", ctx, options)?;

    let mut out = RaDec::with_capacity(n);
    for (&r, &d) in ra.iter().zip(dec) {
        let place = aopqk(r, d, &params);
        out.push(place.ra, place.dec);
    }
    Ok(out)
}

/// Degrees form of [`observed_from_app_geo_rad`].
pub fn observed_from_app_geo(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<RaDec> {
    check_lengths("observed_from_app_geo", ra, dec, None)?;
    Ok(observed_from_app_geo_rad(&scale(ra, DEG_TO_RAD), &scale(dec, DEG_TO_RAD), ctx, options)?
        .to_degrees())
}

/// As [`observed_from_app_geo_rad`], also returning observed altitude and
/// azimuth (north through east).
pub fn observed_from_app_geo_alt_az_rad(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<(RaDec, AltAz)> {
    let n = check_lengths("observed_from_app_geo", ra, dec, None)?;
    let params = parameters("observed_from_app_geo", ctx, options)?;

    let mut radec = RaDec::with_capacity(n);
    let mut altaz = AltAz::with_capacity(n);
    for (&r, &d) in ra.iter().zip(dec) {
        let place = aopqk(r, d, &params);
        let (az, alt) = de2h(place.hour_angle, place.dec, params.latitude);
        radec.push(place.ra, place.dec);
        altaz.push(alt, az);
    }
    Ok((radec, altaz))
}

pub fn observed_from_app_geo_alt_az(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<(RaDec, AltAz)> {
    check_lengths("observed_from_app_geo", ra, dec, None)?;
    let (radec, altaz) = observed_from_app_geo_alt_az_rad(
        &scale(ra, DEG_TO_RAD),
        &scale(dec, DEG_TO_RAD),
        ctx,
        options,
    )?;
    Ok((radec.to_degrees(), altaz.to_degrees()))
}

/// Observed place back to geocentric apparent place. The refraction setting
/// must match the one the observed place was made with.
pub fn app_geo_from_observed_rad(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("app_geo_from_observed", ra, dec, None)?;
    let params = parameters("app_geo_from_observed", ctx, options)?;

    let mut out = RaDec::with_capacity(n);
    for (&r, &d) in ra.iter().zip(dec) {
        let (r, d) = oapqk(r, d, &params);
        out.push(r, d);
    }
    Ok(out)
}

/// Degrees form of [`app_geo_from_observed_rad`].
pub fn app_geo_from_observed(
    ra: &[f64],
    dec: &[f64],
    ctx: &ObservationContext,
    options: ObservedOptions,
) -> AstrometryResult<RaDec> {
    check_lengths("app_geo_from_observed", ra, dec, None)?;
    Ok(app_geo_from_observed_rad(&scale(ra, DEG_TO_RAD), &scale(dec, DEG_TO_RAD), ctx, options)?
        .to_degrees())
}
