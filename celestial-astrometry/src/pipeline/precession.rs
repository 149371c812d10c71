use crate::apparent::{epj, pm, prenut};
use crate::batch::{check_lengths, scale, RaDec, SpaceMotion};
use crate::errors::AstrometryResult;
use celestial_core::constants::{ARCSEC_PER_RAD, DEG_TO_RAD};
use celestial_core::math::wrap_0_2pi;
use celestial_core::Vector3;
use celestial_time::Instant;

/// Rotates mean places of `epoch` to the true equator and equinox of the
/// instant: IAU 2006 precession with frame bias, and IAU 2000B nutation.
/// No aberration or light deflection. Radians in and out.
pub fn apply_precession_rad(
    ra: &[f64],
    dec: &[f64],
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("apply_precession", ra, dec, None)?;
    let matrix = prenut(epoch, mjd.tt());

    let mut out = RaDec::with_capacity(n);
    for (&r, &d) in ra.iter().zip(dec) {
        let (r, d) = matrix.apply(&Vector3::from_spherical(r, d)).to_spherical();
        out.push(wrap_0_2pi(r), d);
    }
    Ok(out)
}

/// Degrees form of [`apply_precession_rad`].
pub fn apply_precession(
    ra: &[f64],
    dec: &[f64],
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    check_lengths("apply_precession", ra, dec, None)?;
    Ok(apply_precession_rad(
        &scale(ra, DEG_TO_RAD),
        &scale(dec, DEG_TO_RAD),
        epoch,
        mjd,
    )?
    .to_degrees())
}

/// Carries mean places from `epoch` to the TT epoch of the instant along
/// their space motion. The frame is unchanged.
///
/// Proper motions are rad/yr with `pm_ra` in coordinate angle (× cos δ);
/// parallax is radians and radial velocity km/s. Parallax only matters
/// together with radial velocity.
pub fn apply_proper_motion_rad(
    ra: &[f64],
    dec: &[f64],
    motion: &SpaceMotion<'_>,
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("apply_proper_motion", ra, dec, Some(motion))?;
    let motion = motion.resolve(n);
    let target = epj(mjd.tt());

    let mut out = RaDec::with_capacity(n);
    for i in 0..n {
        let pr = motion.pm_ra[i] / libm::cos(dec[i]);
        let px = motion.parallax[i] * ARCSEC_PER_RAD;
        let (r, d) = pm(
            ra[i],
            dec[i],
            pr,
            motion.pm_dec[i],
            px,
            motion.v_rad[i],
            epoch,
            target,
        );
        out.push(r, d);
    }
    Ok(out)
}

/// Degrees form of [`apply_proper_motion_rad`]: proper motion in arcsec/yr,
/// parallax in arcsec.
pub fn apply_proper_motion(
    ra: &[f64],
    dec: &[f64],
    motion: &SpaceMotion<'_>,
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("apply_proper_motion", ra, dec, Some(motion))?;
    let motion = motion.resolve(n).arcsec_to_radians();
    Ok(apply_proper_motion_rad(
        &scale(ra, DEG_TO_RAD),
        &scale(dec, DEG_TO_RAD),
        &motion.as_motion(),
        epoch,
        mjd,
    )?
    .to_degrees())
}
