use crate::apparent::{ampqk, mapqk, MeanToApparent};
use crate::batch::{check_lengths, scale, RaDec, SpaceMotion};
use crate::errors::AstrometryResult;
use celestial_core::constants::{ARCSEC_PER_RAD, DEG_TO_RAD};
use celestial_time::Instant;

/// Mean (ICRS) place of `epoch` to geocentric apparent place at the instant.
///
/// Applies space motion, parallax, light deflection, annual aberration,
/// precession and nutation. Proper motion in rad/yr (`pm_ra` × cos δ),
/// parallax in radians, radial velocity in km/s.
pub fn app_geo_from_icrs_rad(
    ra: &[f64],
    dec: &[f64],
    motion: &SpaceMotion<'_>,
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("app_geo_from_icrs", ra, dec, Some(motion))?;
    let motion = motion.resolve(n);
    let params = MeanToApparent::new(epoch, mjd.tdb());

    let mut out = RaDec::with_capacity(n);
    for i in 0..n {
        let (r, d) = mapqk(
            ra[i],
            dec[i],
            motion.pm_ra[i] / libm::cos(dec[i]),
            motion.pm_dec[i],
            motion.parallax[i] * ARCSEC_PER_RAD,
            motion.v_rad[i],
            &params,
        );
        out.push(r, d);
    }
    Ok(out)
}

/// Degrees form of [`app_geo_from_icrs_rad`]: proper motion in arcsec/yr,
/// parallax in arcsec.
pub fn app_geo_from_icrs(
    ra: &[f64],
    dec: &[f64],
    motion: &SpaceMotion<'_>,
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("app_geo_from_icrs", ra, dec, Some(motion))?;
    let motion = motion.resolve(n).arcsec_to_radians();
    Ok(app_geo_from_icrs_rad(
        &scale(ra, DEG_TO_RAD),
        &scale(dec, DEG_TO_RAD),
        &motion.as_motion(),
        epoch,
        mjd,
    )?
    .to_degrees())
}

/// Geocentric apparent place at the instant back to mean place of `epoch`.
///
/// Space motion and parallax are not removed.
pub fn icrs_from_app_geo_rad(
    ra: &[f64],
    dec: &[f64],
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    let n = check_lengths("icrs_from_app_geo", ra, dec, None)?;
    let params = MeanToApparent::new(epoch, mjd.tdb());

    let mut out = RaDec::with_capacity(n);
    for (&r, &d) in ra.iter().zip(dec) {
        let (r, d) = ampqk(r, d, &params);
        out.push(r, d);
    }
    Ok(out)
}

/// Degrees form of [`icrs_from_app_geo_rad`].
pub fn icrs_from_app_geo(
    ra: &[f64],
    dec: &[f64],
    epoch: f64,
    mjd: &Instant,
) -> AstrometryResult<RaDec> {
    check_lengths("icrs_from_app_geo", ra, dec, None)?;
    Ok(icrs_from_app_geo_rad(&scale(ra, DEG_TO_RAD), &scale(dec, DEG_TO_RAD), epoch, mjd)?
        .to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use celestial_core::constants::ARCSEC_TO_RAD;
    use celestial_core::math::haversine;

    fn separation_arcsec(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
        haversine(
            ra1 * DEG_TO_RAD,
            dec1 * DEG_TO_RAD,
            ra2 * DEG_TO_RAD,
            dec2 * DEG_TO_RAD,
        ) / ARCSEC_TO_RAD
    }

    #[test]
    fn test_round_trip_below_a_milliarcsecond() {
        let mjd = Instant::from_tai(59580.3).unwrap();
        let ra = [0.0, 45.0, 123.4, 200.0, 287.5, 359.0];
        let dec = [0.0, -30.0, 60.0, -75.0, 10.0, 45.0];

        let apparent = app_geo_from_icrs(&ra, &dec, &SpaceMotion::none(), 2000.0, &mjd).unwrap();
        let mean = icrs_from_app_geo(&apparent.ra, &apparent.dec, 2000.0, &mjd).unwrap();

        for i in 0..ra.len() {
            let sep = separation_arcsec(mean.ra[i], mean.dec[i], ra[i], dec[i]);
            assert!(sep < 1e-3, "star {} round trip off by {}\"", i, sep);
        }
    }

    #[test]
    fn test_apparent_shift_is_precession_sized() {
        // 22 years of precession dominate; aberration adds at most ~20".
        let mjd = Instant::from_tai(59580.3).unwrap();
        let apparent = app_geo_from_icrs(&[150.0], &[20.0], &SpaceMotion::none(), 2000.0, &mjd)
            .unwrap();
        let sep = separation_arcsec(apparent.ra[0], apparent.dec[0], 150.0, 20.0);
        assert!(sep > 900.0 && sep < 1200.0, "shift {}\"", sep);
    }

    #[test]
    fn test_parallax_moves_nearby_star() {
        let mjd = Instant::from_tai(59700.0).unwrap();
        let px = [0.768];
        let near = SpaceMotion::none().with_parallax(&px);
        let far = app_geo_from_icrs(&[219.9], &[-60.8], &SpaceMotion::none(), 2000.0, &mjd)
            .unwrap();
        let close = app_geo_from_icrs(&[219.9], &[-60.8], &near, 2000.0, &mjd).unwrap();
        let sep = separation_arcsec(far.ra[0], far.dec[0], close.ra[0], close.dec[0]);
        assert!(sep > 0.0 && sep <= 0.768 * 1.02, "parallax shift {}\"", sep);
    }

    #[test]
    fn test_degree_and_radian_forms_agree() {
        let mjd = Instant::from_tai(60100.0).unwrap();
        let pm_ra = [0.2];
        let pm_dec = [-0.1];
        let motion = SpaceMotion::none().with_proper_motion(&pm_ra, &pm_dec);
        let deg = app_geo_from_icrs(&[80.0], &[-5.0], &motion, 2000.0, &mjd).unwrap();

        let pm_ra_rad = [0.2 * ARCSEC_TO_RAD];
        let pm_dec_rad = [-0.1 * ARCSEC_TO_RAD];
        let motion = SpaceMotion::none().with_proper_motion(&pm_ra_rad, &pm_dec_rad);
        let rad = app_geo_from_icrs_rad(
            &[80.0 * DEG_TO_RAD],
            &[-5.0 * DEG_TO_RAD],
            &motion,
            2000.0,
            &mjd,
        )
        .unwrap()
        .to_degrees();

        assert_abs_diff_eq!(deg.ra[0], rad.ra[0], epsilon = 1e-12);
        assert_abs_diff_eq!(deg.dec[0], rad.dec[0], epsilon = 1e-12);
    }

    #[test]
    fn test_length_checks_include_motion() {
        let mjd = Instant::from_tai(60100.0).unwrap();
        let rv = [1.0; 4];
        let motion = SpaceMotion::none().with_radial_velocity(&rv);
        let err = app_geo_from_icrs(&[0.0; 5], &[0.0; 5], &motion, 2000.0, &mjd).unwrap_err();
        assert_eq!(err.to_string(), "app_geo_from_icrs: 5 RAs, 5 Decs, 4 v_rads");
    }
}
