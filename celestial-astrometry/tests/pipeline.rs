use approx::assert_abs_diff_eq;
use celestial_astrometry::horizon::de2h;
use celestial_astrometry::observed::ObservatoryParameters;
use celestial_astrometry::{
    app_geo_from_icrs, app_geo_from_icrs_rad, app_geo_from_observed, apply_refraction,
    apply_refraction_batch, distance_to_sun, icrs_from_app_geo, icrs_from_observed,
    observed_from_app_geo, observed_from_app_geo_alt_az, observed_from_app_geo_rad, observed_from_icrs, observed_from_icrs_rad,
    refraction_coefficients, solar_ra_dec, AstrometryError, ObservationContext, ObservedOptions,
    Site, SpaceMotion, DEFAULT_EPOCH,
};
use celestial_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, MILLIARCSEC_TO_RAD, RAD_TO_DEG};
use celestial_core::math::{haversine, wrap_0_2pi};
use celestial_time::Instant;

const TAI: f64 = 60000.1;

fn context() -> ObservationContext {
    ObservationContext::lsst(Instant::from_tai(TAI).unwrap())
}

fn separation_mas(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    haversine(
        ra1 * DEG_TO_RAD,
        dec1 * DEG_TO_RAD,
        ra2 * DEG_TO_RAD,
        dec2 * DEG_TO_RAD,
    ) / MILLIARCSEC_TO_RAD
}

/// Mean places (degrees) placed around the meridian at the test instant,
/// all within 60° of the zenith.
fn stars_near_meridian(ctx: &ObservationContext) -> (Vec<f64>, Vec<f64>) {
    let lst = ObservatoryParameters::build(ctx, 0.5, true)
        .unwrap()
        .local_sidereal_time;
    [(0.0, -30.0), (0.4, -55.0), (-0.5, -10.0), (0.9, -75.0), (-0.2, 5.0)]
        .iter()
        .map(|&(ha, dec)| (wrap_0_2pi(lst - ha) * RAD_TO_DEG, dec))
        .unzip()
}

// --- Time ---

#[test]
fn instant_survives_utc_round_trip() {
    for tai in [45000.3, 51544.5, 57754.9, 60000.1] {
        let utc = Instant::from_tai(tai).unwrap().utc().unwrap();
        let back = Instant::from_utc(utc).unwrap();
        assert_abs_diff_eq!(back.tai(), tai, epsilon = 1e-9);
    }
}

// --- Mean <-> apparent ---

#[test]
fn apparent_round_trip_is_sub_milliarcsecond() {
    let mjd = Instant::from_tai(TAI).unwrap();
    let ra = [0.5, 66.0, 133.3, 180.0, 251.7, 330.0];
    let dec = [0.0, 45.0, -12.0, -70.0, 80.0, -33.0];

    let apparent = app_geo_from_icrs(&ra, &dec, &SpaceMotion::none(), DEFAULT_EPOCH, &mjd).unwrap();
    let mean = icrs_from_app_geo(&apparent.ra, &apparent.dec, DEFAULT_EPOCH, &mjd).unwrap();

    for i in 0..ra.len() {
        let err = separation_mas(ra[i], dec[i], mean.ra[i], mean.dec[i]);
        assert!(err < 1.0, "star {}: {} mas", i, err);
    }
}

// --- Apparent <-> observed ---

#[test]
fn observed_chain_round_trip_below_75_degrees() {
    let ctx = context();
    let (ra, dec) = stars_near_meridian(&ctx);

    for include_refraction in [true, false] {
        let observed = observed_from_icrs(
            &ra,
            &dec,
            &SpaceMotion::none(),
            &ctx,
            Some(DEFAULT_EPOCH),
            include_refraction,
        )
        .unwrap();
        let mean = icrs_from_observed(
            &observed.ra,
            &observed.dec,
            &ctx,
            Some(DEFAULT_EPOCH),
            include_refraction,
        )
        .unwrap();

        for i in 0..ra.len() {
            let err = separation_mas(ra[i], dec[i], mean.ra[i], mean.dec[i]);
            assert!(err < 2.0, "star {}: {} mas (refraction {})", i, err, include_refraction);
        }
    }
}

#[test]
fn chain_equals_composition_of_stages() {
    let ctx = context();
    let (ra, dec) = stars_near_meridian(&ctx);
    let ra: Vec<f64> = ra.iter().map(|r| r * DEG_TO_RAD).collect();
    let dec: Vec<f64> = dec.iter().map(|d| d * DEG_TO_RAD).collect();
    let pm_ra = vec![1e-7; ra.len()];
    let pm_dec = vec![-2e-7; ra.len()];
    let motion = SpaceMotion::none().with_proper_motion(&pm_ra, &pm_dec);
    let mjd = Instant::from_tai(TAI).unwrap();

    let chained =
        observed_from_icrs_rad(&ra, &dec, &motion, &ctx, Some(DEFAULT_EPOCH), true).unwrap();
    let apparent = app_geo_from_icrs_rad(&ra, &dec, &motion, DEFAULT_EPOCH, &mjd).unwrap();
    let staged =
        observed_from_app_geo_rad(&apparent.ra, &apparent.dec, &ctx, ObservedOptions::default())
            .unwrap();

    assert_eq!(chained, staged);
}

#[test]
fn altitude_is_complement_of_zenith_distance() {
    let ctx = context();
    let (ra, dec) = stars_near_meridian(&ctx);
    let params = ObservatoryParameters::build(&ctx, 0.5, false).unwrap();

    let (observed, altaz) =
        observed_from_app_geo_alt_az(&ra, &dec, &ctx, ObservedOptions::without_refraction())
            .unwrap();

    for i in 0..ra.len() {
        // Without refraction, observed differs from topocentric only by
        // diurnal aberration (under 0.3").
        let hour_angle = params.local_sidereal_time - ra[i] * DEG_TO_RAD;
        let (_, alt) = de2h(hour_angle, dec[i] * DEG_TO_RAD, params.latitude);
        let diff = (altaz.alt[i] - alt * RAD_TO_DEG).abs() * 3600.0;
        assert!(diff < 0.35, "star {}: {}\"", i, diff);

        let (_, alt_obs) = de2h(
            params.local_sidereal_time - observed.ra[i] * DEG_TO_RAD,
            observed.dec[i] * DEG_TO_RAD,
            params.latitude,
        );
        assert_abs_diff_eq!(altaz.alt[i], alt_obs * RAD_TO_DEG, epsilon = 1e-8);
    }
}

// --- Outside the accuracy envelope ---

#[test]
fn stars_near_the_sun_still_round_trip() {
    let ctx = context();
    let mjd = Instant::from_tai(TAI).unwrap();
    let (sun_ra, sun_dec) = solar_ra_dec(TAI, DEFAULT_EPOCH);
    let ra = [sun_ra, sun_ra, sun_ra];
    let dec = [sun_dec + 1.0, sun_dec + 5.0, sun_dec + 20.0];

    let apparent = app_geo_from_icrs(&ra, &dec, &SpaceMotion::none(), DEFAULT_EPOCH, &mjd).unwrap();
    let mean = icrs_from_app_geo(&apparent.ra, &apparent.dec, DEFAULT_EPOCH, &mjd).unwrap();
    for i in 0..ra.len() {
        let err = separation_mas(ra[i], dec[i], mean.ra[i], mean.dec[i]);
        assert!(err < 1.0, "{}° from the Sun: {} mas", dec[i] - sun_dec, err);
    }

    let observed =
        observed_from_icrs(&ra, &dec, &SpaceMotion::none(), &ctx, Some(DEFAULT_EPOCH), true)
            .unwrap();
    assert!(observed.ra.iter().chain(&observed.dec).all(|v| v.is_finite()));
}

#[test]
fn low_altitude_star_round_trips() {
    let ctx = context();
    let params = ObservatoryParameters::build(&ctx, 0.5, true).unwrap();
    // On the meridian, 80° from the zenith towards the north.
    let ra = [params.local_sidereal_time * RAD_TO_DEG];
    let dec = [params.latitude * RAD_TO_DEG + 80.0];

    let (observed, altaz) =
        observed_from_app_geo_alt_az(&ra, &dec, &ctx, ObservedOptions::default()).unwrap();
    assert!(altaz.alt[0] > 10.0 && altaz.alt[0] < 10.15, "alt {}", altaz.alt[0]);

    let staged = observed_from_app_geo(&ra, &dec, &ctx, ObservedOptions::default()).unwrap();
    assert_eq!(staged, observed);

    let back =
        app_geo_from_observed(&observed.ra, &observed.dec, &ctx, ObservedOptions::default())
            .unwrap();
    let err = separation_mas(ra[0], dec[0], back.ra[0], back.dec[0]);
    assert!(err < 1000.0, "{} mas", err);
}

// --- Configuration errors ---

#[test]
fn mismatched_lengths_are_configuration_errors() {
    let mjd = Instant::from_tai(TAI).unwrap();
    let err = app_geo_from_icrs(&[0.0; 5], &[0.0; 4], &SpaceMotion::none(), 2000.0, &mjd)
        .unwrap_err();
    assert!(err.is_configuration_error());
    assert_eq!(err.to_string(), "app_geo_from_icrs: 5 RAs, 4 Decs");

    let err = observed_from_icrs(
        &[0.0; 5],
        &[0.0; 4],
        &SpaceMotion::none(),
        &context(),
        Some(2000.0),
        true,
    )
    .unwrap_err();
    assert!(matches!(err, AstrometryError::LengthMismatch { .. }));
}

#[test]
fn refraction_needs_a_site() {
    let err = refraction_coefficients(0.5, None).unwrap_err();
    assert!(err.is_configuration_error());
}

// --- Refraction ---

#[test]
fn sea_level_refraction_coefficients() {
    let site = Site::new("sea level", 0.0, 0.0, 0.0, 15.0, 1013.25, 0.0, 0.0065).unwrap();
    let (tan_z, tan3_z) = refraction_coefficients(0.5, Some(&site)).unwrap();
    assert!(tan_z > 0.0);
    assert!(tan3_z.abs() < 0.01 * tan_z, "A {} B {}", tan_z, tan3_z);
    // About an arcminute at 45°.
    let r45 = tan_z / ARCSEC_TO_RAD;
    assert!(r45 > 55.0 && r45 < 62.0, "{}\"", r45);
}

#[test]
fn zenith_is_not_refracted() {
    let (tan_z, tan3_z) = refraction_coefficients(0.5, Some(&Site::lsst())).unwrap();
    assert_eq!(apply_refraction(0.0, tan_z, tan3_z), 0.0);

    let batch = apply_refraction_batch(&[0.0, 0.3, 0.6, 1.0], tan_z, tan3_z);
    assert_eq!(batch[0], 0.0);
    assert!(batch.windows(2).all(|w| w[1] > w[0]));
}

// --- Sun ---

#[test]
fn sun_at_j2000() {
    let (ra, dec) = solar_ra_dec(51544.5, 2000.0);
    assert!((270.0..=290.0).contains(&ra), "RA {}", ra);
    assert!((-24.0..=-20.0).contains(&dec), "Dec {}", dec);
}

#[test]
fn sun_is_at_zero_distance_from_itself() {
    let (ra, dec) = solar_ra_dec(TAI, 2000.0);
    assert!(distance_to_sun(ra, dec, TAI, 2000.0) < 1e-8);
}
