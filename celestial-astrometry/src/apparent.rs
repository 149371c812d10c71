//! Mean place to geocentric apparent place, and back.
//!
//! The star-independent part of the correction is gathered once into a
//! [`MeanToApparent`] block; [`mapqk`], [`mapqkz`] and [`ampqk`] then apply it
//! star by star. The corrections, in order:
//!
//! 1. space motion over the interval from the catalog epoch to the date, and
//!    annual parallax;
//! 2. light deflection by the Sun, restrained inside the solar disc;
//! 3. annual aberration, relativistically;
//! 4. precession and nutation from the mean equator and equinox of the catalog
//!    epoch to the true equator and equinox of date.
//!
//! The inverse iterates the aberration and deflection steps, so a forward and
//! inverse pass agree to well below a milliarcsecond away from the Sun.
//!
//! # References
//!
//! - Wallace, P.T., SLALIB/PAL `sla_MAPPA`, `sla_MAPQK`, `sla_MAPQKZ`, `sla_AMPQK`
//! - Explanatory Supplement to the Astronomical Almanac, 3rd ed., Chapter 7

use crate::earth::earth_state;
use celestial_core::constants::{
    ARCSEC_TO_RAD, DAYS_PER_JULIAN_YEAR, J2000_JD, J2000_MJD, LIGHT_TIME_AU_SECONDS,
    SECONDS_PER_DAY_F64, SUN_SCHWARZSCHILD_AU,
};
use celestial_core::math::wrap_0_2pi;
use celestial_core::nutation::NutationIAU2000B;
use celestial_core::precession::PrecessionIAU2006;
use celestial_core::utils::jd_to_centuries;
use celestial_core::{RotationMatrix3, Vector3};
use celestial_time::JulianDate;

/// km/s to AU/yr, times radians per arcsecond.
const VF: f64 = 0.21094502;

/// km/s to AU/yr, for parallax given in arcseconds.
const VFR: f64 = (DAYS_PER_JULIAN_YEAR * SECONDS_PER_DAY_F64 / 149_597_870.0) * ARCSEC_TO_RAD;

/// Lower bound on `1 + p·e` in the deflection denominator.
const DEFLECTION_RESTRAINT: f64 = 1e-5;

/// Julian epoch of an MJD.
pub fn epj(mjd: f64) -> f64 {
    2000.0 + (mjd - J2000_MJD) / DAYS_PER_JULIAN_YEAR
}

/// Bias-precession (IAU 2006) from the GCRS to the mean equator and equinox
/// of a Julian epoch.
fn epoch_precession(epoch: f64) -> RotationMatrix3 {
    let epoch_jd = J2000_JD + (epoch - 2000.0) * DAYS_PER_JULIAN_YEAR;
    PrecessionIAU2006::new()
        .compute(epoch_jd, 0.0)
        .bias_precession_matrix
}

/// Precession-nutation matrix from the mean equator and equinox of a Julian
/// epoch to the true equator and equinox of a TT MJD.
pub fn prenut(epoch: f64, mjd_tt: f64) -> RotationMatrix3 {
    let date = JulianDate::from_mjd(mjd_tt);
    let t = jd_to_centuries(date.jd1(), date.jd2());
    let nutation = NutationIAU2000B::new().compute(date.jd1(), date.jd2());

    let npb = PrecessionIAU2006::new().npb_matrix(t, nutation.delta_psi, nutation.delta_eps);
    npb.multiply(&epoch_precession(epoch).transpose())
}

/// Applies linear space motion from epoch `ep0` to epoch `ep1`.
///
/// `pr` is dα/dt (not multiplied by cos δ) and `pd` is dδ/dt, both in rad per
/// Julian year; `px` is parallax in arcsec and `rv` radial velocity in km/s.
#[allow(clippy::too_many_arguments)]
pub fn pm(r0: f64, d0: f64, pr: f64, pd: f64, px: f64, rv: f64, ep0: f64, ep1: f64) -> (f64, f64) {
    let p = Vector3::from_spherical(r0, d0);
    let w = VFR * rv * px;
    let em = space_motion(r0, d0, &p, pr, pd, w);

    let (ra, dec) = (p + em * (ep1 - ep0)).to_spherical();
    (wrap_0_2pi(ra), dec)
}

fn space_motion(ra: f64, dec: f64, q: &Vector3, pr: f64, pd: f64, w: f64) -> Vector3 {
    let (sin_r, cos_r) = (libm::sin(ra), libm::cos(ra));
    let (sin_d, cos_d) = (libm::sin(dec), libm::cos(dec));
    Vector3::new(
        -pr * q.y - pd * cos_r * sin_d + w * q.x,
        pr * q.x - pd * sin_r * sin_d + w * q.y,
        pd * cos_d + w * q.z,
    )
}

/// Star-independent mean-to-apparent parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanToApparent {
    /// Julian years from the catalog epoch to the date.
    pub time_interval: f64,
    /// Barycentric Earth position (AU).
    pub earth_position: Vector3,
    /// Heliocentric direction of the Earth (unit vector).
    pub earth_heliocentric_direction: Vector3,
    /// Solar gravitational radius over the Sun-Earth distance.
    pub deflection_factor: f64,
    /// Barycentric Earth velocity in units of c.
    pub earth_velocity: Vector3,
    /// `sqrt(1 - v²)`.
    pub inverse_lorentz: f64,
    pub precession_nutation: RotationMatrix3,
}

impl MeanToApparent {
    /// Parameters for catalog `epoch` (Julian) at a TDB MJD.
    pub fn new(epoch: f64, mjd_tdb: f64) -> Self {
        log::debug!(
            "building mean-to-apparent parameters: epoch {} at MJD {:.6} TDB",
            epoch,
            mjd_tdb
        );

        let to_epoch = epoch_precession(epoch);
        let state = earth_state(mjd_tdb);

        let earth_position = to_epoch.apply(&state.barycentric_position);
        let (distance, direction) = to_epoch
            .apply(&state.heliocentric_position)
            .normalize_with_modulus();
        let earth_velocity = to_epoch.apply(&state.barycentric_velocity)
            * (LIGHT_TIME_AU_SECONDS / SECONDS_PER_DAY_F64);
        let inverse_lorentz = libm::sqrt(1.0 - earth_velocity.magnitude_squared());

        Self {
            time_interval: epj(mjd_tdb) - epoch,
            earth_position,
            earth_heliocentric_direction: direction,
            deflection_factor: SUN_SCHWARZSCHILD_AU / distance,
            earth_velocity,
            inverse_lorentz,
            precession_nutation: prenut(epoch, mjd_tdb),
        }
    }

    fn deflect(&self, p: &Vector3) -> Vector3 {
        let ehn = &self.earth_heliocentric_direction;
        let pde = p.dot(ehn);
        let w = self.deflection_factor / (pde + 1.0).max(DEFLECTION_RESTRAINT);
        *p + (*ehn - *p * pde) * w
    }

    fn aberrate(&self, p1: &Vector3) -> Vector3 {
        let abv = self.earth_velocity;
        let w = 1.0 + p1.dot(&abv) / (self.inverse_lorentz + 1.0);
        *p1 * self.inverse_lorentz + abv * w
    }

    fn to_apparent(&self, p: &Vector3) -> (f64, f64) {
        let p2 = self.aberrate(&self.deflect(p));
        let (ra, dec) = self.precession_nutation.apply(&p2).to_spherical();
        (wrap_0_2pi(ra), dec)
    }
}

/// Mean to apparent place with full space motion.
///
/// `pr` is dα/dt and `pd` dδ/dt in rad per Julian year, `px` parallax in
/// arcsec, `rv` radial velocity in km/s.
pub fn mapqk(
    rm: f64,
    dm: f64,
    pr: f64,
    pd: f64,
    px: f64,
    rv: f64,
    params: &MeanToApparent,
) -> (f64, f64) {
    let q = Vector3::from_spherical(rm, dm);

    let pxr = px * ARCSEC_TO_RAD;
    let w = VF * rv * pxr;
    let em = space_motion(rm, dm, &q, pr, pd, w);

    let p = (q + em * params.time_interval - params.earth_position * pxr).normalize();
    params.to_apparent(&p)
}

/// Mean to apparent place for a star with no space motion and no parallax.
pub fn mapqkz(rm: f64, dm: f64, params: &MeanToApparent) -> (f64, f64) {
    params.to_apparent(&Vector3::from_spherical(rm, dm))
}

/// Apparent to mean place, ignoring space motion and parallax.
pub fn ampqk(ra: f64, da: f64, params: &MeanToApparent) -> (f64, f64) {
    const ABERRATION_ITERATIONS: usize = 2;
    const DEFLECTION_ITERATIONS: usize = 5;

    let p2 = params
        .precession_nutation
        .apply_transpose(&Vector3::from_spherical(ra, da));

    let abv = params.earth_velocity;
    let ab1 = params.inverse_lorentz;
    let mut p1 = p2;
    for _ in 0..ABERRATION_ITERATIONS {
        let p1dv = p1.dot(&abv);
        let w = 1.0 + p1dv / (ab1 + 1.0);
        p1 = ((p2 * (1.0 + p1dv) - abv * w) / ab1).normalize();
    }

    let ehn = params.earth_heliocentric_direction;
    let gr2e = params.deflection_factor;
    let mut p = p1;
    for _ in 0..DEFLECTION_ITERATIONS {
        let pde = p.dot(&ehn);
        let pdep1 = 1.0 + pde;
        let w = pdep1 - gr2e * pde;
        p = ((p1 * pdep1 - ehn * gr2e) / w).normalize();
    }

    let (rm, dm) = p.to_spherical();
    (wrap_0_2pi(rm), dm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use celestial_core::constants::{DEG_TO_RAD, MILLIARCSEC_TO_RAD};
    use celestial_core::math::haversine;

    #[test]
    fn test_epj() {
        assert_eq!(epj(J2000_MJD), 2000.0);
        assert_abs_diff_eq!(epj(J2000_MJD + 365.25 * 10.0), 2010.0, epsilon = 1e-12);
    }

    #[test]
    fn test_prenut_is_rotation() {
        let m = prenut(2000.0, 60000.0);
        assert!(m.is_rotation_matrix(1e-12));
        let m = prenut(1950.0, 51544.5);
        assert!(m.is_rotation_matrix(1e-12));
    }

    #[test]
    fn test_prenut_epoch_equal_to_date_is_nutation_only() {
        // Epoch and date coincide: frame bias cancels, nutation remains (< 20").
        let mjd = 58000.0;
        let m = prenut(epj(mjd), mjd);
        let v = Vector3::new(0.3, -0.5, 0.8).normalize();
        let angle = libm::acos(m.apply(&v).dot(&v).min(1.0));
        assert!(angle < 20.0 * ARCSEC_TO_RAD, "{} arcsec", angle / ARCSEC_TO_RAD);
    }

    #[test]
    fn test_prenut_matches_pal() {
        // PAL palPrenut(1985.0, 50123.4567), built on the full 2000A nutation;
        // 2000B agrees to a few mas.
        let expected = RotationMatrix3::from_array([
            [0.9999962358680738, -0.002516417057665452, -0.001093569785342370],
            [0.002516462370370876, 0.9999968329010883, 4.006159587358310e-5],
            [0.001093465510215479, -4.281337229063151e-5, 0.9999994012499173],
        ]);
        let m = prenut(1985.0, 50123.4567);
        assert!(
            m.max_difference(&expected) < 3e-8,
            "max difference {}",
            m.max_difference(&expected)
        );
    }

    #[test]
    fn test_pm_linear_motion() {
        let mu = 1.0 * ARCSEC_TO_RAD;
        let (ra, dec) = pm(1.0, 0.0, 0.0, mu, 0.0, 0.0, 2000.0, 2010.0);
        assert_abs_diff_eq!(ra, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(dec, 10.0 * mu, epsilon = 1e-12);
    }

    #[test]
    fn test_pm_zero_interval_is_identity() {
        let (ra, dec) = pm(2.5, -0.7, 1e-6, 2e-6, 0.3, 40.0, 2015.5, 2015.5);
        assert_abs_diff_eq!(ra, 2.5, epsilon = 1e-14);
        assert_abs_diff_eq!(dec, -0.7, epsilon = 1e-14);
    }

    #[test]
    fn test_parameter_block() {
        let params = MeanToApparent::new(2000.0, 60000.0);
        assert_abs_diff_eq!(params.time_interval, epj(60000.0) - 2000.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            params.earth_heliocentric_direction.magnitude(),
            1.0,
            epsilon = 1e-14
        );
        // |v|/c is about 1e-4.
        let v = params.earth_velocity.magnitude();
        assert!(v > 0.95e-4 && v < 1.02e-4, "v/c = {}", v);
        assert!(params.deflection_factor > 1.9e-8 && params.deflection_factor < 2.05e-8);
        assert!(params.precession_nutation.is_rotation_matrix(1e-12));
    }

    #[test]
    fn test_parameter_block_matches_pal_mappa() {
        // PAL palMappa(2020.0, 45012.3).
        let params = MeanToApparent::new(2020.0, 45012.3);
        assert_abs_diff_eq!(params.time_interval, -37.884188911704310, epsilon = 1e-9);

        let eb = Vector3::new(-0.7888341859486424, 0.5405321789059870, 0.2340784267119091);
        let ehn = Vector3::new(-0.8067807553217332, 0.5420884771236513, 0.2350423277034460);
        let eb_err = (params.earth_position - eb).magnitude();
        let ehn_err = (params.earth_heliocentric_direction - ehn).magnitude();
        assert!(eb_err < 3e-5, "barycentric Earth off by {} AU", eb_err);
        assert!(ehn_err < 2e-5, "heliocentric direction off by {}", ehn_err);
    }

    #[test]
    fn test_annual_aberration_size() {
        let params = MeanToApparent::new(2000.0, 60000.0);
        let pn = &params.precession_nutation;
        for (ra, dec) in [(0.5, 0.2), (2.0, -1.0), (4.0, 0.9)] {
            let (ra_app, dec_app) = mapqkz(ra, dec, &params);
            let undone = pn.apply_transpose(&Vector3::from_spherical(ra_app, dec_app));
            let (r, d) = undone.to_spherical();
            let shift = haversine(r, d, ra, dec) / ARCSEC_TO_RAD;
            assert!(shift < 20.6 + 0.1, "shift {} arcsec", shift);
        }
    }

    #[test]
    fn test_mapqk_without_motion_matches_mapqkz() {
        let params = MeanToApparent::new(2000.0, 59000.0);
        let (a1, d1) = mapqk(1.2, 0.4, 0.0, 0.0, 0.0, 0.0, &params);
        let (a2, d2) = mapqkz(1.2, 0.4, &params);
        assert_abs_diff_eq!(a1, a2, epsilon = 1e-14);
        assert_abs_diff_eq!(d1, d2, epsilon = 1e-14);
    }

    #[test]
    fn test_ampqk_inverts_mapqkz() {
        let params = MeanToApparent::new(2000.0, 59500.25);
        for (ra_deg, dec_deg) in [(10.0, 20.0), (150.0, -45.0), (300.0, 70.0), (359.9, 0.0)] {
            let (ra, dec) = (ra_deg * DEG_TO_RAD, dec_deg * DEG_TO_RAD);
            let (ra_app, dec_app) = mapqkz(ra, dec, &params);
            let (ra_back, dec_back) = ampqk(ra_app, dec_app, &params);
            let err = haversine(ra, dec, ra_back, dec_back);
            assert!(
                err < 0.01 * MILLIARCSEC_TO_RAD,
                "round trip error {} mas at ({}, {})",
                err / MILLIARCSEC_TO_RAD,
                ra_deg,
                dec_deg
            );
        }
    }

    #[test]
    fn test_parallax_displaces_toward_sun() {
        // A 1" parallax at 1 AU moves a star by at most ~1".
        let params = MeanToApparent::new(2000.0, 60100.0);
        let (a1, d1) = mapqk(3.0, 0.1, 0.0, 0.0, 1.0, 0.0, &params);
        let (a0, d0) = mapqkz(3.0, 0.1, &params);
        let shift = haversine(a1, d1, a0, d0) / ARCSEC_TO_RAD;
        assert!(shift > 0.0 && shift < 1.02, "parallax shift {}", shift);
    }
}
