//! IAU 2006 precession in the Fukushima-Williams parameterization.
//!
//! Four angles define the mean equator and equinox of date relative to the GCRS:
//!
//! - **gamb**: GCRS right ascension of the intersection of the ecliptic of date
//!   with the GCRS equator
//! - **phib**: obliquity of the ecliptic of date on the GCRS equator
//! - **psib**: precession angle plus bias in longitude along the ecliptic of date
//! - **epsa**: mean obliquity of date
//!
//! Adding nutation to `psib` and `epsa` turns the bias-precession matrix into the
//! full bias-precession-nutation matrix, which is how the apparent-place chain
//! builds its rotation to the true equator and equinox of date.
//!
//! # References
//!
//! - IERS Conventions (2010), Chapter 5
//! - Capitaine, N., Wallace, P.T., & Chapront, J. (2003), A&A 412, 567-586
//! - Hilton, J.L., et al. (2006), Celest. Mech. Dyn. Astron. 94, 351-367

use super::PrecessionResult;
use crate::constants::ARCSEC_TO_RAD;
use crate::matrix::RotationMatrix3;
use crate::obliquity::iau_2006_mean_obliquity_centuries;
use crate::utils::jd_to_centuries;

#[derive(Debug, Default, Clone, Copy)]
pub struct PrecessionIAU2006;

impl PrecessionIAU2006 {
    pub fn new() -> Self {
        Self
    }

    /// Bias, precession and their product at a two-part TT Julian Date.
    ///
    /// `precession_matrix` is the bias-precession matrix with the constant frame
    /// bias removed, i.e. it rotates mean J2000.0 coordinates to the mean equator
    /// and equinox of date.
    pub fn compute(&self, date1: f64, date2: f64) -> PrecessionResult {
        let t = jd_to_centuries(date1, date2);

        let (gamb, phib, psib, epsa) = self.fukushima_williams_angles(t);
        let bias_precession_matrix = self.fw_angles_to_matrix(gamb, phib, psib, epsa);

        let (gamb0, phib0, psib0, epsa0) = self.fukushima_williams_angles(0.0);
        let bias_matrix = self.fw_angles_to_matrix(gamb0, phib0, psib0, epsa0);

        let precession_matrix = bias_precession_matrix.multiply(&bias_matrix.transpose());

        PrecessionResult {
            bias_matrix,
            precession_matrix,
            bias_precession_matrix,
        }
    }

    /// Fukushima-Williams angles (radians) at `t` Julian centuries TT from J2000.0.
    pub fn fukushima_williams_angles(&self, t: f64) -> (f64, f64, f64, f64) {
        let gamb = (-0.052928
            + (10.556378
                + (0.4932044 + (-0.00031238 + (-0.000002788 + (0.0000000260) * t) * t) * t) * t)
                * t)
            * ARCSEC_TO_RAD;

        let phib = (84381.412819
            + (-46.811016
                + (0.0511268 + (0.00053289 + (-0.000000440 + (-0.0000000176) * t) * t) * t) * t)
                * t)
            * ARCSEC_TO_RAD;

        let psib = (-0.041775
            + (5038.481484
                + (1.5584175 + (-0.00018522 + (-0.000026452 + (-0.0000000148) * t) * t) * t) * t)
                * t)
            * ARCSEC_TO_RAD;

        let epsa = iau_2006_mean_obliquity_centuries(t);

        (gamb, phib, psib, epsa)
    }

    /// `R1(-eps) · R3(-psi) · R1(phi) · R3(gamma)`.
    pub fn fw_angles_to_matrix(
        &self,
        gamb: f64,
        phib: f64,
        psib: f64,
        epsa: f64,
    ) -> RotationMatrix3 {
        let mut matrix = RotationMatrix3::identity();
        matrix.rotate_z(gamb);
        matrix.rotate_x(phib);
        matrix.rotate_z(-psib);
        matrix.rotate_x(-epsa);
        matrix
    }

    /// Bias-precession-nutation matrix for nutation `(dpsi, deps)` in radians.
    pub fn npb_matrix(&self, tt_centuries: f64, dpsi: f64, deps: f64) -> RotationMatrix3 {
        let (gamb, phib, psib, epsa) = self.fukushima_williams_angles(tt_centuries);
        self.fw_angles_to_matrix(gamb, phib, psib + dpsi, epsa + deps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD};
    use crate::test_helpers::{assert_rotation_matrix, assert_ulp_le};

    #[test]
    fn test_compute_returns_rotation_matrices() {
        let result = PrecessionIAU2006::new().compute(J2000_JD, 0.5 * DAYS_PER_JULIAN_CENTURY);
        assert_rotation_matrix(&result.bias_matrix, "bias");
        assert_rotation_matrix(&result.precession_matrix, "precession");
        assert_rotation_matrix(&result.bias_precession_matrix, "bias-precession");
    }

    #[test]
    fn test_bias_matrix_is_constant() {
        let p = PrecessionIAU2006::new();
        let r1 = p.compute(J2000_JD, 0.0);
        let r2 = p.compute(J2000_JD, DAYS_PER_JULIAN_CENTURY);
        assert_eq!(r1.bias_matrix, r2.bias_matrix);
    }

    #[test]
    fn test_precession_at_j2000_is_identity() {
        let result = PrecessionIAU2006::new().compute(J2000_JD, 0.0);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    assert!(
                        (result.precession_matrix.get(i, j) - 1.0).abs() < 1e-14,
                        "precession[{},{}] at t=0 should be ~1, got {}",
                        i,
                        j,
                        result.precession_matrix.get(i, j)
                    );
                } else {
                    assert!(
                        result.precession_matrix.get(i, j).abs() < 1e-15,
                        "precession[{},{}] at t=0 should be ~0, got {}",
                        i,
                        j,
                        result.precession_matrix.get(i, j)
                    );
                }
            }
        }
    }

    #[test]
    fn test_general_precession_rate() {
        // About 50.3 arcsec/yr in longitude: the equinox of J2100 sees a J2000
        // star on the equator at RA 0 move by roughly 46 arcsec/yr in RA.
        let result = PrecessionIAU2006::new().compute(J2000_JD, DAYS_PER_JULIAN_CENTURY);
        let v = result
            .precession_matrix
            .apply(&crate::Vector3::new(1.0, 0.0, 0.0));
        let (ra, _) = v.to_spherical();
        let ra_arcsec_per_year = ra / ARCSEC_TO_RAD / 100.0;
        assert!(
            (45.0..47.5).contains(&ra_arcsec_per_year),
            "unexpected RA precession rate {}",
            ra_arcsec_per_year
        );
    }

    #[test]
    fn test_fukushima_williams_angles_at_j2000() {
        let (gamb, phib, psib, epsa) = PrecessionIAU2006::new().fukushima_williams_angles(0.0);
        assert_ulp_le(gamb, -0.052928 * ARCSEC_TO_RAD, 1, "gamb at t=0");
        assert_ulp_le(phib, 84381.412819 * ARCSEC_TO_RAD, 1, "phib at t=0");
        assert_ulp_le(psib, -0.041775 * ARCSEC_TO_RAD, 1, "psib at t=0");
        assert_ulp_le(epsa, 84381.406 * ARCSEC_TO_RAD, 1, "epsa at t=0");
    }

    #[test]
    fn test_npb_matrix_with_zero_nutation() {
        let p = PrecessionIAU2006::new();
        let (gamb, phib, psib, epsa) = p.fukushima_williams_angles(0.5);
        let fw_matrix = p.fw_angles_to_matrix(gamb, phib, psib, epsa);
        assert_eq!(p.npb_matrix(0.5, 0.0, 0.0), fw_matrix);
    }
}
