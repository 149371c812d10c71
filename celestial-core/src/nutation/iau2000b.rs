//! IAU 2000B nutation model.
//!
//! A truncation of IAU 2000A for work where milliarcsecond precision suffices:
//! the 77 largest luni-solar terms, no planetary terms, and fixed offsets that
//! stand in for the omitted planetary effects:
//!
//! - Longitude (Δψ): -0.135 milliarcseconds
//! - Obliquity (Δε): +0.388 milliarcseconds
//!
//! The Delaunay arguments are the linear (first-order) forms used by the
//! published 2000B model rather than the full polynomials.
//!
//! # References
//!
//! - McCarthy, D. D. & Luzum, B. J., "An Abridged Model of the Precession-Nutation
//!   of the Celestial Pole", Celestial Mechanics and Dynamical Astronomy, 2003
//! - IERS Conventions (2010), Chapter 5

use super::lunisolar_terms::{AMPLITUDE_UNIT_ARCSEC, LUNISOLAR_TERMS};
use super::NutationResult;
use crate::constants::{ARCSEC_TO_RAD, CIRCULAR_ARCSECONDS, MILLIARCSEC_TO_RAD, TWOPI};
use crate::math::fmod;
use crate::utils::jd_to_centuries;

const PLANETARY_BIAS_LONGITUDE: f64 = -0.135 * MILLIARCSEC_TO_RAD;
const PLANETARY_BIAS_OBLIQUITY: f64 = 0.388 * MILLIARCSEC_TO_RAD;

#[derive(Debug, Default, Clone, Copy)]
pub struct NutationIAU2000B;

impl NutationIAU2000B {
    pub fn new() -> Self {
        Self
    }

    /// Nutation at a two-part TT Julian Date.
    pub fn compute(&self, jd1: f64, jd2: f64) -> NutationResult {
        let t = jd_to_centuries(jd1, jd2);
        let (dpsi, deps) = self.compute_lunisolar(t);

        NutationResult {
            delta_psi: dpsi + PLANETARY_BIAS_LONGITUDE,
            delta_eps: deps + PLANETARY_BIAS_OBLIQUITY,
        }
    }

    fn compute_lunisolar(&self, t: f64) -> (f64, f64) {
        let el = fmod(485868.249036 + 1717915923.2178 * t, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;
        let elp = fmod(1287104.79305 + 129596581.0481 * t, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;
        let f = fmod(335779.526232 + 1739527262.8478 * t, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;
        let d = fmod(1072260.70369 + 1602961601.2090 * t, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;
        let om = fmod(450160.398036 - 6962890.5431 * t, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;

        let mut dpsi: f64 = 0.0;
        let mut deps: f64 = 0.0;

        // Smallest terms first.
        for &(nl, nlp, nf, nd, nom, sp, spt, cp, ce, cet, se) in LUNISOLAR_TERMS.iter().rev() {
            let arg = fmod(
                (nl as f64) * el
                    + (nlp as f64) * elp
                    + (nf as f64) * f
                    + (nd as f64) * d
                    + (nom as f64) * om,
                TWOPI,
            );
            let (sarg, carg) = libm::sincos(arg);

            dpsi += (sp + spt * t) * sarg + cp * carg;
            deps += (ce + cet * t) * carg + se * sarg;
        }

        let unit = AMPLITUDE_UNIT_ARCSEC * ARCSEC_TO_RAD;
        (dpsi * unit, deps * unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ARCSEC_TO_RAD, J2000_JD};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_j2000_values() {
        // IAU 2000B at J2000.0: dpsi ≈ -13.9 arcsec, deps ≈ -5.8 arcsec.
        let n = NutationIAU2000B::new().compute(J2000_JD, 0.0);
        let dpsi = n.delta_psi / ARCSEC_TO_RAD;
        let deps = n.delta_eps / ARCSEC_TO_RAD;
        assert!((dpsi + 13.93).abs() < 0.05, "dpsi = {}", dpsi);
        assert!((deps + 5.77).abs() < 0.05, "deps = {}", deps);
    }

    #[test]
    fn test_matches_erfa_nut00b() {
        let n = NutationIAU2000B::new().compute(2400000.5, 53736.0);
        assert_abs_diff_eq!(n.delta_psi, -0.9632552291148362783e-5, epsilon = 1e-13);
        assert_abs_diff_eq!(n.delta_eps, 0.4063197106621159367e-4, epsilon = 1e-13);
    }

    #[test]
    fn test_amplitude_bounded() {
        let model = NutationIAU2000B::new();
        for k in 0..200 {
            let n = model.compute(J2000_JD, k as f64 * 37.0);
            assert!(n.delta_psi.abs() < 20.0 * ARCSEC_TO_RAD);
            assert!(n.delta_eps.abs() < 11.0 * ARCSEC_TO_RAD);
        }
    }

    #[test]
    fn test_dominant_period_is_nodal() {
        // Half a nodal period (9.3 yr) flips the sign of the main term.
        let model = NutationIAU2000B::new();
        let a = model.compute(J2000_JD, 0.0).delta_eps;
        let b = model.compute(J2000_JD, 6798.38 / 2.0).delta_eps;
        assert!(a * b < 0.0);
    }
}
