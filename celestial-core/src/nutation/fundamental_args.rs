//! Delaunay fundamental arguments (IERS Conventions 2010, Table 5.2e).
//!
//! Implemented on `f64` holding Julian centuries TT since J2000.0, so a call
//! reads `t.moon_mean_anomaly()`. Results are radians in `[0, 2π)` up to sign.

use crate::constants::{ARCSEC_TO_RAD, CIRCULAR_ARCSECONDS};
use crate::math::fmod;

pub trait DelaunayArgs {
    /// l: mean anomaly of the Moon.
    fn moon_mean_anomaly(&self) -> f64;

    /// l': mean anomaly of the Sun.
    fn sun_mean_anomaly(&self) -> f64;

    /// F: mean longitude of the Moon minus that of its node.
    fn mean_argument_of_latitude(&self) -> f64;

    /// D: mean elongation of the Moon from the Sun.
    fn mean_elongation(&self) -> f64;

    /// Ω: mean longitude of the Moon's ascending node.
    fn moon_ascending_node_longitude(&self) -> f64;
}

impl DelaunayArgs for f64 {
    #[inline]
    fn moon_mean_anomaly(&self) -> f64 {
        let l = 485868.249036
            + self * (1717915923.2178 + self * (31.8792 + self * (0.051635 - self * 0.00024470)));
        fmod(l, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD
    }

    #[inline]
    fn sun_mean_anomaly(&self) -> f64 {
        let lp = 1287104.79305
            + self * (129596581.0481 + self * (-0.5532 + self * (0.000136 - self * 0.00001149)));
        fmod(lp, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD
    }

    #[inline]
    fn mean_argument_of_latitude(&self) -> f64 {
        let f = 335779.526232
            + self * (1739527262.8478 + self * (-12.7512 + self * (-0.001037 + self * 0.00000417)));
        fmod(f, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD
    }

    #[inline]
    fn mean_elongation(&self) -> f64 {
        let d = 1072260.70369
            + self * (1602961601.2090 + self * (-6.3706 + self * (0.006593 - self * 0.00003169)));
        fmod(d, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD
    }

    #[inline]
    fn moon_ascending_node_longitude(&self) -> f64 {
        let om = 450160.398036
            + self * (-6962890.5431 + self * (7.4722 + self * (0.007702 - self * 0.00005939)));
        fmod(om, CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ARCSEC_TO_RAD;

    #[test]
    fn test_values_at_j2000() {
        let t = 0.0_f64;
        assert_eq!(t.moon_mean_anomaly(), 485868.249036 * ARCSEC_TO_RAD);
        assert_eq!(t.sun_mean_anomaly(), 1287104.79305 * ARCSEC_TO_RAD);
        assert_eq!(t.mean_argument_of_latitude(), 335779.526232 * ARCSEC_TO_RAD);
        assert_eq!(t.mean_elongation(), 1072260.70369 * ARCSEC_TO_RAD);
        assert_eq!(t.moon_ascending_node_longitude(), 450160.398036 * ARCSEC_TO_RAD);
    }

    #[test]
    fn test_node_regresses() {
        // The node moves backwards by ~19.3 degrees per year.
        let om0 = 0.0_f64.moon_ascending_node_longitude();
        let om1 = 0.01_f64.moon_ascending_node_longitude();
        let per_year_deg = (om1 - om0).to_degrees();
        assert!((per_year_deg + 19.34).abs() < 0.05, "got {}", per_year_deg);
    }
}
