use crate::constants::ARCSEC_TO_RAD;
use crate::nutation::{DelaunayArgs, NutationIAU2000B};
use crate::utils::jd_to_centuries;

/// IAU 2006 mean obliquity of the ecliptic (radians) at a two-part TT Julian Date.
pub fn iau_2006_mean_obliquity(date1: f64, date2: f64) -> f64 {
    iau_2006_mean_obliquity_centuries(jd_to_centuries(date1, date2))
}

/// IAU 2006 mean obliquity for `t` Julian centuries TT since J2000.0.
pub fn iau_2006_mean_obliquity_centuries(t: f64) -> f64 {
    let obliquity_arcsec = 84381.406
        + (-46.836769
            + (-0.0001831 + (0.00200340 + (-0.000000576 + (-0.0000000434) * t) * t) * t) * t)
            * t;

    obliquity_arcsec * ARCSEC_TO_RAD
}

/// Equation of the equinoxes (radians): apparent minus mean sidereal time.
///
/// The nutation in longitude projected on the equator, plus the leading
/// complementary terms of the IERS 2003 series. Takes a two-part TT Julian Date;
/// using UTC instead moves the result by well under a microarcsecond.
pub fn equation_of_equinoxes(date1: f64, date2: f64) -> f64 {
    let t = jd_to_centuries(date1, date2);
    let nutation = NutationIAU2000B::new().compute(date1, date2);
    let epsa = iau_2006_mean_obliquity_centuries(t);

    nutation.delta_psi * libm::cos(epsa) + complementary_terms(t)
}

fn complementary_terms(t: f64) -> f64 {
    let om = t.moon_ascending_node_longitude();
    let f = t.mean_argument_of_latitude();
    let d = t.mean_elongation();
    let l = t.moon_mean_anomaly();
    let lp = t.sun_mean_anomaly();
    let f2d = 2.0 * f - 2.0 * d;

    let arcsec = 2640.96e-6 * libm::sin(om)
        + 63.52e-6 * libm::sin(2.0 * om)
        + 11.75e-6 * libm::sin(f2d + 3.0 * om)
        + 11.21e-6 * libm::sin(f2d + om)
        - 4.55e-6 * libm::sin(f2d + 2.0 * om)
        + 2.02e-6 * libm::sin(2.0 * f + 3.0 * om)
        + 1.98e-6 * libm::sin(2.0 * f + om)
        - 1.72e-6 * libm::sin(3.0 * om)
        - 1.41e-6 * libm::sin(lp + om)
        - 1.26e-6 * libm::sin(lp - om)
        - 0.63e-6 * libm::sin(l + om)
        - 0.63e-6 * libm::sin(l - om)
        - 0.87e-6 * t * libm::sin(om);

    arcsec * ARCSEC_TO_RAD
}
