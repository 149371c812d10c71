use celestial_core::math::wrap_0_2pi;

/// Hour angle and declination to azimuth (north through east, `[0, 2π)`) and
/// elevation, for an observer at latitude `phi`. All radians.
pub fn de2h(ha: f64, dec: f64, phi: f64) -> (f64, f64) {
    let (sh, ch) = (libm::sin(ha), libm::cos(ha));
    let (sd, cd) = (libm::sin(dec), libm::cos(dec));
    let (sp, cp) = (libm::sin(phi), libm::cos(phi));

    let x = -ch * cd * sp + sd * cp;
    let y = -sh * cd;
    let z = ch * cd * cp + sd * sp;

    let r = libm::sqrt(x * x + y * y);
    let az = if r == 0.0 { 0.0 } else { libm::atan2(y, x) };

    (wrap_0_2pi(az), libm::atan2(z, r))
}
