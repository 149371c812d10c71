//! TDB - TT for a geocentric observer.
//!
//! The difference is periodic, dominated by a 1.66 ms annual term from the
//! eccentricity of the Earth's orbit. The series below is the leading part of
//! the Fairhead & Bretagnon (1990) expansion as tabulated by SOFA/ERFA `dtdb`:
//! every term above 0.37 µs at `T^0`, the main `T^1` and `T^2` terms, and the
//! Jupiter/Saturn corrections of the `wj` group. The topocentric terms vanish
//! for a geocentric observer and are omitted. Truncation error is a few
//! microseconds, far below what the apparent-place chain can resolve.
//!
//! # References
//!
//! - Fairhead, L. & Bretagnon, P. (1990), A&A 229, 240-247
//! - IERS Conventions (2010), Chapter 10

use celestial_core::utils::jd_to_millennia;

/// `(amplitude seconds, frequency rad per millennium, phase rad)`.
#[rustfmt::skip]
const FAIRHD_T0: [(f64, f64, f64); 20] = [
    (1656.674564e-6, 6283.075849991, 6.240054195),
    (22.417471e-6, 5753.384884897, 4.296977442),
    (13.839792e-6, 12566.151699983, 6.196904410),
    (4.770086e-6, 529.690965095, 0.444401603),
    (4.676740e-6, 6069.776754553, 4.021195093),
    (2.256707e-6, 213.299095438, 5.543113262),
    (1.694205e-6, -3.523118349, 5.025132748),
    (1.554905e-6, 77713.771467920, 5.198467090),
    (1.276839e-6, 7860.419392439, 5.988822341),
    (1.193379e-6, 5223.693919802, 3.649823730),
    (1.115322e-6, 3930.209696220, 1.422745069),
    (0.794185e-6, 11506.769769794, 2.322313077),
    (0.600309e-6, 1577.343542448, 2.678271909),
    (0.496817e-6, 6208.294251424, 5.696701824),
    (0.486306e-6, 5884.926846583, 0.520007179),
    (0.468597e-6, 6244.942814354, 5.866398759),
    (0.447061e-6, 26.298319800, 3.615796498),
    (0.435206e-6, -398.149003408, 4.349338347),
    (0.432392e-6, 74.781598567, 2.435898309),
    (0.375510e-6, 5507.553238667, 4.103476804),
];

#[rustfmt::skip]
const FAIRHD_T1: [(f64, f64, f64); 6] = [
    (102.156724e-6, 6283.075849991, 4.249032005),
    (1.706807e-6, 12566.151699983, 4.205904248),
    (0.269668e-6, 213.299095438, 3.400290479),
    (0.265919e-6, 529.690965095, 5.836047367),
    (0.210568e-6, -3.523118349, 6.262738348),
    (0.077996e-6, 5223.693919802, 4.670344204),
];

#[rustfmt::skip]
const FAIRHD_T2: [(f64, f64, f64); 1] = [
    (4.322990e-6, 6283.075849991, 2.642893748),
];

fn sum_series(terms: &[(f64, f64, f64)], t: f64) -> f64 {
    terms
        .iter()
        .rev()
        .map(|&(amplitude, frequency, phase)| amplitude * libm::sin(frequency * t + phase))
        .sum()
}

/// TDB - TT in seconds at a two-part TT (or TDB) Julian Date.
pub fn tdb_minus_tt(date1: f64, date2: f64) -> f64 {
    let t = jd_to_millennia(date1, date2);

    let w0 = sum_series(&FAIRHD_T0, t);
    let w1 = sum_series(&FAIRHD_T1, t);
    let w2 = sum_series(&FAIRHD_T2, t);
    let wf = t * (t * w2 + w1) + w0;

    let wj = 0.00065e-6 * libm::sin(6069.776754 * t + 4.021194)
        + 0.00033e-6 * libm::sin(213.299095 * t + 5.543132)
        - 0.00196e-6 * libm::sin(6208.294251 * t + 5.696701)
        - 0.00173e-6 * libm::sin(74.781599 * t + 2.435900)
        + 0.03638e-6 * t * t;

    wf + wj
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestial_core::constants::J2000_JD;

    #[test]
    fn test_bounded_by_annual_term() {
        for k in 0..400 {
            let dt = tdb_minus_tt(J2000_JD, k as f64 * 9.13);
            assert!(dt.abs() < 1.75e-3, "TDB-TT = {} s", dt);
        }
    }

    #[test]
    fn test_j2000_value() {
        // Early January sits just past the zero crossing of the annual term.
        let dt = tdb_minus_tt(J2000_JD, 0.0);
        assert!(dt < 0.0 && dt > -2e-4, "TDB-TT = {} s", dt);
    }

    #[test]
    fn test_annual_oscillation() {
        // Extremes near early April and early October, half a year apart.
        let spring = tdb_minus_tt(J2000_JD, 95.0);
        let autumn = tdb_minus_tt(J2000_JD, 278.0);
        assert!(spring > 1.5e-3, "spring {}", spring);
        assert!(autumn < -1.5e-3, "autumn {}", autumn);
    }
}
