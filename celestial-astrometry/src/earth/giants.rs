//! The Sun's displacement from the solar-system barycentre.
//!
//! Jupiter, Saturn, Uranus and Neptune carry nearly all of it. Each planet
//! follows mean Keplerian elements with linear rates (Standish, "Keplerian
//! Elements for Approximate Positions of the Major Planets", 1800-2050 fit),
//! and the Sun sits opposite their mass-weighted heliocentric positions.
//! The result is good to about 2e-5 AU.

use celestial_core::constants::{DEG_TO_RAD, J2000_OBLIQUITY_RAD};
use celestial_core::math::wrap_pm_pi;
use celestial_core::{RotationMatrix3, Vector3};

const KEPLER_ITERATIONS: usize = 6;

/// Mean elements at J2000.0 and their rates per Julian century. Angles in
/// degrees, semi-major axis in AU.
struct Orbit {
    semi_major_axis: [f64; 2],
    eccentricity: [f64; 2],
    inclination: [f64; 2],
    mean_longitude: [f64; 2],
    perihelion_longitude: [f64; 2],
    node_longitude: [f64; 2],
    /// Solar mass over planetary mass (planet plus satellites).
    mass_ratio: f64,
}

#[rustfmt::skip]
const GIANTS: [Orbit; 4] = [
    Orbit {
        semi_major_axis: [5.20288700, -0.00011607],
        eccentricity: [0.04838624, -0.00013253],
        inclination: [1.30439695, -0.00183714],
        mean_longitude: [34.39644051, 3034.74612775],
        perihelion_longitude: [14.72847983, 0.21252668],
        node_longitude: [100.47390909, 0.20469106],
        mass_ratio: 1047.3486,
    },
    Orbit {
        semi_major_axis: [9.53667594, -0.00125060],
        eccentricity: [0.05386179, -0.00050991],
        inclination: [2.48599187, 0.00193609],
        mean_longitude: [49.95424423, 1222.49362201],
        perihelion_longitude: [92.59887831, -0.41897216],
        node_longitude: [113.66242448, -0.28867794],
        mass_ratio: 3497.898,
    },
    Orbit {
        semi_major_axis: [19.18916464, -0.00196176],
        eccentricity: [0.04725744, -0.00004397],
        inclination: [0.77263783, -0.00242939],
        mean_longitude: [313.23810451, 428.48202785],
        perihelion_longitude: [170.95427630, 0.40805281],
        node_longitude: [74.01692503, 0.04240589],
        mass_ratio: 22902.98,
    },
    Orbit {
        semi_major_axis: [30.06992276, 0.00026291],
        eccentricity: [0.00859048, 0.00005105],
        inclination: [1.77004347, 0.00035372],
        mean_longitude: [-55.12002969, 218.45945325],
        perihelion_longitude: [44.96476227, -0.32241464],
        node_longitude: [131.78422574, -0.00508664],
        mass_ratio: 19412.24,
    },
];

impl Orbit {
    /// Heliocentric position (AU) on the mean ecliptic and equinox of J2000.
    fn position(&self, t: f64) -> Vector3 {
        let at = |element: [f64; 2]| element[0] + element[1] * t;

        let a = at(self.semi_major_axis);
        let e = at(self.eccentricity);
        let inclination = at(self.inclination) * DEG_TO_RAD;
        let perihelion = at(self.perihelion_longitude) * DEG_TO_RAD;
        let node = at(self.node_longitude) * DEG_TO_RAD;
        let mean_anomaly = wrap_pm_pi(at(self.mean_longitude) * DEG_TO_RAD - perihelion);

        let big_e = eccentric_anomaly(mean_anomaly, e);
        let x = a * (libm::cos(big_e) - e);
        let y = a * libm::sqrt(1.0 - e * e) * libm::sin(big_e);

        let (sin_w, cos_w) = libm::sincos(perihelion - node);
        let (sin_n, cos_n) = libm::sincos(node);
        let (sin_i, cos_i) = libm::sincos(inclination);

        Vector3::new(
            (cos_w * cos_n - sin_w * sin_n * cos_i) * x
                - (sin_w * cos_n + cos_w * sin_n * cos_i) * y,
            (cos_w * sin_n + sin_w * cos_n * cos_i) * x
                - (sin_w * sin_n - cos_w * cos_n * cos_i) * y,
            sin_w * sin_i * x + cos_w * sin_i * y,
        )
    }
}

fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let mut big_e = mean_anomaly + e * libm::sin(mean_anomaly);
    for _ in 0..KEPLER_ITERATIONS {
        big_e -= (big_e - e * libm::sin(big_e) - mean_anomaly) / (1.0 - e * libm::cos(big_e));
    }
    big_e
}

/// Barycentric position of the Sun (AU) at `t` Julian centuries TDB from
/// J2000.0, on the J2000 mean equator. The frame bias is below the model's
/// precision at this scale.
pub fn solar_offset(t: f64) -> Vector3 {
    let total_mass = 1.0 + GIANTS.iter().map(|p| 1.0 / p.mass_ratio).sum::<f64>();

    let weighted = GIANTS
        .iter()
        .fold(Vector3::zeros(), |sum, p| sum + p.position(t) / p.mass_ratio);

    let mut to_equator = RotationMatrix3::identity();
    to_equator.rotate_x(-J2000_OBLIQUITY_RAD);
    -(to_equator.apply(&weighted) / total_mass)
}
