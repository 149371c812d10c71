//! Geocentric apparent place to observed place, and back.
//!
//! [`ObservatoryParameters`] gathers everything that depends on the site and
//! the time but not on the star: the observer's latitude, the size of the
//! diurnal aberration, the refraction model and the local apparent sidereal
//! time. [`aopqk`] and [`oapqk`] then carry single stars across using it.
//!
//! Forward, a star goes apparent (α, δ) → hour angle → diurnal aberration →
//! topocentric azimuth and zenith distance → refraction → observed azimuth
//! and zenith distance → observed (h, δ) → observed α. The inverse undoes the
//! steps in the opposite order.
//!
//! Refraction uses the two-coefficient model up to ZD ≈ 76°, and switches to
//! iterating the rigorous integral beyond. Polar motion is carried through
//! the parameters but the pipeline always passes zero.
//!
//! # References
//!
//! - Wallace, P.T., SLALIB/PAL `sla_AOPPA`, `sla_AOPQK`, `sla_OAPQK`, `sla_GEOC`

use crate::errors::AstrometryResult;
use crate::observation::ObservationContext;
use crate::refraction::{refco, refro, refz, AtmosphericConditions, REFCO_PRECISION};
use celestial_core::constants::{
    AU_M_1976, IAU1976_EQUATORIAL_RADIUS_M, IAU1976_FLATTENING, SEC_TO_RAD, SIDEREAL_PER_SOLAR,
    SPEED_OF_LIGHT_AU_PER_DAY, TWOPI,
};
use celestial_core::math::wrap_0_2pi;
use celestial_core::obliquity::equation_of_equinoxes;
use celestial_core::Vector3;
use celestial_time::sidereal::gmst;
use celestial_time::JulianDate;

/// cos(76°): beyond this the rigorous refraction integral is used.
const ZBREAK: f64 = 0.242535625;

const REFRACTION_ITERATIONS: usize = 10;
const REFRACTION_TOLERANCE: f64 = 1e-10;
const REFRO_PRECISION: f64 = 1e-8;

/// Distance of a point from the spin axis and from the equator (AU), on the
/// IAU 1976 ellipsoid, for geodetic latitude `phi` and height `h` (m).
pub fn geoc(phi: f64, h: f64) -> (f64, f64) {
    let b = (1.0 - IAU1976_FLATTENING) * (1.0 - IAU1976_FLATTENING);
    let (sp, cp) = (libm::sin(phi), libm::cos(phi));
    let c = 1.0 / libm::sqrt(cp * cp + b * sp * sp);
    let s = b * c;
    let r = (IAU1976_EQUATORIAL_RADIUS_M * c + h) * cp / AU_M_1976;
    let z = (IAU1976_EQUATORIAL_RADIUS_M * s + h) * sp / AU_M_1976;
    (r, z)
}

/// Star-independent apparent-to-observed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservatoryParameters {
    /// Geodetic latitude, corrected for polar motion.
    pub latitude: f64,
    pub sin_latitude: f64,
    pub cos_latitude: f64,
    /// Diurnal aberration (radians) for a star on the equator.
    pub diurnal_aberration: f64,
    /// Conditions fed to the refraction model; pressure and humidity are zero
    /// when refraction is disabled.
    pub conditions: AtmosphericConditions,
    /// `A` of `Δζ = A tan ζ + B tan³ ζ`.
    pub refraction_a: f64,
    /// `B` of `Δζ = A tan ζ + B tan³ ζ`.
    pub refraction_b: f64,
    /// Longitude + equation of the equinoxes + sidereal UT1-UTC.
    pub longitude_term: f64,
    pub local_sidereal_time: f64,
}

impl ObservatoryParameters {
    /// Parameters for a UTC MJD with UT1-UTC `dut1` (s), east longitude and
    /// polar motion `(x_p, y_p)` (radians). The latitude and the weather come
    /// from `conditions`.
    pub fn aoppa(
        utc_mjd: f64,
        dut1: f64,
        longitude: f64,
        polar_motion: (f64, f64),
        conditions: AtmosphericConditions,
    ) -> AstrometryResult<Self> {
        let (xp, yp) = polar_motion;

        let cphim = libm::cos(conditions.latitude);
        let xt = libm::cos(longitude) * cphim;
        let yt = libm::sin(longitude) * cphim;
        let zt = libm::sin(conditions.latitude);
        let xc = xt - xp * zt;
        let yc = yt + yp * zt;
        let zc = xp * xt - yp * yt + zt;

        let elong = if xc == 0.0 && yc == 0.0 {
            0.0
        } else {
            libm::atan2(yc, xc)
        };
        let phi = libm::atan2(zc, libm::sqrt(xc * xc + yc * yc));

        let (uau, _) = geoc(phi, conditions.height);
        let diurnal_aberration = TWOPI * uau * SIDEREAL_PER_SOLAR / SPEED_OF_LIGHT_AU_PER_DAY;

        let conditions = AtmosphericConditions {
            latitude: phi,
            ..conditions
        };
        let (refraction_a, refraction_b) = refco(&conditions, REFCO_PRECISION);

        let utc = JulianDate::from_mjd(utc_mjd);
        let longitude_term = elong
            + equation_of_equinoxes(utc.jd1(), utc.jd2())
            + SIDEREAL_PER_SOLAR * dut1 * SEC_TO_RAD;
        let local_sidereal_time = gmst(utc, utc)? + longitude_term;

        Ok(Self {
            latitude: phi,
            sin_latitude: libm::sin(phi),
            cos_latitude: libm::cos(phi),
            diurnal_aberration,
            conditions,
            refraction_a,
            refraction_b,
            longitude_term,
            local_sidereal_time,
        })
    }

    /// Parameters for an observation context. Needs both the site and the time.
    ///
    /// With `include_refraction` off, pressure and humidity are zeroed, which
    /// makes both refraction coefficients exactly zero.
    pub fn build(
        ctx: &ObservationContext,
        wavelength: f64,
        include_refraction: bool,
    ) -> AstrometryResult<Self> {
        Self::build_for("ObservatoryParameters::build", ctx, wavelength, include_refraction)
    }

    pub(crate) fn build_for(
        operation: &'static str,
        ctx: &ObservationContext,
        wavelength: f64,
        include_refraction: bool,
    ) -> AstrometryResult<Self> {
        let site = ctx.site(operation)?;
        let mjd = ctx.mjd(operation)?;

        log::debug!(
            "building observatory parameters for {} at {} (refraction {}, {} µm)",
            site.name(),
            mjd,
            if include_refraction { "on" } else { "off" },
            wavelength
        );

        let mut conditions = AtmosphericConditions::for_site(site, wavelength);
        if !include_refraction {
            conditions = conditions.without_atmosphere();
        }

        Self::aoppa(
            mjd.utc()?,
            mjd.dut1()?,
            site.longitude(),
            (0.0, 0.0),
            conditions,
        )
    }

    /// Converts a unit vector in the `(-h, δ)` frame to `(x, y, z)` with x
    /// toward the south horizon, y east and z to the zenith.
    fn to_horizon(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            self.sin_latitude * v.x - self.cos_latitude * v.z,
            v.y,
            self.cos_latitude * v.x + self.sin_latitude * v.z,
        )
    }

    fn from_horizon(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            self.sin_latitude * v.x + self.cos_latitude * v.z,
            v.y,
            -self.cos_latitude * v.x + self.sin_latitude * v.z,
        )
    }
}

/// Observed place of one star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedPlace {
    /// Azimuth, north through east, `[0, 2π)`.
    pub azimuth: f64,
    pub zenith_distance: f64,
    pub hour_angle: f64,
    pub dec: f64,
    pub ra: f64,
}

fn apply_diurnal_aberration(v: &Vector3, diurab: f64) -> Vector3 {
    let f = 1.0 - diurab * v.y;
    Vector3::new(f * v.x, f * (v.y + diurab), f * v.z)
}

/// Geocentric apparent (α, δ) to observed place.
pub fn aopqk(rap: f64, dap: f64, params: &ObservatoryParameters) -> ObservedPlace {
    let st = params.local_sidereal_time;

    let v = Vector3::from_spherical(rap - st, dap);
    let aberrated = apply_diurnal_aberration(&v, params.diurnal_aberration);
    let aet = params.to_horizon(&aberrated);

    let azobs = if aet.x == 0.0 && aet.y == 0.0 {
        0.0
    } else {
        libm::atan2(aet.y, -aet.x)
    };

    let zdt = libm::atan2(libm::sqrt(aet.x * aet.x + aet.y * aet.y), aet.z);

    let mut zdobs = refz(zdt, params.refraction_a, params.refraction_b);

    if libm::cos(zdobs) < ZBREAK {
        let mut dzd: f64 = 1e1;
        let mut i = 0;
        while dzd.abs() > REFRACTION_TOLERANCE && i < REFRACTION_ITERATIONS {
            let refraction = refro(zdobs, &params.conditions, REFRO_PRECISION);
            dzd = zdobs + refraction - zdt;
            zdobs -= dzd;
            i += 1;
        }
    }

    let cez = libm::sin(zdobs);
    let aeo = Vector3::new(-libm::cos(azobs) * cez, libm::sin(azobs) * cez, libm::cos(zdobs));
    let (hmobs, dcobs) = params.from_horizon(&aeo).to_spherical();

    ObservedPlace {
        azimuth: wrap_0_2pi(azobs),
        zenith_distance: zdobs,
        hour_angle: -hmobs,
        dec: dcobs,
        ra: wrap_0_2pi(st + hmobs),
    }
}

/// Observed (α, δ) to geocentric apparent (α, δ).
pub fn oapqk(rob: f64, dob: f64, params: &ObservatoryParameters) -> (f64, f64) {
    let st = params.local_sidereal_time;

    let v = Vector3::from_spherical(-(st - rob), dob);
    let aeo = params.to_horizon(&v);

    let az = if aeo.x != 0.0 || aeo.y != 0.0 {
        libm::atan2(aeo.y, aeo.x)
    } else {
        0.0
    };

    let sz = libm::sqrt(aeo.x * aeo.x + aeo.y * aeo.y);
    let zdo = libm::atan2(sz, aeo.z);

    let dref = if aeo.z >= ZBREAK {
        let tz = sz / aeo.z;
        (params.refraction_a + params.refraction_b * tz * tz) * tz
    } else {
        refro(zdo, &params.conditions, REFRO_PRECISION)
    };
    let zdt = zdo + dref;

    let (sin_zdt, cos_zdt) = (libm::sin(zdt), libm::cos(zdt));
    let aet = Vector3::new(libm::cos(az) * sin_zdt, libm::sin(az) * sin_zdt, cos_zdt);
    let mhdt = params.from_horizon(&aet);

    let v = apply_diurnal_aberration(&mhdt, -params.diurnal_aberration);
    let (hmpda, dap) = v.to_spherical();

    (wrap_0_2pi(st + hmpda), dap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Site;
    use approx::assert_abs_diff_eq;
    use celestial_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, MILLIARCSEC_TO_RAD};
    use celestial_core::math::haversine;
    use celestial_time::Instant;

    fn lsst_params(include_refraction: bool) -> ObservatoryParameters {
        let ctx = ObservationContext::lsst(Instant::from_utc(60000.2).unwrap());
        ObservatoryParameters::build(&ctx, 0.5, include_refraction).unwrap()
    }

    #[test]
    fn test_geoc_equator_and_pole() {
        let (r, z) = geoc(0.0, 0.0);
        assert_abs_diff_eq!(r * AU_M_1976, IAU1976_EQUATORIAL_RADIUS_M, epsilon = 1e-6);
        assert_eq!(z, 0.0);

        let (r, z) = geoc(std::f64::consts::FRAC_PI_2, 0.0);
        assert!(r.abs() < 1e-20);
        let polar_radius = IAU1976_EQUATORIAL_RADIUS_M * (1.0 - IAU1976_FLATTENING);
        assert_abs_diff_eq!(z * AU_M_1976, polar_radius, epsilon = 1e-6);
    }

    #[test]
    fn test_diurnal_aberration_size() {
        let params = lsst_params(true);
        // 0.32" on the equator, scaled by cos(latitude).
        let expected = 0.3200 * libm::cos(params.latitude);
        let actual = params.diurnal_aberration / ARCSEC_TO_RAD;
        assert!((actual - expected).abs() < 0.003, "{}\" vs {}\"", actual, expected);
    }

    #[test]
    fn test_missing_context() {
        let ctx = ObservationContext::new().with_site(Site::lsst());
        let err = ObservatoryParameters::build(&ctx, 0.5, true).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_no_refraction_zeroes_coefficients() {
        let params = lsst_params(false);
        assert_eq!(params.refraction_a, 0.0);
        assert_eq!(params.refraction_b, 0.0);
        assert_eq!(params.conditions.pressure, 0.0);
        let with = lsst_params(true);
        assert!(with.refraction_a > 0.0);
        assert_eq!(with.local_sidereal_time, params.local_sidereal_time);
    }

    #[test]
    fn test_star_at_lst_transits() {
        let params = lsst_params(false);
        let dec = -50.0 * DEG_TO_RAD;
        let place = aopqk(params.local_sidereal_time, dec, &params);
        // On the meridian south of the zenith (site is at -30°).
        assert_abs_diff_eq!(place.azimuth, std::f64::consts::PI, epsilon = 1e-5);
        assert_abs_diff_eq!(
            place.zenith_distance,
            params.latitude - dec,
            epsilon = 2.0 * params.diurnal_aberration
        );
        assert!(place.hour_angle.abs() < 1e-5);
    }

    #[test]
    fn test_refraction_raises_stars() {
        let dry = lsst_params(false);
        let wet = lsst_params(true);
        let ra = wet.local_sidereal_time + 0.7;
        let a = aopqk(ra, -0.2, &dry);
        let b = aopqk(ra, -0.2, &wet);
        assert!(b.zenith_distance < a.zenith_distance);
        let lift = (a.zenith_distance - b.zenith_distance) / ARCSEC_TO_RAD;
        let expected = wet.refraction_a / ARCSEC_TO_RAD * libm::tan(a.zenith_distance);
        assert!((lift - expected).abs() < 0.5, "lift {} expected {}", lift, expected);
    }

    #[test]
    fn test_round_trip_below_75_degrees() {
        for include_refraction in [false, true] {
            let params = lsst_params(include_refraction);
            let st = params.local_sidereal_time;
            for (dha, dec) in [(0.0, -30.0), (0.8, -10.0), (-1.2, -70.0), (1.8, -70.0)] {
                let (ra, dec) = (wrap_0_2pi(st - dha), dec * DEG_TO_RAD);
                let place = aopqk(ra, dec, &params);
                assert!(place.zenith_distance < 75.0 * DEG_TO_RAD);
                let (ra_back, dec_back) = oapqk(place.ra, place.dec, &params);
                let err = haversine(ra, dec, ra_back, dec_back);
                assert!(
                    err < 1.0 * MILLIARCSEC_TO_RAD,
                    "round trip error {} mas (refraction {})",
                    err / MILLIARCSEC_TO_RAD,
                    include_refraction
                );
            }
        }
    }

    #[test]
    fn test_rigorous_branch_near_horizon() {
        let params = lsst_params(true);
        let st = params.local_sidereal_time;
        // Hour angle chosen to put the star around 81° ZD.
        let place = aopqk(wrap_0_2pi(st - 1.45), -5.0 * DEG_TO_RAD, &params);
        assert!(libm::cos(place.zenith_distance) < ZBREAK);
        let (ra_back, dec_back) = oapqk(place.ra, place.dec, &params);
        let err = haversine(wrap_0_2pi(st - 1.45), -5.0 * DEG_TO_RAD, ra_back, dec_back);
        assert!(err < 10.0 * MILLIARCSEC_TO_RAD, "{} mas", err / MILLIARCSEC_TO_RAD);
    }
}
