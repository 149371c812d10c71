//! Atmospheric refraction.
//!
//! [`refro`] integrates the refraction integral through a two-layer model
//! atmosphere (Hohenkerk & Sinclair 1985): a troposphere with a constant
//! temperature lapse rate up to 11 km, then an isothermal stratosphere up to
//! 80 km. Simpson's rule is applied in each layer, doubling the strip count
//! until successive estimates agree.
//!
//! [`refco`] fits `Δζ = A tan ζ + B tan³ ζ` to the rigorous integral at
//! ζ = 45° and ζ ≈ 76°, and [`refz`] turns an unrefracted zenith distance into
//! a refracted one using that fit, blending in an empirical high-ZD model past
//! 83°.
//!
//! The fit is good to a few milliarcseconds below 70° ZD and degrades rapidly
//! beyond about 76°; nothing here checks for that.
//!
//! # References
//!
//! - Hohenkerk, C.Y. & Sinclair, A.T. (1985), NAO Technical Note 63
//! - Seidelmann, P.K. (ed.), Explanatory Supplement (1992), §3.281
//! - Wallace, P.T., SLALIB `sla_REFRO`, `sla_REFCO`, `sla_REFZ`

use crate::errors::{AstrometryError, AstrometryResult};
use crate::site::Site;
use celestial_core::constants::RAD_TO_DEG;
use celestial_core::math::wrap_pm_pi;

/// 93° in radians.
const D93: f64 = 1.623156204;
/// Universal gas constant.
const GCR: f64 = 8314.32;
/// Molecular weight of dry air.
const DMD: f64 = 28.9644;
/// Molecular weight of water vapour.
const DMW: f64 = 18.0152;
/// Mean Earth radius (m).
const EARTH_RADIUS: f64 = 6378120.0;
/// Exponent of temperature dependence of water vapour pressure.
const DELTA: f64 = 18.36;
/// Height of the tropopause (m).
const TROPOPAUSE: f64 = 11000.0;
/// Upper limit of the refracting atmosphere (m).
const STRATOSPHERE_LIMIT: f64 = 80000.0;
/// Maximum number of Simpson strips per layer.
const MAX_STRIPS: usize = 16384;

/// Precision requested from [`refco`] when building coefficients.
pub const REFCO_PRECISION: f64 = 1e-10;

/// Meteorological and geographic inputs to the refraction integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericConditions {
    /// Observer height above sea level (m).
    pub height: f64,
    /// Ambient temperature (K).
    pub temperature: f64,
    /// Pressure (mbar). Zero means no atmosphere.
    pub pressure: f64,
    /// Relative humidity (0-1).
    pub humidity: f64,
    /// Effective wavelength (µm). Above 100 µm the radio formulae apply.
    pub wavelength: f64,
    /// Observer latitude (radians, geodetic is close enough).
    pub latitude: f64,
    /// Tropospheric lapse rate (K/m).
    pub lapse_rate: f64,
}

impl AtmosphericConditions {
    pub fn for_site(site: &Site, wavelength: f64) -> Self {
        Self {
            height: site.height(),
            temperature: site.temperature_kelvin(),
            pressure: site.pressure(),
            humidity: site.humidity(),
            wavelength,
            latitude: site.latitude(),
            lapse_rate: site.lapse_rate(),
        }
    }

    /// The same conditions with the atmosphere removed.
    pub fn without_atmosphere(self) -> Self {
        Self {
            pressure: 0.0,
            humidity: 0.0,
            ..self
        }
    }
}

/// Model atmosphere, set up from the conditions at the observer.
struct ModelAtmosphere {
    r0: f64,
    t0: f64,
    alpha: f64,
    gamal: f64,
    gamm2: f64,
    delm2: f64,
    c1: f64,
    c2: f64,
    c3: f64,
    c4: f64,
    c5: f64,
    c6: f64,
}

/// Refractive index and `r dn/dr` at one radius.
#[derive(Clone, Copy)]
struct Layer {
    dn: f64,
    rdndr: f64,
}

impl Layer {
    fn integrand(&self) -> f64 {
        self.rdndr / (self.dn + self.rdndr)
    }
}

impl ModelAtmosphere {
    fn new(conditions: &AtmosphericConditions) -> Self {
        let height = conditions.height.clamp(-1e3, STRATOSPHERE_LIMIT);
        let t0 = conditions.temperature.clamp(100.0, 500.0);
        let pressure = conditions.pressure.clamp(0.0, 10000.0);
        let humidity = conditions.humidity.clamp(0.0, 1.0);
        let wavelength = conditions.wavelength.max(0.1);
        let alpha = conditions.lapse_rate.abs().clamp(0.001, 0.01);

        let optical = wavelength <= 100.0;

        let wlsq = wavelength * wavelength;
        let gb = 9.784 * (1.0 - 0.0026 * libm::cos(2.0 * conditions.latitude) - 0.00000028 * height);
        let a = if optical {
            (287.6155 + (1.62887 + 0.01360 / wlsq) / wlsq) * 273.15e-6 / 1013.25
        } else {
            77.6890e-6
        };
        let gamal = (gb * DMD) / GCR;
        let gamma = gamal / alpha;
        let tdc = t0 - 273.15;
        let psat = libm::pow(10.0, (0.7859 + 0.03477 * tdc) / (1.0 + 0.00412 * tdc))
            * (1.0 + pressure * (4.5e-6 + 6e-10 * tdc * tdc));
        let pwo = if pressure > 0.0 {
            humidity * psat / (1.0 - (1.0 - humidity) * psat / pressure)
        } else {
            0.0
        };
        let w = pwo * (1.0 - DMW / DMD) * gamma / (DELTA - gamma);
        let c1 = a * (pressure + w) / t0;
        let c2 = if optical {
            (a * w + 11.2684e-6 * pwo) / t0
        } else {
            (a * w + 6.3938e-6 * pwo) / t0
        };
        let c3 = (gamma - 1.0) * alpha * c1 / t0;
        let c4 = (DELTA - 1.0) * alpha * c2 / t0;
        let (c5, c6) = if optical {
            (0.0, 0.0)
        } else {
            let c5 = 375463e-6 * pwo / t0;
            (c5, c5 * (DELTA - 2.0) * alpha / (t0 * t0))
        };

        Self {
            r0: EARTH_RADIUS + height,
            t0,
            alpha,
            gamal,
            gamm2: gamma - 2.0,
            delm2: DELTA - 2.0,
            c1,
            c2,
            c3,
            c4,
            c5,
            c6,
        }
    }

    /// Troposphere at radius `r`; also returns the temperature there.
    fn troposphere(&self, r: f64) -> (f64, Layer) {
        let t = (self.t0 - self.alpha * (r - self.r0)).clamp(100.0, 320.0);
        let tt0 = t / self.t0;
        let tt0gm2 = libm::pow(tt0, self.gamm2);
        let tt0dm2 = libm::pow(tt0, self.delm2);
        let dn = 1.0 + (self.c1 * tt0gm2 - (self.c2 - self.c5 / t) * tt0dm2) * tt0;
        let rdndr = r * (-self.c3 * tt0gm2 + (self.c4 - self.c6 / tt0) * tt0dm2);
        (t, Layer { dn, rdndr })
    }

    /// Stratosphere at radius `r`, above a tropopause at `rt`.
    fn stratosphere(&self, rt: f64, tt: f64, dnt: f64, r: f64) -> Layer {
        let b = self.gamal / tt;
        let w = (dnt - 1.0) * libm::exp(-b * (r - rt));
        Layer {
            dn: 1.0 + w,
            rdndr: -r * b * w,
        }
    }
}

fn zenith_angle(sine: f64) -> f64 {
    libm::atan2(sine, libm::sqrt((1.0 - sine * sine).max(0.0)))
}

/// Refraction (radians) for an observed zenith distance `zobs`, integrated to
/// precision `eps` (radians).
pub fn refro(zobs: f64, conditions: &AtmosphericConditions, eps: f64) -> f64 {
    let zobs1 = wrap_pm_pi(zobs);
    let zobs2 = zobs1.abs().min(D93);
    let tol = eps.abs().clamp(1e-12, 0.1) / 2.0;

    let atm = ModelAtmosphere::new(conditions);
    let r0 = atm.r0;

    let (_, observer) = atm.troposphere(r0);
    let sk0 = observer.dn * r0 * libm::sin(zobs2);
    let f0 = observer.integrand();

    let rt = EARTH_RADIUS + TROPOPAUSE.max(r0 - EARTH_RADIUS);
    let (tt, tropopause) = atm.troposphere(rt);
    let dnt = tropopause.dn;
    let zt = zenith_angle(sk0 / (rt * dnt));
    let ft = tropopause.integrand();

    let tropopause_strat = atm.stratosphere(rt, tt, dnt, rt);
    let zts = zenith_angle(sk0 / (rt * tropopause_strat.dn));
    let fts = tropopause_strat.integrand();

    let rs = EARTH_RADIUS + STRATOSPHERE_LIMIT;
    let limit = atm.stratosphere(rt, tt, dnt, rs);
    let zs = zenith_angle(sk0 / (rs * limit.dn));
    let fs = limit.integrand();

    let layer_at = |troposphere: bool, r: f64| {
        if troposphere {
            atm.troposphere(r).1
        } else {
            atm.stratosphere(rt, tt, dnt, r)
        }
    };

    let mut total = 0.0;
    for troposphere in [true, false] {
        let (z0, zrange, fb, ff, r_start) = if troposphere {
            (zobs2, zt - zobs2, f0, ft, r0)
        } else {
            (zts, zs - zts, fts, fs, rt)
        };

        let mut refold = 1.0;
        let mut strips = 8usize;
        let mut fo = 0.0;
        let mut fe = 0.0;
        let mut step = 1usize;

        let refp = loop {
            let h = zrange / strips as f64;
            let mut r = r_start;

            for i in (1..strips).step_by(step) {
                let sz = libm::sin(z0 + h * i as f64);

                if sz > 1e-20 {
                    // Radius at this zenith angle, to the nearest metre.
                    let w = sk0 / sz;
                    let mut rg = r;
                    let mut dr: f64 = 1e6;
                    let mut j = 0;
                    while dr.abs() > 1.0 && j < 4 {
                        j += 1;
                        let layer = layer_at(troposphere, rg);
                        dr = (rg * layer.dn - w) / (layer.dn + layer.rdndr);
                        rg -= dr;
                    }
                    r = rg;
                }

                let f = layer_at(troposphere, r).integrand();
                if step == 1 && i % 2 == 0 {
                    fe += f;
                } else {
                    fo += f;
                }
            }

            let refp = h * (fb + 4.0 * fo + 2.0 * fe + ff) / 3.0;

            if (refp - refold).abs() > tol && strips < MAX_STRIPS {
                refold = refp;
                strips += strips;
                fe += fo;
                fo = 0.0;
                step = 2;
            } else {
                if strips >= MAX_STRIPS && (refp - refold).abs() > tol {
                    log::debug!(
                        "refraction integral stopped at {} strips, last change {:.3e} rad",
                        strips,
                        (refp - refold).abs()
                    );
                }
                break refp;
            }
        };

        total += refp;
    }

    if zobs1 < 0.0 {
        -total
    } else {
        total
    }
}

/// Coefficients `(A, B)` of `Δζ = A tan ζ + B tan³ ζ`, fitted to [`refro`].
pub fn refco(conditions: &AtmosphericConditions, eps: f64) -> (f64, f64) {
    const ATN1: f64 = 0.7853981633974483;
    const ATN4: f64 = 1.325817663668033;

    let r1 = refro(ATN1, conditions, eps);
    let r2 = refro(ATN4, conditions, eps);

    ((64.0 * r1 - r2) / 60.0, (r2 - 4.0 * r1) / 60.0)
}

/// Refracted zenith distance for an unrefracted (in vacuo) one.
pub fn refz(zu: f64, refa: f64, refb: f64) -> f64 {
    const C1: f64 = 0.55445;
    const C2: f64 = -0.01133;
    const C3: f64 = 0.00202;
    const C4: f64 = 0.28385;
    const C5: f64 = 0.02390;

    let z83 = 83.0 / RAD_TO_DEG;
    let ref83 = (C1 + C2 * 7.0 + C3 * 49.0) / (1.0 + C4 * 7.0 + C5 * 49.0);

    let zu1 = zu.min(z83);

    let mut zl = zu1;
    let (s, c) = (libm::sin(zl), libm::cos(zl));
    let t = s / c;
    let tsq = t * t;
    let tcu = t * tsq;
    zl -= (refa * t + refb * tcu) / (1.0 + (refa + 3.0 * refb * tsq) / (c * c));

    let (s, c) = (libm::sin(zl), libm::cos(zl));
    let t = s / c;
    let tsq = t * t;
    let tcu = t * tsq;
    let mut refraction = zu1 - zl
        + (zl - zu1 + refa * t + refb * tcu) / (1.0 + (refa + 3.0 * refb * tsq) / (c * c));

    if zu > zu1 {
        let e = 90.0 - (zu * RAD_TO_DEG).min(93.0);
        let e2 = e * e;
        refraction = (refraction / ref83) * (C1 + C2 * e + C3 * e2) / (1.0 + C4 * e + C5 * e2);
    }

    zu - refraction
}

/// Refraction coefficients `(tan_z, tan3_z)` for a site at a wavelength (µm).
///
/// The site's geodetic latitude stands in for the astronomical latitude.
pub fn refraction_coefficients(
    wavelength: f64,
    site: Option<&Site>,
) -> AstrometryResult<(f64, f64)> {
    let site =
        site.ok_or_else(|| AstrometryError::missing_context("refraction_coefficients", "a site"))?;
    Ok(refco(
        &AtmosphericConditions::for_site(site, wavelength),
        REFCO_PRECISION,
    ))
}

/// Refracted zenith distance (radians) from the in vacuo one.
pub fn apply_refraction(zenith_distance: f64, tan_z: f64, tan3_z: f64) -> f64 {
    refz(zenith_distance, tan_z, tan3_z)
}

pub fn apply_refraction_batch(zenith_distances: &[f64], tan_z: f64, tan3_z: f64) -> Vec<f64> {
    zenith_distances
        .iter()
        .map(|&zd| refz(zd, tan_z, tan3_z))
        .collect()
}
