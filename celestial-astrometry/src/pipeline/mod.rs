//! Batch frame transforms between mean (ICRS), geocentric apparent and
//! observed places.
//!
//! Every stage comes as a radians core (suffix `_rad`) and a degrees shim.
//! Each call builds its star-independent parameter block once and reuses it
//! for the whole batch.
//!
//! ```text
//!   ICRS ──app_geo_from_icrs──▶ apparent ──observed_from_app_geo──▶ observed
//!   ICRS ◀──icrs_from_app_geo── apparent ◀──app_geo_from_observed── observed
//! ```
//!
//! [`observed_from_icrs`] and [`icrs_from_observed`] run both stages in one go.
//!
//! Accuracy caveats: ICRS to observed is good to a few tens of mas only more
//! than 45° from the Sun and below 75° zenith distance. Refraction is not
//! reliable beyond about 76°.

mod chain;
mod geocentric;
mod precession;
mod topocentric;

pub use chain::{
    icrs_from_observed, icrs_from_observed_rad, observed_from_icrs, observed_from_icrs_rad,
};
pub use geocentric::{
    app_geo_from_icrs, app_geo_from_icrs_rad, icrs_from_app_geo, icrs_from_app_geo_rad,
};
pub use precession::{
    apply_precession, apply_precession_rad, apply_proper_motion, apply_proper_motion_rad,
};
pub use topocentric::{
    app_geo_from_observed, app_geo_from_observed_rad, observed_from_app_geo,
    observed_from_app_geo_alt_az, observed_from_app_geo_alt_az_rad, observed_from_app_geo_rad,
};

/// Julian epoch of the mean catalog equator and equinox.
pub const DEFAULT_EPOCH: f64 = 2000.0;

/// Effective wavelength for refraction, in microns.
pub const DEFAULT_WAVELENGTH_MICRONS: f64 = 0.5;

/// Options for the apparent-to-observed stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservedOptions {
    pub include_refraction: bool,
    /// Microns.
    pub wavelength: f64,
}

impl ObservedOptions {
    pub fn without_refraction() -> Self {
        Self {
            include_refraction: false,
            ..Self::default()
        }
    }

    pub fn with_wavelength(mut self, wavelength: f64) -> Self {
        self.wavelength = wavelength;
        self
    }
}

impl Default for ObservedOptions {
    fn default() -> Self {
        Self {
            include_refraction: true,
            wavelength: DEFAULT_WAVELENGTH_MICRONS,
        }
    }
}
