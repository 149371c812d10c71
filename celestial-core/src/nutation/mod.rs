//! Nutation: the short-period oscillation of the Earth's axis about its mean
//! position, superimposed on precession. The principal term has the 18.6-year
//! period of the lunar node and an amplitude of about 17 arcseconds in longitude
//! and 9 arcseconds in obliquity.
//!
//! Only the abridged IAU 2000B model is provided; it is accurate to about a
//! milliarcsecond, well inside the error budget of the apparent-place chain.
//!
//! ```
//! use celestial_core::nutation::NutationIAU2000B;
//!
//! let n = NutationIAU2000B::new().compute(2451545.0, 0.0);
//! assert!(n.delta_psi < 0.0);
//! ```

mod fundamental_args;
mod iau2000b;
mod lunisolar_terms;

pub use fundamental_args::DelaunayArgs;
pub use iau2000b::NutationIAU2000B;

/// Nutation in longitude and obliquity, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutationResult {
    pub delta_psi: f64,
    pub delta_eps: f64,
}
