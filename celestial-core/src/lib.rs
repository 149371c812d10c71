//! Numerical building blocks for the astrometry crates.
//!
//! `celestial-core` carries the frame-independent pieces of the apparent and
//! observed place chain: vectors and rotation matrices, the IAU 2006 precession
//! model, IAU 2000B nutation, the mean obliquity and the equation of the
//! equinoxes. Everything is pure Rust and stateless.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`matrix`] | 3×3 rotation matrices and 3D vectors |
//! | [`precession`] | IAU 2006 precession (Fukushima-Williams angles) |
//! | [`nutation`] | IAU 2000B nutation |
//! | [`obliquity`] | Mean obliquity (IAU 2006), equation of the equinoxes |
//! | [`math`] | Angle wrapping, haversine separation |
//! | [`constants`] | Epochs, unit conversions, physical constants |
//! | [`errors`] | [`AstroError`] and [`AstroResult`] |
//!
//! Functions taking `(jd1, jd2)` accept a two-part Julian Date; the split
//! preserves precision. All angles are radians.

pub mod constants;
pub mod errors;
pub mod math;
pub mod matrix;
pub mod nutation;
pub mod obliquity;
pub mod precession;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use matrix::{RotationMatrix3, Vector3};
