//! Mean, apparent and observed places of stars.
//!
//! Carries batches of catalog positions (ICRS, with optional proper motion,
//! parallax and radial velocity) to the geocentric apparent place of a date,
//! and on to the place observed from a site through the atmosphere. Every
//! step can be inverted.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pipeline`] | Batch transforms, degrees and `_rad` forms |
//! | [`apparent`] | Mean-to-apparent parameters and per-star corrections |
//! | [`observed`] | Apparent-to-observed parameters and per-star corrections |
//! | [`refraction`] | Refraction integral, coefficient fit, two-term model |
//! | [`horizon`] | Hour angle and declination to azimuth and elevation |
//! | [`solar`] | Position of the Sun, distance from the Sun |
//! | [`earth`] | Heliocentric and barycentric Earth position and velocity |
//! | [`site`] | Observatory location and weather |
//! | [`observation`] | Site plus time |
//! | [`batch`] | Star batches and length checks |
//!
//! # Example
//!
//! ```
//! use celestial_astrometry::{observed_from_icrs, ObservationContext, SpaceMotion};
//! use celestial_time::Instant;
//!
//! let ctx = ObservationContext::lsst(Instant::from_tai(60000.1)?);
//! let observed = observed_from_icrs(
//!     &[30.0, 31.0],
//!     &[-20.0, -21.0],
//!     &SpaceMotion::none(),
//!     &ctx,
//!     Some(2000.0),
//!     true,
//! )?;
//! assert_eq!(observed.len(), 2);
//! # Ok::<(), celestial_astrometry::AstrometryError>(())
//! ```

pub mod apparent;
pub mod batch;
pub mod earth;
pub mod errors;
pub mod horizon;
pub mod observation;
pub mod observed;
pub mod pipeline;
pub mod refraction;
pub mod site;
pub mod solar;

pub use batch::{check_lengths, AltAz, RaDec, SpaceMotion};
pub use errors::{AstrometryError, AstrometryResult};
pub use observation::ObservationContext;
pub use observed::ObservatoryParameters;
pub use pipeline::*;
pub use refraction::{apply_refraction, apply_refraction_batch, refraction_coefficients};
pub use site::Site;
pub use solar::{
    distance_to_sun, distance_to_sun_batch, distance_to_sun_batch_rad, distance_to_sun_rad,
    solar_ra_dec, solar_ra_dec_rad,
};
