//! Time scales for the apparent and observed place chain.
//!
//! The central type is [`Instant`]: one moment in time, built from a TAI or a
//! UTC Modified Julian Date, and readable as UTC, UT1, TT or TDB. Derived
//! readings are computed lazily and cached.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`instant`] | [`Instant`], the multi-scale time value |
//! | [`julian`] | Two-part Julian Dates |
//! | [`leap_seconds`] | UTC <-> TAI through the leap-second table |
//! | [`tdb`] | TDB - TT series |
//! | [`eop`] | UT1 - UTC from IERS `finals2000A` data |
//! | [`sidereal`] | Earth rotation angle and GMST |

pub mod eop;
pub mod instant;
pub mod julian;
pub mod leap_seconds;
pub mod sidereal;
pub mod tdb;

pub use eop::{EopRecord, EopTable};
pub use instant::Instant;
pub use julian::JulianDate;

use celestial_core::AstroError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimeError {
    /// Inconsistent or incomplete construction arguments.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error(transparent)]
    Core(#[from] AstroError),
}

pub type TimeResult<T> = Result<T, TimeError>;
