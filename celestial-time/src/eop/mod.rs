//! Earth orientation parameters.
//!
//! The crate ships no IERS data. Callers load a `finals2000A` file (or build
//! records by hand) into an [`EopTable`] and attach it to an
//! [`Instant`](crate::Instant). Dates outside the table fall back to
//! UT1 = UTC with a warning.

mod parse;
mod table;

pub use parse::{parse_finals, parse_finals_line};
pub use table::{EopRecord, EopTable, DEFAULT_MAX_GAP_DAYS};
