//! A single instant, readable in every time scale the astrometry chain needs.
//!
//! An [`Instant`] is built from exactly one source reading, TAI or UTC, given
//! as a Modified Julian Date. The TAI reading is fixed at construction and is
//! what equality compares. Every other reading (UTC, UT1, UT1-UTC, TT, TDB) is
//! computed on first access and cached for the lifetime of the value; the
//! caches are `OnceLock`s, so an `Instant` can be shared across threads and a
//! reading is never recomputed or changed.
//!
//! | Reading | Derivation |
//! |---------|------------|
//! | UTC | TAI minus the leap-second table (iterative inverse) |
//! | UT1 | UTC + (UT1-UTC) from the attached [`EopTable`] |
//! | TT | TAI + 32.184 s |
//! | TDB | TT + (TDB-TT) from the geocentric Fairhead-Bretagnon series |
//!
//! When the UTC date lies outside the attached EOP table, UT1-UTC is taken as
//! zero and a warning is logged; this degrades accuracy but is not an error.
//!
//! ```
//! use celestial_time::Instant;
//!
//! let t = Instant::from_utc(51544.5).unwrap();
//! assert!((t.tai() - 51544.5 - 32.0 / 86400.0).abs() < 1e-10);
//! assert!((t.tt() - t.tai() - 32.184 / 86400.0).abs() < 1e-10);
//! ```

use crate::eop::EopTable;
use crate::julian::JulianDate;
use crate::leap_seconds::{tai_to_utc, utc_to_tai};
use crate::tdb::tdb_minus_tt;
use crate::{TimeError, TimeResult};
use celestial_core::constants::{SECONDS_PER_DAY_F64, TT_MINUS_TAI_SECONDS};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// MJD range accepted by the constructors (years -4712 to ~2.7 million).
const MJD_MIN: f64 = -2_468_569.0;
const MJD_MAX: f64 = 1e9 - 2_400_001.0;

#[derive(Debug, Clone)]
pub struct Instant {
    tai: f64,
    utc: OnceLock<f64>,
    ut1: OnceLock<f64>,
    dut1: OnceLock<f64>,
    tt: OnceLock<f64>,
    tdb: OnceLock<f64>,
    eop: Arc<EopTable>,
}

impl Instant {
    /// Builds an instant from exactly one of a TAI or a UTC MJD.
    ///
    /// Passing both or neither is a configuration error.
    pub fn new(tai: Option<f64>, utc: Option<f64>) -> TimeResult<Self> {
        match (tai, utc) {
            (Some(tai), None) => Self::from_tai(tai),
            (None, Some(utc)) => Self::from_utc(utc),
            (Some(_), Some(_)) => Err(TimeError::Configuration(
                "give either a TAI or a UTC reading, not both".to_string(),
            )),
            (None, None) => Err(TimeError::Configuration(
                "a TAI or a UTC reading is required".to_string(),
            )),
        }
    }

    pub fn from_tai(mjd: f64) -> TimeResult<Self> {
        validate_mjd("TAI", mjd)?;
        Ok(Self::with_tai(mjd, OnceLock::new()))
    }

    pub fn from_utc(mjd: f64) -> TimeResult<Self> {
        validate_mjd("UTC", mjd)?;
        let tai = utc_to_tai(JulianDate::from_mjd(mjd))?.to_mjd();
        Ok(Self::with_tai(tai, OnceLock::from(mjd)))
    }

    fn with_tai(tai: f64, utc: OnceLock<f64>) -> Self {
        Self {
            tai,
            utc,
            ut1: OnceLock::new(),
            dut1: OnceLock::new(),
            tt: OnceLock::new(),
            tdb: OnceLock::new(),
            eop: EopTable::shared_empty(),
        }
    }

    /// Attaches an EOP table used for UT1. Any cached UT1 reading is dropped.
    pub fn with_eop(mut self, eop: Arc<EopTable>) -> Self {
        self.eop = eop;
        self.ut1 = OnceLock::new();
        self.dut1 = OnceLock::new();
        self
    }

    pub fn eop(&self) -> &Arc<EopTable> {
        &self.eop
    }

    pub fn tai(&self) -> f64 {
        self.tai
    }

    pub fn utc(&self) -> TimeResult<f64> {
        cached(&self.utc, || {
            Ok(tai_to_utc(JulianDate::from_mjd(self.tai))?.to_mjd())
        })
    }

    /// UT1 - UTC in seconds.
    pub fn dut1(&self) -> TimeResult<f64> {
        cached(&self.dut1, || {
            let utc = self.utc()?;
            Ok(match self.eop.ut1_utc(utc) {
                Some(dut1) => dut1,
                None => {
                    log::warn!(
                        "MJD {:.5} UTC is outside the EOP table ({}); using UT1 = UTC",
                        utc,
                        describe_range(&self.eop)
                    );
                    0.0
                }
            })
        })
    }

    pub fn ut1(&self) -> TimeResult<f64> {
        cached(&self.ut1, || {
            Ok(self.utc()? + self.dut1()? / SECONDS_PER_DAY_F64)
        })
    }

    pub fn tt(&self) -> f64 {
        *self
            .tt
            .get_or_init(|| self.tai + TT_MINUS_TAI_SECONDS / SECONDS_PER_DAY_F64)
    }

    pub fn tdb(&self) -> f64 {
        *self.tdb.get_or_init(|| {
            let tt = self.tt();
            let jd = JulianDate::from_mjd(tt);
            tt + tdb_minus_tt(jd.jd1(), jd.jd2()) / SECONDS_PER_DAY_F64
        })
    }
}

fn cached(cell: &OnceLock<f64>, compute: impl FnOnce() -> TimeResult<f64>) -> TimeResult<f64> {
    if let Some(value) = cell.get() {
        return Ok(*value);
    }
    let value = compute()?;
    Ok(*cell.get_or_init(|| value))
}

fn validate_mjd(scale: &str, mjd: f64) -> TimeResult<()> {
    if !mjd.is_finite() || !(MJD_MIN..=MJD_MAX).contains(&mjd) {
        return Err(TimeError::ConversionError(format!(
            "{} MJD {} is outside the supported range",
            scale, mjd
        )));
    }
    Ok(())
}

fn describe_range(eop: &EopTable) -> String {
    match eop.range() {
        Some((first, last)) => format!("MJD {:.1} to {:.1}", first, last),
        None => "no records".to_string(),
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.tai == other.tai
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MJD {:.9} TAI", self.tai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eop::EopRecord;
    use approx::assert_abs_diff_eq;

    // An f64 MJD near 60000 resolves about 7e-12 days.
    const ROUND_TRIP_DAYS: f64 = 1e-9;

    #[test]
    fn test_exactly_one_source() {
        assert!(matches!(
            Instant::new(None, None),
            Err(TimeError::Configuration(_))
        ));
        assert!(matches!(
            Instant::new(Some(59000.0), Some(59000.0)),
            Err(TimeError::Configuration(_))
        ));
        assert!(Instant::new(Some(59000.0), None).is_ok());
        assert!(Instant::new(None, Some(59000.0)).is_ok());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Instant::from_tai(f64::NAN).is_err());
        assert!(Instant::from_utc(f64::INFINITY).is_err());
    }

    #[test]
    fn test_tai_utc_round_trip() {
        for tai in [41317.0, 51544.5, 57754.5, 59580.123456, 61000.9] {
            let a = Instant::from_tai(tai).unwrap();
            let b = Instant::from_utc(a.utc().unwrap()).unwrap();
            assert_abs_diff_eq!(b.tai(), tai, epsilon = ROUND_TRIP_DAYS);
        }
    }

    #[test]
    fn test_equality_across_source_scales() {
        let from_utc = Instant::from_utc(59000.25).unwrap();
        let from_tai = Instant::from_tai(from_utc.tai()).unwrap();
        assert_eq!(from_utc, from_tai);
        assert_ne!(from_tai, Instant::from_tai(59000.25).unwrap());
    }

    #[test]
    fn test_tt_and_tdb() {
        let t = Instant::from_tai(60000.0).unwrap();
        assert_abs_diff_eq!(
            (t.tt() - t.tai()) * SECONDS_PER_DAY_F64,
            32.184,
            epsilon = 1e-5
        );
        assert!(((t.tdb() - t.tt()) * SECONDS_PER_DAY_F64).abs() < 2e-3);
    }

    #[test]
    fn test_ut1_fallback_without_eop() {
        let t = Instant::from_utc(60000.0).unwrap();
        assert_eq!(t.dut1().unwrap(), 0.0);
        assert_eq!(t.ut1().unwrap(), t.utc().unwrap());
    }

    #[test]
    fn test_ut1_from_eop_table() {
        let table = EopTable::from_records(vec![
            EopRecord::new(59999.0, 0.0, 0.0, -0.1).unwrap(),
            EopRecord::new(60001.0, 0.0, 0.0, -0.2).unwrap(),
        ]);
        let t = Instant::from_utc(60000.0).unwrap().with_eop(Arc::new(table));
        assert_abs_diff_eq!(t.dut1().unwrap(), -0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(
            (t.ut1().unwrap() - t.utc().unwrap()) * SECONDS_PER_DAY_F64,
            -0.15,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_readings_are_cached() {
        let t = Instant::from_tai(60000.0).unwrap();
        let first = t.tdb();
        assert_eq!(t.tdb(), first);
        let clone = t.clone();
        assert_eq!(clone.tdb(), first);
    }

    #[test]
    fn test_display() {
        let t = Instant::from_tai(60000.5).unwrap();
        assert_eq!(t.to_string(), "MJD 60000.500000000 TAI");
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Instant>();
    }
}
