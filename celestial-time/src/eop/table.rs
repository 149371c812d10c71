use crate::TimeResult;
use celestial_core::AstroError;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Largest spacing between records that is still interpolated across.
pub const DEFAULT_MAX_GAP_DAYS: f64 = 5.0;

static EMPTY_TABLE: Lazy<Arc<EopTable>> = Lazy::new(|| Arc::new(EopTable::empty()));

/// One daily Earth orientation record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EopRecord {
    /// UTC MJD of the record.
    pub mjd: f64,
    /// Polar motion x (arcsec).
    pub x_p: f64,
    /// Polar motion y (arcsec).
    pub y_p: f64,
    /// UT1 - UTC (seconds).
    pub ut1_utc: f64,
}

impl EopRecord {
    pub fn new(mjd: f64, x_p: f64, y_p: f64, ut1_utc: f64) -> TimeResult<Self> {
        if !mjd.is_finite() || !ut1_utc.is_finite() {
            return Err(AstroError::data_error(
                "EOP record",
                "new",
                &format!("non-finite values at MJD {}", mjd),
            )
            .into());
        }
        if ut1_utc.abs() > 1.0 {
            return Err(AstroError::data_error(
                "EOP record",
                "new",
                &format!("UT1-UTC of {} s at MJD {} exceeds 1 s", ut1_utc, mjd),
            )
            .into());
        }
        Ok(Self {
            mjd,
            x_p,
            y_p,
            ut1_utc,
        })
    }
}

/// Sorted EOP records with linear interpolation.
#[derive(Debug, Clone)]
pub struct EopTable {
    records: Vec<EopRecord>,
    max_gap_days: f64,
}

impl Default for EopTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl EopTable {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            max_gap_days: DEFAULT_MAX_GAP_DAYS,
        }
    }

    /// The shared empty table every [`Instant`](crate::Instant) starts with.
    pub fn shared_empty() -> Arc<Self> {
        Arc::clone(&EMPTY_TABLE)
    }

    pub fn from_records(mut records: Vec<EopRecord>) -> Self {
        records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        Self {
            records,
            max_gap_days: DEFAULT_MAX_GAP_DAYS,
        }
    }

    /// Parses the text of an IERS `finals2000A` file.
    pub fn from_finals(content: &str) -> TimeResult<Self> {
        Ok(Self::from_records(super::parse_finals(content)?))
    }

    pub fn with_max_gap(mut self, max_gap_days: f64) -> Self {
        self.max_gap_days = max_gap_days;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(first, last)` MJD covered, if any.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.records.first()?.mjd, self.records.last()?.mjd))
    }

    /// UT1 - UTC in seconds at a UTC MJD, or `None` outside the table or
    /// across a gap wider than the configured maximum.
    pub fn ut1_utc(&self, mjd: f64) -> Option<f64> {
        let (before, after) = self.bracket(mjd)?;
        let r1 = &self.records[before];
        let r2 = &self.records[after];

        if before == after {
            return Some(r1.ut1_utc);
        }
        if r2.mjd - r1.mjd > self.max_gap_days {
            return None;
        }

        let t = (mjd - r1.mjd) / (r2.mjd - r1.mjd);
        Some(r1.ut1_utc + t * (r2.ut1_utc - r1.ut1_utc))
    }

    fn bracket(&self, mjd: f64) -> Option<(usize, usize)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        if !(first.mjd..=last.mjd).contains(&mjd) {
            return None;
        }

        let idx = self.records.partition_point(|r| r.mjd <= mjd);
        // idx >= 1 because records[0].mjd <= mjd.
        let before = idx - 1;
        if self.records[before].mjd == mjd || idx == self.records.len() {
            Some((before, before))
        } else {
            Some((before, idx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn table() -> EopTable {
        EopTable::from_records(vec![
            EopRecord::new(60002.0, 0.0, 0.0, -0.010).unwrap(),
            EopRecord::new(60000.0, 0.0, 0.0, 0.010).unwrap(),
            EopRecord::new(60001.0, 0.0, 0.0, 0.000).unwrap(),
            EopRecord::new(60020.0, 0.0, 0.0, 0.100).unwrap(),
        ])
    }

    #[test]
    fn test_sorted_and_range() {
        let t = table();
        assert_eq!(t.len(), 4);
        assert_eq!(t.range(), Some((60000.0, 60020.0)));
    }

    #[test]
    fn test_linear_interpolation() {
        let t = table();
        assert_abs_diff_eq!(t.ut1_utc(60000.25).unwrap(), 0.0075, epsilon = 1e-15);
        assert_abs_diff_eq!(t.ut1_utc(60001.5).unwrap(), -0.005, epsilon = 1e-15);
        assert_eq!(t.ut1_utc(60001.0), Some(0.0));
        assert_eq!(t.ut1_utc(60020.0), Some(0.1));
    }

    #[test]
    fn test_outside_or_across_gap() {
        let t = table();
        assert_eq!(t.ut1_utc(59999.9), None);
        assert_eq!(t.ut1_utc(60020.1), None);
        assert_eq!(t.ut1_utc(60010.0), None);
        assert!(t.clone().with_max_gap(30.0).ut1_utc(60010.0).is_some());
        assert_eq!(EopTable::empty().ut1_utc(60000.0), None);
    }

    #[test]
    fn test_record_validation() {
        assert!(EopRecord::new(f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(EopRecord::new(60000.0, 0.0, 0.0, 1.5).is_err());
    }

    #[test]
    fn test_shared_empty_is_shared() {
        let a = EopTable::shared_empty();
        let b = EopTable::shared_empty();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is_empty());
    }
}
