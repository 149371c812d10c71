//! Reader for the fixed-column IERS `finals2000A` format.
//!
//! Only the Bulletin A columns are read:
//!
//! | Columns (1-based) | Field |
//! |-------------------|-------|
//! | 8-15 | MJD |
//! | 19-27 | polar motion x (arcsec) |
//! | 38-46 | polar motion y (arcsec) |
//! | 59-68 | UT1-UTC (s) |
//!
//! Lines whose required fields are blank (typically predictions past the end of
//! the UT1 series) are skipped.

use super::table::EopRecord;
use crate::TimeResult;
use celestial_core::AstroError;

pub fn parse_finals(content: &str) -> TimeResult<Vec<EopRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        match parse_finals_line(line) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if records.is_empty() {
        return Err(AstroError::data_error(
            "finals2000A",
            "parse_finals",
            "no valid records found",
        )
        .into());
    }
    if skipped > 0 {
        log::warn!(
            "skipped {} unparsable finals2000A line(s); kept {} records",
            skipped,
            records.len()
        );
    }

    records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
    Ok(records)
}

pub fn parse_finals_line(line: &str) -> Option<EopRecord> {
    if line.len() < 68 {
        return None;
    }

    let mjd = parse_field(line, 7, 15)?;
    let x_p = parse_field(line, 18, 27)?;
    let y_p = parse_field(line, 37, 46)?;
    let ut1_utc = parse_field(line, 58, 68)?;

    EopRecord::new(mjd, x_p, y_p, ut1_utc).ok()
}

fn parse_field(line: &str, start: usize, end: usize) -> Option<f64> {
    let s = line.get(start..end)?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}
