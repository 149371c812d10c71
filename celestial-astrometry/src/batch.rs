//! Star batches and their length checks.
//!
//! Every transform takes right ascension and declination as two parallel
//! slices and returns a [`RaDec`] with the same layout. Optional per-star data
//! (proper motion, parallax, radial velocity) travels in a [`SpaceMotion`].
//! Arrays are never truncated or broadcast: a length mismatch anywhere is a
//! [`LengthMismatch`](AstrometryError::LengthMismatch) error.

use crate::errors::{AstrometryError, AstrometryResult};
use celestial_core::constants::{ARCSEC_TO_RAD, DEG_TO_RAD, RAD_TO_DEG};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Equatorial positions, RA in row 0 and Dec in row 1.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RaDec {
    pub ra: Vec<f64>,
    pub dec: Vec<f64>,
}

impl RaDec {
    pub fn new(ra: Vec<f64>, dec: Vec<f64>) -> AstrometryResult<Self> {
        if ra.len() != dec.len() {
            return Err(AstrometryError::length_mismatch(
                "RaDec::new",
                &[(ra.len(), "RAs"), (dec.len(), "Decs")],
            ));
        }
        Ok(Self { ra, dec })
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            ra: Vec::with_capacity(n),
            dec: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, ra: f64, dec: f64) {
        self.ra.push(ra);
        self.dec.push(dec);
    }

    pub fn len(&self) -> usize {
        self.ra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ra.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ra.iter().copied().zip(self.dec.iter().copied())
    }

    pub fn to_degrees(&self) -> Self {
        Self {
            ra: scale(&self.ra, RAD_TO_DEG),
            dec: scale(&self.dec, RAD_TO_DEG),
        }
    }

    pub fn to_radians(&self) -> Self {
        Self {
            ra: scale(&self.ra, DEG_TO_RAD),
            dec: scale(&self.dec, DEG_TO_RAD),
        }
    }
}

/// Horizon coordinates: altitude and azimuth (north through east).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AltAz {
    pub alt: Vec<f64>,
    pub az: Vec<f64>,
}

impl AltAz {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            alt: Vec::with_capacity(n),
            az: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, alt: f64, az: f64) {
        self.alt.push(alt);
        self.az.push(az);
    }

    pub fn len(&self) -> usize {
        self.alt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alt.is_empty()
    }

    pub fn to_degrees(&self) -> Self {
        Self {
            alt: scale(&self.alt, RAD_TO_DEG),
            az: scale(&self.az, RAD_TO_DEG),
        }
    }
}

/// Optional space motion for a batch.
///
/// `pm_ra` is the coordinate-angle rate (already multiplied by cos δ). The
/// degree-facing transforms read proper motion in arcsec/yr and parallax in
/// arcsec; the `_rad` transforms read rad/yr and radians. Radial velocity is
/// always km/s, positive receding. Absent members count as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceMotion<'a> {
    pub pm_ra: Option<&'a [f64]>,
    pub pm_dec: Option<&'a [f64]>,
    pub parallax: Option<&'a [f64]>,
    pub v_rad: Option<&'a [f64]>,
}

impl<'a> SpaceMotion<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_proper_motion(mut self, pm_ra: &'a [f64], pm_dec: &'a [f64]) -> Self {
        self.pm_ra = Some(pm_ra);
        self.pm_dec = Some(pm_dec);
        self
    }

    pub fn with_parallax(mut self, parallax: &'a [f64]) -> Self {
        self.parallax = Some(parallax);
        self
    }

    pub fn with_radial_velocity(mut self, v_rad: &'a [f64]) -> Self {
        self.v_rad = Some(v_rad);
        self
    }

    fn labelled(&self) -> [(Option<&'a [f64]>, &'static str); 4] {
        [
            (self.pm_ra, "pm_ras"),
            (self.pm_dec, "pm_decs"),
            (self.parallax, "parallaxes"),
            (self.v_rad, "v_rads"),
        ]
    }

    /// Owned copy with absent members zero-filled to `n`.
    pub(crate) fn resolve(&self, n: usize) -> ResolvedMotion {
        let fill = |values: Option<&[f64]>| values.map_or_else(|| vec![0.0; n], <[f64]>::to_vec);
        ResolvedMotion {
            pm_ra: fill(self.pm_ra),
            pm_dec: fill(self.pm_dec),
            parallax: fill(self.parallax),
            v_rad: fill(self.v_rad),
        }
    }
}

/// Zero-filled space motion, one entry per star.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedMotion {
    pub pm_ra: Vec<f64>,
    pub pm_dec: Vec<f64>,
    pub parallax: Vec<f64>,
    pub v_rad: Vec<f64>,
}

impl ResolvedMotion {
    /// Converts the angular members from arcsec (per year) to radians.
    pub fn arcsec_to_radians(mut self) -> Self {
        for values in [&mut self.pm_ra, &mut self.pm_dec, &mut self.parallax] {
            values.iter_mut().for_each(|v| *v *= ARCSEC_TO_RAD);
        }
        self
    }

    pub fn as_motion(&self) -> SpaceMotion<'_> {
        SpaceMotion {
            pm_ra: Some(&self.pm_ra),
            pm_dec: Some(&self.pm_dec),
            parallax: Some(&self.parallax),
            v_rad: Some(&self.v_rad),
        }
    }
}

/// Checks that Dec and every supplied motion array match the RA count.
pub fn check_lengths(
    operation: &'static str,
    ra: &[f64],
    dec: &[f64],
    motion: Option<&SpaceMotion<'_>>,
) -> AstrometryResult<usize> {
    let n = ra.len();
    let mut counts = vec![(n, "RAs"), (dec.len(), "Decs")];
    if let Some(motion) = motion {
        counts.extend(
            motion
                .labelled()
                .iter()
                .filter_map(|(values, label)| values.map(|v| (v.len(), *label))),
        );
    }

    if counts.iter().any(|(count, _)| *count != n) {
        return Err(AstrometryError::length_mismatch(operation, &counts));
    }
    Ok(n)
}

pub(crate) fn scale(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_radec_requires_equal_rows() {
        let err = RaDec::new(vec![0.0; 5], vec![0.0; 4]).unwrap_err();
        assert_eq!(err.to_string(), "RaDec::new: 5 RAs, 4 Decs");
    }

    #[test]
    fn test_unit_conversion() {
        let deg = RaDec::new(vec![180.0, 90.0], vec![-45.0, 0.0]).unwrap();
        let rad = deg.to_radians();
        assert_abs_diff_eq!(rad.ra[0], std::f64::consts::PI, epsilon = 1e-15);
        let back = rad.to_degrees();
        for ((a, b), (c, d)) in back.iter().zip(deg.iter()) {
            assert_abs_diff_eq!(a, c, epsilon = 1e-12);
            assert_abs_diff_eq!(b, d, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_check_lengths_lists_supplied_arrays() {
        let ra = [0.0; 3];
        let dec = [0.0; 3];
        let pm = [0.0; 2];
        let motion = SpaceMotion::none().with_proper_motion(&pm, &pm);
        let err = check_lengths("app_geo_from_icrs", &ra, &dec, Some(&motion)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "app_geo_from_icrs: 3 RAs, 3 Decs, 2 pm_ras, 2 pm_decs"
        );

        assert_eq!(check_lengths("x", &ra, &dec, None).unwrap(), 3);
        let px = [0.0; 3];
        let motion = SpaceMotion::none().with_parallax(&px);
        assert_eq!(check_lengths("x", &ra, &dec, Some(&motion)).unwrap(), 3);
    }

    #[test]
    fn test_resolve_fills_zeros_and_converts() {
        let px = [0.5, 1.0];
        let resolved = SpaceMotion::none()
            .with_parallax(&px)
            .resolve(2)
            .arcsec_to_radians();
        assert_eq!(resolved.pm_ra, vec![0.0, 0.0]);
        assert_eq!(resolved.v_rad, vec![0.0, 0.0]);
        assert_abs_diff_eq!(resolved.parallax[1], ARCSEC_TO_RAD, epsilon = 1e-20);
    }
}
