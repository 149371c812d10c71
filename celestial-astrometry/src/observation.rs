use crate::errors::{AstrometryError, AstrometryResult};
use crate::site::Site;
use celestial_time::Instant;

/// Where and when an observation is made.
///
/// Both parts are optional so a context can be assembled piecemeal; the
/// transforms that need a part ask for it through [`site`](Self::site) or
/// [`mjd`](Self::mjd), which fail with
/// [`MissingContext`](AstrometryError::MissingContext) naming the operation.
#[derive(Debug, Clone, Default)]
pub struct ObservationContext {
    site: Option<Site>,
    mjd: Option<Instant>,
}

impl ObservationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default site at a given instant.
    pub fn lsst(mjd: Instant) -> Self {
        Self::new().with_site(Site::lsst()).with_mjd(mjd)
    }

    pub fn with_site(mut self, site: Site) -> Self {
        self.site = Some(site);
        self
    }

    pub fn with_mjd(mut self, mjd: Instant) -> Self {
        self.mjd = Some(mjd);
        self
    }

    /// Sets the time from a bare TAI MJD.
    pub fn with_tai(self, tai_mjd: f64) -> AstrometryResult<Self> {
        Ok(self.with_mjd(Instant::from_tai(tai_mjd)?))
    }

    pub fn site(&self, operation: &'static str) -> AstrometryResult<&Site> {
        self.site
            .as_ref()
            .ok_or_else(|| AstrometryError::missing_context(operation, "a site"))
    }

    pub fn mjd(&self, operation: &'static str) -> AstrometryResult<&Instant> {
        self.mjd
            .as_ref()
            .ok_or_else(|| AstrometryError::missing_context(operation, "an mjd"))
    }

    pub fn has_site(&self) -> bool {
        self.site.is_some()
    }

    pub fn has_mjd(&self) -> bool {
        self.mjd.is_some()
    }
}
