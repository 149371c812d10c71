//! Observatory site: geodetic position plus the ambient atmosphere.
//!
//! Angles are stored in radians (east longitude positive); the constructor
//! takes degrees. The meteorological fields feed the refraction model only.
//!
//! ```
//! use celestial_astrometry::Site;
//!
//! let site = Site::new("Mauna Kea", -155.4681, 19.8207, 4205.0, 0.0, 616.0, 0.2, 0.0065)?;
//! assert!((site.temperature_kelvin() - 273.15).abs() < 1e-12);
//! # Ok::<(), celestial_astrometry::AstrometryError>(())
//! ```

use crate::errors::{AstrometryError, AstrometryResult};
use celestial_core::constants::{DEG_TO_RAD, RAD_TO_DEG};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const CELSIUS_TO_KELVIN: f64 = 273.15;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Site {
    name: String,
    longitude: f64,
    latitude: f64,
    height: f64,
    temperature: f64,
    pressure: f64,
    humidity: f64,
    lapse_rate: f64,
}

impl Site {
    /// `temperature` in °C, `pressure` in mbar, `humidity` as a fraction,
    /// `lapse_rate` in K/m.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        longitude_deg: f64,
        latitude_deg: f64,
        height: f64,
        temperature: f64,
        pressure: f64,
        humidity: f64,
        lapse_rate: f64,
    ) -> AstrometryResult<Self> {
        let values = [
            longitude_deg,
            latitude_deg,
            height,
            temperature,
            pressure,
            humidity,
            lapse_rate,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AstrometryError::invalid_site("all site values must be finite"));
        }
        if latitude_deg.abs() > 90.0 {
            return Err(AstrometryError::invalid_site(format!(
                "latitude {}° outside [-90°, 90°]",
                latitude_deg
            )));
        }
        if !(0.0..=1.0).contains(&humidity) {
            return Err(AstrometryError::invalid_site(format!(
                "relative humidity {} outside [0, 1]",
                humidity
            )));
        }
        if pressure < 0.0 {
            return Err(AstrometryError::invalid_site(format!(
                "pressure {} mbar is negative",
                pressure
            )));
        }

        Ok(Self {
            name: name.into(),
            longitude: longitude_deg * DEG_TO_RAD,
            latitude: latitude_deg * DEG_TO_RAD,
            height,
            temperature,
            pressure,
            humidity,
            lapse_rate,
        })
    }

    /// Cerro Pachón, with its median observing conditions.
    pub fn lsst() -> Self {
        Self {
            name: "LSST".to_string(),
            longitude: -70.7494 * DEG_TO_RAD,
            latitude: -30.2444 * DEG_TO_RAD,
            height: 2650.0,
            temperature: 11.505,
            pressure: 749.3,
            humidity: 0.4,
            lapse_rate: 0.0065,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude * RAD_TO_DEG
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude * RAD_TO_DEG
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn temperature_kelvin(&self) -> f64 {
        self.temperature + CELSIUS_TO_KELVIN
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn lapse_rate(&self) -> f64 {
        self.lapse_rate
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::lsst()
    }
}
