pub const J2000_JD: f64 = 2451545.0;

/// MJD of the J2000.0 epoch.
pub const J2000_MJD: f64 = 51544.5;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365250.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

pub const CIRCULAR_ARCSECONDS: f64 = 1296000.0;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

/// TT - TAI in seconds.
pub const TT_MINUS_TAI_SECONDS: f64 = 32.184;

pub const ARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-6;

pub const MILLIARCSEC_TO_RAD: f64 = 4.848136811095359935899141e-9;

pub const ARCSEC_PER_RAD: f64 = 206264.8062470963551564734;

pub const PI: f64 = 3.141592653589793238462643;

pub const HALF_PI: f64 = 1.5707963267948966192313216;

pub const TWOPI: f64 = 6.283185307179586476925287;

pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

/// Seconds of time to radians.
pub const SEC_TO_RAD: f64 = 7.272205216643039903848712e-5;

/// Astronomical unit in metres (IAU 1976, used by the geodetic helpers).
pub const AU_M_1976: f64 = 1.49597870e11;

pub const AU_KM: f64 = 149_597_870.7;

/// Light time for one astronomical unit, in seconds.
pub const LIGHT_TIME_AU_SECONDS: f64 = 499.004782;

pub const SPEED_OF_LIGHT_AU_PER_DAY: f64 = 173.1446326846693;

/// Ratio of the sidereal to the solar day.
pub const SIDEREAL_PER_SOLAR: f64 = 1.00273790935;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 2006).
pub const J2000_OBLIQUITY_RAD: f64 = 84381.406 * ARCSEC_TO_RAD;

/// Schwarzschild radius of the Sun in AU, used by light deflection.
pub const SUN_SCHWARZSCHILD_AU: f64 = 1.97412574336e-8;

/// IAU 1976 reference ellipsoid equatorial radius (m).
pub const IAU1976_EQUATORIAL_RADIUS_M: f64 = 6378140.0;

/// IAU 1976 reference ellipsoid flattening.
pub const IAU1976_FLATTENING: f64 = 1.0 / 298.257;
