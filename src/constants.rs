// Geomagnetic dipole poles (geographic degrees), fixed epoch values
pub const NORTH_DIPOLE_POLE_LAT: f64 = 82.41;
pub const NORTH_DIPOLE_POLE_LON: f64 = -82.86;
pub const SOUTH_DIPOLE_POLE_LAT: f64 = -80.65;
pub const SOUTH_DIPOLE_POLE_LON: f64 = 107.0;

// Equatorial surface field of the centred dipole (nT)
pub const DIPOLE_SURFACE_FIELD: f64 = 30_000.0;

// Local time
pub const HOURS_PER_DAY: f64 = 24.0;
pub const DEGREES_PER_HOUR: f64 = 15.0;

// Auroral electrojet proxy: AL = c0 + c1 Kp + c2 Kp^2 + c3 Kp^3
pub const AL_COEFFICIENTS: [f64; 4] = [18.0, -12.3, 27.2, -2.0];

// Pressure self-similarity exponent (empirical, not tunable)
pub const PRESSURE_SCALING_EXPONENT: f64 = 1.0 / 12.0;

// Field-line tracing radii (Earth radii)
pub const DEFAULT_STOP_RADIUS: f64 = 1.02;
pub const DEFAULT_LIMIT_RADIUS: f64 = 100.0;
pub const DEFAULT_ACCEPTANCE_RADIUS: f64 = 5.0;

// Kp classes used by the T89 parameterisation
pub const MAX_KP_CLASS: u8 = 7;

// Julian dates
pub const JD_UNIX_EPOCH: f64 = 2440587.5;
pub const JD_J2000: f64 = 2451545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const SECONDS_PER_DAY: f64 = 86400.0;

// Math
pub const PI: f64 = std::f64::consts::PI;
