//! Subsolar point and the magnetic-local-time phase correction.
//!
//! The solar position follows the NOAA low-precision algorithm (Meeus,
//! "Astronomical Algorithms"), good to about 0.01 degrees over several
//! centuries around J2000. UTC is used in place of UT1.

use super::rotation_frame::RotationFrame;
use super::spherical::{normalize_angle, normalize_longitude, spherical_to_cartesian};
use crate::constants::*;
use crate::errors::AuroraError;
use crate::models::Pole;
use hifitime::Epoch;
use log::debug;

/// Source of the Sun's geographic sub-point.
pub trait SolarEphemeris {
    /// Returns (latitude, longitude) in degrees, longitude in (-180, 180].
    fn subsolar_point(&self, epoch: Epoch) -> Result<(f64, f64), AuroraError>;
}

/// Analytic solar ephemeris, no external data needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticSun;

impl SolarEphemeris for AnalyticSun {
    fn subsolar_point(&self, epoch: Epoch) -> Result<(f64, f64), AuroraError> {
        let jd = julian_day_utc(epoch);
        if !jd.is_finite() {
            return Err(AuroraError::UpstreamUnavailable(format!(
                "no solar position for epoch {}",
                epoch
            )));
        }
        let t = (jd - JD_J2000) / DAYS_PER_JULIAN_CENTURY;

        let (right_ascension, declination) = solar_equatorial(t);
        let gmst = greenwich_mean_sidereal_time(jd, t);

        let latitude = declination.to_degrees();
        let longitude = normalize_longitude((right_ascension - gmst).to_degrees());
        Ok((latitude, longitude))
    }
}

/// Julian day (UTC) of an epoch
pub fn julian_day_utc(epoch: Epoch) -> f64 {
    epoch.to_unix_seconds() / SECONDS_PER_DAY + JD_UNIX_EPOCH
}

/// Apparent right ascension and declination of the Sun (radians), `t` in
/// Julian centuries since J2000.0.
fn solar_equatorial(t: f64) -> (f64, f64) {
    let mean_lon = (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0);
    let mean_anomaly = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();

    let center = mean_anomaly.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * mean_anomaly).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * mean_anomaly).sin() * 0.000289;
    let true_lon = mean_lon + center;

    let omega = (125.04 - 1934.136 * t).to_radians();
    let apparent_lon = (true_lon - 0.00569 - 0.00478 * omega.sin()).to_radians();

    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    let mean_obliquity = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    let obliquity = (mean_obliquity + 0.00256 * omega.cos()).to_radians();

    let right_ascension =
        (obliquity.cos() * apparent_lon.sin()).atan2(apparent_lon.cos());
    let declination = (obliquity.sin() * apparent_lon.sin()).asin();
    (right_ascension, declination)
}

/// Greenwich mean sidereal time (radians)
fn greenwich_mean_sidereal_time(jd: f64, t: f64) -> f64 {
    let degrees = 280.46061837
        + 360.98564736629 * (jd - JD_J2000)
        + t * t * (0.000387933 - t / 38710000.0);
    degrees.rem_euclid(360.0).to_radians()
}

/// Phase that anchors magnetic local time to the true solar direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MltCorrection {
    /// Offset Δφ (radians, (-pi, pi]) such that the subsolar magnetic
    /// longitude is pi + Δφ, i.e. noon MLT faces the Sun.
    pub delta: f64,
    /// Magnetic longitude of the subsolar point (radians)
    pub subsolar_magnetic_longitude: f64,
}

impl MltCorrection {
    pub fn compute<E: SolarEphemeris + ?Sized>(
        ephemeris: &E,
        epoch: Epoch,
        pole: Pole,
    ) -> Result<Self, AuroraError> {
        let (lat, lon) = ephemeris.subsolar_point(epoch)?;
        let v_geo = spherical_to_cartesian(lat.to_radians(), lon.to_radians());
        let v_mag = RotationFrame::for_pole(pole).to_magnetic(&v_geo);

        let subsolar_magnetic_longitude = v_mag.y.atan2(v_mag.x);
        let delta = normalize_angle(subsolar_magnetic_longitude - PI);

        debug!(
            "{} pole at {}: subsolar ({:.3}, {:.3}) deg, delta phi {:.3} deg",
            pole,
            epoch,
            lat,
            lon,
            delta.to_degrees()
        );

        Ok(Self {
            delta,
            subsolar_magnetic_longitude,
        })
    }

    /// Δφ in degrees
    pub fn delta_degrees(&self) -> f64 {
        self.delta.to_degrees()
    }

    /// Magnetic longitude (radians) for a magnetic local time in hours
    pub fn magnetic_longitude(&self, mlt_hours: f64) -> f64 {
        2.0 * PI * mlt_hours / HOURS_PER_DAY + self.delta
    }
}

/// Δφ in degrees, (-180, 180]
pub fn magnetic_longitude_offset<E: SolarEphemeris + ?Sized>(
    ephemeris: &E,
    epoch: Epoch,
    pole: Pole,
) -> Result<f64, AuroraError> {
    Ok(MltCorrection::compute(ephemeris, epoch, pole)?.delta_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::Duration;
    use test_case::test_case;

    #[test]
    fn declination_near_zero_at_march_equinox() {
        let equinox = Epoch::from_gregorian_utc(2024, 3, 20, 3, 6, 0, 0);
        let (lat, _) = AnalyticSun.subsolar_point(equinox).unwrap();
        assert_abs_diff_eq!(lat, 0.0, epsilon = 0.05);
    }

    #[test]
    fn declination_at_june_solstice() {
        let solstice = Epoch::from_gregorian_utc(2024, 6, 20, 20, 51, 0, 0);
        let (lat, _) = AnalyticSun.subsolar_point(solstice).unwrap();
        assert_abs_diff_eq!(lat, 23.44, epsilon = 0.05);
    }

    #[test_case(2024, 2, 11; "largest negative equation of time")]
    #[test_case(2024, 11, 3; "largest positive equation of time")]
    #[test_case(2025, 1, 1; "new year")]
    fn subsolar_longitude_near_greenwich_at_noon(year: i32, month: u8, day: u8) {
        let noon = Epoch::from_gregorian_utc(year, month, day, 12, 0, 0, 0);
        let (_, lon) = AnalyticSun.subsolar_point(noon).unwrap();
        // equation of time never exceeds ~16.5 minutes, i.e. ~4.2 degrees
        assert!(lon.abs() < 4.5, "subsolar longitude {} at noon", lon);
    }

    #[test]
    fn subsolar_point_moves_westward() {
        let t0 = Epoch::from_gregorian_utc(2025, 1, 1, 6, 0, 0, 0);
        let (_, lon0) = AnalyticSun.subsolar_point(t0).unwrap();
        let (_, lon1) = AnalyticSun
            .subsolar_point(t0 + Duration::from_seconds(3600.0))
            .unwrap();
        assert_abs_diff_eq!(normalize_longitude(lon0 - lon1), 15.0, epsilon = 0.05);
    }

    #[test_case(Pole::North; "north")]
    #[test_case(Pole::South; "south")]
    fn offset_is_continuous_over_one_second(pole: Pole) {
        let t0 = Epoch::from_gregorian_utc(2025, 1, 1, 15, 0, 0, 0);
        let d0 = magnetic_longitude_offset(&AnalyticSun, t0, pole).unwrap();
        let d1 =
            magnetic_longitude_offset(&AnalyticSun, t0 + Duration::from_seconds(1.0), pole)
                .unwrap();
        assert!(normalize_longitude(d1 - d0).abs() < 0.01);
        assert!(d0 > -180.0 && d0 <= 180.0);
    }

    #[test_case(Pole::North; "north")]
    #[test_case(Pole::South; "south")]
    fn noon_mlt_faces_the_sun(pole: Pole) {
        let epoch = Epoch::from_gregorian_utc(2025, 1, 1, 23, 0, 0, 0);
        let correction = MltCorrection::compute(&AnalyticSun, epoch, pole).unwrap();
        let noon = correction.magnetic_longitude(12.0);
        assert_abs_diff_eq!(
            normalize_angle(noon - correction.subsolar_magnetic_longitude),
            0.0,
            epsilon = 1e-9
        );
    }
}
