use super::starkov::StarkovModel;
use super::OvalModel;
use crate::config::ScalingConfig;
use crate::constants::PRESSURE_SCALING_EXPONENT;
use crate::coordinates::{AnalyticSun, SolarEphemeris};
use crate::errors::AuroraError;
use crate::models::{BoundarySelector, DrivingParameters, OvalCurve, OvalPoint, Pole};
use hifitime::Epoch;
use log::warn;

/// Rescales boundary latitudes between dynamic pressures under the
/// self-similarity law `cos(lat2) = cos(lat1) * (P2 / P1)^(1/12)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressureScaling {
    clamp: bool,
}

impl PressureScaling {
    /// With `clamp` set, cosines pushed outside [-1, 1] are clamped instead
    /// of failing.
    pub fn new(clamp: bool) -> Self {
        Self { clamp }
    }

    pub fn scale(
        &self,
        latitudes: &[f64],
        pressure_from: f64,
        pressure_to: f64,
    ) -> Result<Vec<f64>, AuroraError> {
        let ratio = pressure_ratio_factor(pressure_from, pressure_to)?;
        latitudes
            .iter()
            .map(|&lat| self.scale_one(lat, ratio))
            .collect()
    }

    fn scale_one(&self, latitude: f64, ratio: f64) -> Result<f64, AuroraError> {
        let mut z = latitude.to_radians().cos() * ratio;
        if z.abs() > 1.0 {
            if !self.clamp {
                return Err(AuroraError::domain("arccos in pressure scaling", z));
            }
            warn!("clamping scaled cosine {} for latitude {}", z, latitude);
            z = z.clamp(-1.0, 1.0);
        }
        Ok(z.acos().to_degrees())
    }

    /// Scales a whole curve, keeping its hemisphere and longitudes.
    pub fn scale_curve(
        &self,
        curve: &OvalCurve,
        pressure_from: f64,
        pressure_to: f64,
    ) -> Result<OvalCurve, AuroraError> {
        let sign = curve.pole.hemisphere_sign();
        let magnitudes: Vec<f64> = curve.points.iter().map(|p| p.latitude.abs()).collect();
        let scaled = self.scale(&magnitudes, pressure_from, pressure_to)?;

        let points = curve
            .points
            .iter()
            .zip(scaled)
            .map(|(p, latitude)| OvalPoint {
                latitude: sign * latitude,
                longitude: p.longitude,
            })
            .collect();

        Ok(OvalCurve::new(curve.pole, points, curve.requested))
    }
}

/// Pure, non-clamping scaling of a latitude sequence (degrees)
pub fn scale(latitudes: &[f64], pressure_from: f64, pressure_to: f64) -> Result<Vec<f64>, AuroraError> {
    PressureScaling::default().scale(latitudes, pressure_from, pressure_to)
}

fn pressure_ratio_factor(pressure_from: f64, pressure_to: f64) -> Result<f64, AuroraError> {
    for pressure in [pressure_from, pressure_to] {
        if !(pressure > 0.0) || !pressure.is_finite() {
            return Err(AuroraError::domain("dynamic pressure", pressure));
        }
    }
    Ok((pressure_to / pressure_from).powf(PRESSURE_SCALING_EXPONENT))
}

/// Empirical oval at a reference Kp and pressure, rescaled to the driving pressure.
pub struct PressureScaledModel<E: SolarEphemeris = AnalyticSun> {
    base: StarkovModel<E>,
    config: ScalingConfig,
}

impl PressureScaledModel<AnalyticSun> {
    pub fn new(selector: BoundarySelector) -> Self {
        Self {
            base: StarkovModel::new(selector),
            config: ScalingConfig::default(),
        }
    }
}

impl<E: SolarEphemeris> PressureScaledModel<E> {
    pub fn with_base(base: StarkovModel<E>, config: ScalingConfig) -> Result<Self, AuroraError> {
        pressure_ratio_factor(config.reference_pressure, config.reference_pressure)?;
        Ok(Self { base, config })
    }

    pub fn selector(&self) -> BoundarySelector {
        self.base.selector()
    }
}

impl<E: SolarEphemeris> OvalModel for PressureScaledModel<E> {
    fn name(&self) -> &'static str {
        "pressure-scaled"
    }

    fn compute_oval(
        &self,
        params: &DrivingParameters,
        epoch: Epoch,
        pole: Pole,
    ) -> Result<OvalCurve, AuroraError> {
        let reference = self
            .base
            .oval_boundary(self.config.reference_kp, epoch, pole)?;
        PressureScaling::new(self.config.clamp).scale_curve(
            &reference,
            self.config.reference_pressure,
            params.pressure,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(70.0, 0.5, 2.0; "compression")]
    #[test_case(65.0, 4.0, 1.0; "expansion")]
    #[test_case(80.0, 1.0, 1.0; "unchanged pressure")]
    fn round_trip_restores_latitude(lat: f64, p1: f64, p2: f64) {
        let there = scale(&[lat], p1, p2).unwrap();
        let back = scale(&there, p2, p1).unwrap();
        assert_abs_diff_eq!(back[0], lat, epsilon = 1e-9);
    }

    #[test]
    fn larger_ratio_moves_latitude_away_from_the_pole() {
        for lat in [45.0, 60.0, 70.0, 85.0] {
            let mut previous = 90.0;
            for p2 in [0.5, 1.0, 2.0, 4.0, 8.0] {
                let scaled = scale(&[lat], 0.5, p2).unwrap()[0];
                assert!(scaled < previous, "lat {} at P2 {}", lat, p2);
                previous = scaled;
            }
        }
    }

    #[test]
    fn out_of_domain_cosine_fails_unless_clamped() {
        // cos(10 deg) * 4096^(1/12) = 0.985 * 2 > 1
        let err = scale(&[10.0], 1.0, 4096.0).unwrap_err();
        assert!(matches!(err, AuroraError::Domain { value, .. } if value > 1.0));

        let clamped = PressureScaling::new(true).scale(&[10.0], 1.0, 4096.0).unwrap();
        assert_abs_diff_eq!(clamped[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn non_positive_pressure_is_rejected() {
        assert!(scale(&[70.0], 0.0, 1.0).is_err());
        assert!(scale(&[70.0], 1.0, -2.0).is_err());
    }

    #[test]
    fn southern_curve_keeps_its_sign_and_longitudes() {
        let curve = OvalCurve::new(
            Pole::South,
            vec![
                OvalPoint {
                    latitude: -70.0,
                    longitude: 120.0,
                },
                OvalPoint {
                    latitude: -65.0,
                    longitude: -30.0,
                },
            ],
            2,
        );
        let scaled = PressureScaling::default()
            .scale_curve(&curve, 0.5, 3.0)
            .unwrap();
        assert_eq!(scaled.longitudes(), curve.longitudes());
        assert!(scaled.points[0].latitude < 0.0);
        assert!(scaled.points[0].latitude > -70.0);
    }
}
