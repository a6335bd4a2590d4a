//! Empirical auroral oval after Starkov (1994).
//!
//! Each boundary is a colatitude-versus-MLT Fourier series whose amplitudes
//! and phases are cubic polynomials in log10|AL|, with AL estimated from Kp.

use super::OvalModel;
use crate::config::StarkovConfig;
use crate::constants::*;
use crate::coordinates::{AnalyticSun, MltCorrection, RotationFrame, SolarEphemeris};
use crate::errors::AuroraError;
use crate::models::{BoundarySelector, DrivingParameters, OvalCurve, Pole};
use hifitime::Epoch;
use log::debug;

// Rows: A0..A3 then a0..a2; columns: b0..b3
#[rustfmt::skip]
const POLEWARD: [[f64; 4]; 7] = [
    [ -0.07, 24.54, -12.53,  2.15],
    [-10.06, 19.83,  -9.33,  1.24],
    [ -4.44,  7.47,  -3.01,  0.25],
    [ -3.77,  7.90,  -4.73,  0.91],
    [ -6.61, 10.17,  -5.80,  1.19],
    [  6.37, -1.10,   0.34, -0.38],
    [ -4.48, 10.16,  -5.87,  0.98],
];

#[rustfmt::skip]
const EQUATORWARD: [[f64; 4]; 7] = [
    [  1.61, 23.21, -10.97,  2.03],
    [ -9.59, 17.78,  -7.20,  0.96],
    [-12.07, 17.49,  -7.96,  1.15],
    [ -6.56, 11.44,  -6.73,  1.31],
    [ -2.22,  1.50,  -0.58,  0.08],
    [-23.98, 42.79, -26.96,  5.56],
    [-20.07, 36.67, -24.20,  5.11],
];

#[rustfmt::skip]
const DIFFUSE: [[f64; 4]; 7] = [
    [  3.44,  29.77, -16.38,  3.35],
    [ -2.41,   7.89,  -4.32,  0.87],
    [ -0.74,   3.94,  -3.09,  0.72],
    [ -2.12,   3.24,  -1.67,  0.31],
    [ -1.68,  -2.48,   1.58, -0.28],
    [  8.69, -20.73,  13.03, -2.14],
    [  8.61,  -5.34,  -1.36,  0.76],
];

pub fn coefficients(selector: BoundarySelector) -> &'static [[f64; 4]; 7] {
    match selector {
        BoundarySelector::Poleward => &POLEWARD,
        BoundarySelector::Equatorward => &EQUATORWARD,
        BoundarySelector::Diffuse => &DIFFUSE,
    }
}

/// Auroral electrojet proxy from Kp
pub fn al_index(kp: f64) -> f64 {
    let [c0, c1, c2, c3] = AL_COEFFICIENTS;
    c0 + c1 * kp + c2 * kp * kp + c3 * kp * kp * kp
}

/// Fourier amplitudes (degrees) and phases (hours) of one boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvalParameters {
    pub amplitudes: [f64; 4],
    pub phases: [f64; 3],
}

impl OvalParameters {
    pub fn from_al(al: f64, selector: BoundarySelector) -> Result<Self, AuroraError> {
        if al == 0.0 || !al.is_finite() {
            return Err(AuroraError::domain("log10|AL|", al));
        }
        let x = al.abs().log10();

        let mut values = [0.0; 7];
        for (value, b) in values.iter_mut().zip(coefficients(selector).iter()) {
            *value = b[0] + b[1] * x + b[2] * x * x + b[3] * x * x * x;
        }

        Ok(Self {
            amplitudes: [values[0], values[1], values[2], values[3]],
            phases: [values[4], values[5], values[6]],
        })
    }

    /// Magnetic colatitude (degrees) at magnetic local time `t` (hours)
    pub fn colatitude(&self, t: f64) -> f64 {
        let [a0, a1, a2, a3] = self.amplitudes;
        let [p0, p1, p2] = self.phases;
        let harmonic = |n: f64, phase: f64| (DEGREES_PER_HOUR * (n * t + phase)).to_radians().cos();

        a0 + a1 * harmonic(1.0, p0) + a2 * harmonic(2.0, p1) + a3 * harmonic(3.0, p2)
    }
}

/// Empirical oval for one boundary selector.
pub struct StarkovModel<E: SolarEphemeris = AnalyticSun> {
    selector: BoundarySelector,
    config: StarkovConfig,
    ephemeris: E,
}

impl StarkovModel<AnalyticSun> {
    pub fn new(selector: BoundarySelector) -> Self {
        Self {
            selector,
            config: StarkovConfig::default(),
            ephemeris: AnalyticSun,
        }
    }
}

impl<E: SolarEphemeris> StarkovModel<E> {
    pub fn with_ephemeris(
        selector: BoundarySelector,
        config: StarkovConfig,
        ephemeris: E,
    ) -> Result<Self, AuroraError> {
        config.validate()?;
        Ok(Self {
            selector,
            config,
            ephemeris,
        })
    }

    pub fn selector(&self) -> BoundarySelector {
        self.selector
    }

    /// Geographic boundary for a Kp value at `epoch`, one point per MLT sample.
    pub fn oval_boundary(&self, kp: f64, epoch: Epoch, pole: Pole) -> Result<OvalCurve, AuroraError> {
        let al = al_index(kp);
        let parameters = OvalParameters::from_al(al, self.selector)?;
        let correction = MltCorrection::compute(&self.ephemeris, epoch, pole)?;
        let frame = RotationFrame::for_pole(pole);

        debug!(
            "{} boundary, Kp {} -> AL {:.2}, amplitudes {:?}, phases {:?}",
            self.selector, kp, al, parameters.amplitudes, parameters.phases
        );

        let samples = self.config.mlt_samples();
        let points: Vec<_> = samples
            .iter()
            .map(|&t| {
                let latitude = PI / 2.0 - parameters.colatitude(t).to_radians();
                let longitude = correction.magnetic_longitude(t);
                frame.magnetic_to_geographic_point(latitude, longitude)
            })
            .collect();

        Ok(OvalCurve::new(pole, points, samples.len()))
    }
}

impl<E: SolarEphemeris> OvalModel for StarkovModel<E> {
    fn name(&self) -> &'static str {
        "starkov"
    }

    fn compute_oval(
        &self,
        params: &DrivingParameters,
        epoch: Epoch,
        pole: Pole,
    ) -> Result<OvalCurve, AuroraError> {
        self.oval_boundary(params.kp, epoch, pole)
    }
}

/// Empirical boundary with the default sampling and the analytic ephemeris.
pub fn oval_boundary(
    selector: BoundarySelector,
    kp: f64,
    epoch: Epoch,
    pole: Pole,
) -> Result<OvalCurve, AuroraError> {
    StarkovModel::new(selector).oval_boundary(kp, epoch, pole)
}
