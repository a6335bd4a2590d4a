use crate::constants::*;
use crate::errors::AuroraError;
use crate::models::{BoundaryKind, DrivingParameters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Empirical (Starkov) model sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarkovConfig {
    pub mlt_step_hours: f64,
}

impl StarkovConfig {
    pub const MLT_STEP_HOURS: f64 = 0.5; // 48 samples per day

    pub fn validate(&self) -> Result<(), AuroraError> {
        if !(self.mlt_step_hours > 0.0 && self.mlt_step_hours <= HOURS_PER_DAY) {
            return Err(AuroraError::Configuration(format!(
                "MLT step must be in (0, 24] hours, got {}",
                self.mlt_step_hours
            )));
        }
        Ok(())
    }

    /// Local times sampled over [0, 24)
    pub fn mlt_samples(&self) -> Vec<f64> {
        let count = (HOURS_PER_DAY / self.mlt_step_hours).ceil() as usize;
        (0..count)
            .map(|i| i as f64 * self.mlt_step_hours)
            .filter(|t| *t < HOURS_PER_DAY)
            .collect()
    }
}

impl Default for StarkovConfig {
    fn default() -> Self {
        Self {
            mlt_step_hours: Self::MLT_STEP_HOURS,
        }
    }
}

/// Reference state the pressure-scaled oval is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    pub reference_kp: f64,
    pub reference_pressure: f64, // nPa
    pub clamp: bool,
}

impl ScalingConfig {
    pub const REFERENCE_KP: f64 = 2.0;
    pub const REFERENCE_PRESSURE: f64 = 0.5;
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            reference_kp: Self::REFERENCE_KP,
            reference_pressure: Self::REFERENCE_PRESSURE,
            clamp: false,
        }
    }
}

/// Subsolar and tail radii (Earth radii) of one equatorial contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusPair {
    pub subsolar: f64,
    pub tail: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourRadii {
    pub inner: RadiusPair,
    pub outer: RadiusPair,
}

impl ContourRadii {
    pub fn for_kind(&self, kind: BoundaryKind) -> RadiusPair {
        match kind {
            BoundaryKind::Inner => self.inner,
            BoundaryKind::Outer => self.outer,
        }
    }
}

impl Default for ContourRadii {
    fn default() -> Self {
        Self {
            inner: RadiusPair {
                subsolar: 10.0,
                tail: 6.0,
            },
            outer: RadiusPair {
                subsolar: 10.5,
                tail: 12.0,
            },
        }
    }
}

/// Internal (main) geomagnetic field model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternalModel {
    Dipole,
    Igrf,
}

/// External (magnetospheric) field model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExternalModel {
    None,
    T89,
    T96,
    T01,
    Ts04,
}

impl ExternalModel {
    /// Parameter vector handed to the tracer for this model.
    ///
    /// T89 only reads the Kp class in the first slot; the pressure-driven
    /// models start with `[Pdyn, Dst, By, Bz]`.
    pub fn parameters(&self, params: &DrivingParameters) -> [f64; 10] {
        let mut parmod = [0.0; 10];
        match self {
            ExternalModel::None => {}
            ExternalModel::T89 => parmod[0] = params.kp_class as f64,
            ExternalModel::T96 | ExternalModel::T01 | ExternalModel::Ts04 => {
                parmod[0] = params.pressure;
                parmod[1] = params.dst;
                parmod[2] = params.by;
                parmod[3] = params.bz;
            }
        }
        parmod
    }
}

impl fmt::Display for InternalModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InternalModel::Dipole => write!(f, "dipole"),
            InternalModel::Igrf => write!(f, "igrf"),
        }
    }
}

impl fmt::Display for ExternalModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExternalModel::None => write!(f, "none"),
            ExternalModel::T89 => write!(f, "t89"),
            ExternalModel::T96 => write!(f, "t96"),
            ExternalModel::T01 => write!(f, "t01"),
            ExternalModel::Ts04 => write!(f, "ts04"),
        }
    }
}

/// Field-line tracing oval model settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracingConfig {
    pub samples: usize,
    pub stop_radius: f64,       // near-Earth end of the trace (Re)
    pub limit_radius: f64,      // divergence bound (Re)
    pub acceptance_radius: f64, // terminal points at or beyond this are open lines (Re)
    pub contour: ContourRadii,
    pub internal_model: InternalModel,
    pub external_model: ExternalModel,
}

impl TracingConfig {
    pub const SAMPLES: usize = 60;

    pub fn validate(&self) -> Result<(), AuroraError> {
        if self.samples == 0 {
            return Err(AuroraError::Configuration(
                "at least one contour sample is required".to_string(),
            ));
        }
        let radii = [
            self.stop_radius,
            self.limit_radius,
            self.acceptance_radius,
            self.contour.inner.subsolar,
            self.contour.inner.tail,
            self.contour.outer.subsolar,
            self.contour.outer.tail,
        ];
        if radii.iter().any(|r| !(*r > 0.0) || !r.is_finite()) {
            return Err(AuroraError::Configuration(format!(
                "tracing radii must be positive, got {:?}",
                radii
            )));
        }
        if self.stop_radius >= self.limit_radius {
            return Err(AuroraError::Configuration(format!(
                "stop radius {} must be below limit radius {}",
                self.stop_radius, self.limit_radius
            )));
        }
        Ok(())
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            samples: Self::SAMPLES,
            stop_radius: DEFAULT_STOP_RADIUS,
            limit_radius: DEFAULT_LIMIT_RADIUS,
            acceptance_radius: DEFAULT_ACCEPTANCE_RADIUS,
            contour: ContourRadii::default(),
            internal_model: InternalModel::Dipole,
            external_model: ExternalModel::None,
        }
    }
}
