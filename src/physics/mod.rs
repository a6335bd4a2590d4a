pub mod dipole;
pub mod dynamics;
pub mod field_tracing;
pub mod pressure_scaling;
pub mod starkov;

use crate::errors::AuroraError;
use crate::models::{DrivingParameters, OvalCurve, Pole};
use hifitime::Epoch;

pub use dipole::{DipoleField, DipoleTracer};
pub use field_tracing::{FieldTracer, TraceRequest, TracedOvalModel};
pub use pressure_scaling::{PressureScaledModel, PressureScaling};
pub use starkov::StarkovModel;

/// A model producing one geographic boundary curve per pole.
pub trait OvalModel {
    fn name(&self) -> &'static str;

    fn compute_oval(
        &self,
        params: &DrivingParameters,
        epoch: Epoch,
        pole: Pole,
    ) -> Result<OvalCurve, AuroraError>;
}
