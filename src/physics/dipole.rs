//! Centred tilted dipole and the built-in field-line tracer.

use super::dynamics::{FieldLineFlow, MagneticField};
use super::field_tracing::{FieldTracer, TraceRequest};
use crate::config::{ExternalModel, InternalModel};
use crate::constants::DIPOLE_SURFACE_FIELD;
use crate::coordinates::{AnalyticSun, GsmFrame, SolarEphemeris};
use crate::errors::AuroraError;
use crate::integrators::RK4;
use crate::models::TracedFieldLine;
use hifitime::Epoch;
use nalgebra as na;

const STEP_FRACTION: f64 = 0.02; // step length relative to the current radius
const MIN_STEP: f64 = 1e-3;
const MAX_STEP: f64 = 0.5;
const MAX_STEPS: usize = 10_000;

/// Earth-centred dipole, field in nT for positions in Earth radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipoleField {
    axis: na::Vector3<f64>, // northern dipole axis, unit
}

impl DipoleField {
    pub fn new(axis: na::Vector3<f64>) -> Self {
        Self {
            axis: axis.normalize(),
        }
    }

    /// Dipole tilted by `tilt` radians towards GSM +X
    pub fn tilted(tilt: f64) -> Self {
        Self::new(na::Vector3::new(tilt.sin(), 0.0, tilt.cos()))
    }
}

impl MagneticField for DipoleField {
    fn field(&self, position: &na::Vector3<f64>) -> na::Vector3<f64> {
        let r = position.magnitude();
        let r_hat = position / r;
        // the moment points geomagnetic south
        let m = -self.axis;
        (r_hat * (3.0 * m.dot(&r_hat)) - m) * (DIPOLE_SURFACE_FIELD / r.powi(3))
    }
}

/// Integrates a field line from `start` until it reaches `stop_radius`.
///
/// The last point is placed on the stop sphere by intersecting it with the
/// final chord.
pub fn trace_field_line<F: MagneticField>(
    field: &F,
    start: &na::Vector3<f64>,
    direction: f64,
    stop_radius: f64,
    limit_radius: f64,
) -> Result<TracedFieldLine, AuroraError> {
    let diverged = |reason: String| AuroraError::TraceDivergence {
        start: [start.x, start.y, start.z],
        reason,
    };

    if start.magnitude() > limit_radius {
        return Err(diverged(format!(
            "start lies beyond the limit radius {}",
            limit_radius
        )));
    }

    let flow = FieldLineFlow::new(field, direction);
    let integrator = RK4::new(&flow);
    let mut r = *start;
    let mut path = vec![r];

    if r.magnitude() <= stop_radius {
        return Ok(TracedFieldLine {
            start: *start,
            path,
            terminal: r,
        });
    }

    for _ in 0..MAX_STEPS {
        let ds = (STEP_FRACTION * r.magnitude()).clamp(MIN_STEP, MAX_STEP);
        let next = integrator.step(&r, ds);
        let radius = next.magnitude();

        if !radius.is_finite() {
            return Err(diverged("non-finite position".to_string()));
        }
        if radius > limit_radius {
            return Err(diverged(format!("left the limit radius {}", limit_radius)));
        }
        if radius <= stop_radius {
            let terminal = onto_sphere(&r, &next, stop_radius);
            path.push(terminal);
            return Ok(TracedFieldLine {
                start: *start,
                path,
                terminal,
            });
        }

        path.push(next);
        r = next;
    }

    Err(diverged(format!("no convergence after {} steps", MAX_STEPS)))
}

// `outside` lies above the sphere and `inside` on or below it
fn onto_sphere(outside: &na::Vector3<f64>, inside: &na::Vector3<f64>, radius: f64) -> na::Vector3<f64> {
    let d = inside - outside;
    let a = d.magnitude_squared();
    if a == 0.0 {
        return *inside;
    }
    let b = 2.0 * outside.dot(&d);
    let c = outside.magnitude_squared() - radius * radius;
    let discriminant = (b * b - 4.0 * a * c).max(0.0);
    let s = ((-b - discriminant.sqrt()) / (2.0 * a)).clamp(0.0, 1.0);
    outside + d * s
}

/// Field-line tracer over a centred dipole aligned with the geomagnetic axis.
///
/// Only the dipole internal model without an external model is supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DipoleTracer<E: SolarEphemeris = AnalyticSun> {
    ephemeris: E,
}

impl DipoleTracer<AnalyticSun> {
    pub fn new() -> Self {
        Self {
            ephemeris: AnalyticSun,
        }
    }
}

impl<E: SolarEphemeris> DipoleTracer<E> {
    pub fn with_ephemeris(ephemeris: E) -> Self {
        Self { ephemeris }
    }
}

impl<E: SolarEphemeris + Sync> FieldTracer for DipoleTracer<E> {
    fn trace(
        &self,
        start: &na::Vector3<f64>,
        request: &TraceRequest,
    ) -> Result<TracedFieldLine, AuroraError> {
        if request.internal_model != InternalModel::Dipole
            || request.external_model != ExternalModel::None
        {
            return Err(AuroraError::Configuration(format!(
                "dipole tracer cannot evaluate {} + {}",
                request.internal_model, request.external_model
            )));
        }

        let frame = GsmFrame::at(&self.ephemeris, request.epoch)?;
        let field = DipoleField::new(frame.dipole_axis_gsm());
        trace_field_line(
            &field,
            start,
            request.direction,
            request.stop_radius,
            request.limit_radius,
        )
    }

    fn gsm_to_geo(
        &self,
        point: &na::Vector3<f64>,
        epoch: Epoch,
    ) -> Result<na::Vector3<f64>, AuroraError> {
        Ok(GsmFrame::at(&self.ephemeris, epoch)?.to_geographic(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn equatorial_field_points_north() {
        let b = DipoleField::tilted(0.0).field(&na::Vector3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(b, na::Vector3::new(0.0, 0.0, DIPOLE_SURFACE_FIELD), epsilon = 1e-9);

        let polar = DipoleField::tilted(0.0).field(&na::Vector3::new(0.0, 0.0, 2.0));
        assert_abs_diff_eq!(polar.z, -2.0 * DIPOLE_SURFACE_FIELD / 8.0, epsilon = 1e-9);
    }

    // r = L cos^2(lat): L = 10 reaches 1.02 Re at 71.38 degrees
    #[test_case(-1.0, 71.38; "north")]
    #[test_case(1.0, -71.38; "south")]
    fn closes_on_the_invariant_latitude(direction: f64, latitude: f64) {
        let field = DipoleField::tilted(0.0);
        let start = na::Vector3::new(10.0, 0.0, 0.0);
        let line = trace_field_line(&field, &start, direction, 1.02, 100.0).unwrap();

        assert_abs_diff_eq!(line.terminal_radius(), 1.02, epsilon = 1e-9);
        let traced = (line.terminal.z / line.terminal_radius()).asin().to_degrees();
        assert_abs_diff_eq!(traced, latitude, epsilon = 0.05);
        assert!(line.path.len() > 10);
        assert_eq!(line.path[0], start);
    }

    #[test]
    fn start_beyond_limit_diverges() {
        let field = DipoleField::tilted(0.2);
        let start = na::Vector3::new(150.0, 0.0, 0.0);
        let err = trace_field_line(&field, &start, -1.0, 1.02, 100.0).unwrap_err();
        assert!(err.is_recoverable_sample());
    }

    #[test]
    fn other_field_models_are_refused() {
        let request = TraceRequest {
            epoch: Epoch::from_gregorian_utc_at_midnight(2025, 3, 20),
            direction: -1.0,
            parameters: [0.0; 10],
            internal_model: InternalModel::Igrf,
            external_model: ExternalModel::T96,
            stop_radius: 1.02,
            limit_radius: 100.0,
        };
        let err = DipoleTracer::new()
            .trace(&na::Vector3::new(8.0, 0.0, 0.0), &request)
            .unwrap_err();
        assert!(matches!(err, AuroraError::Configuration(_)));
    }
}
