//! Auroral oval from magnetic field-line tracing.
//!
//! Points on an equatorial GSM contour are traced along the field down to
//! the stop radius. Lines ending at or beyond the acceptance radius are open
//! or did not converge and are dropped, so the resulting curve may be
//! shorter than the contour.

use super::OvalModel;
use crate::config::{ExternalModel, InternalModel, RadiusPair, TracingConfig};
use crate::coordinates::spherical::cartesian_to_lat_lon_degrees;
use crate::errors::AuroraError;
use crate::models::{
    BoundaryKind, DrivingParameters, EquatorialContour, OvalCurve, OvalPoint, Pole,
    TracedFieldLine,
};
use hifitime::Epoch;
use log::{debug, warn};
use nalgebra as na;
use rayon::prelude::*;

/// Everything a tracer needs besides the start point.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceRequest {
    pub epoch: Epoch,
    pub direction: f64,
    pub parameters: [f64; 10],
    pub internal_model: InternalModel,
    pub external_model: ExternalModel,
    pub stop_radius: f64,
    pub limit_radius: f64,
}

/// Numerical field-line integrator behind the traced oval model.
pub trait FieldTracer: Sync {
    /// Follows the field line through `start` (GSM, Earth radii).
    ///
    /// A line that leaves `limit_radius` or fails to converge is reported as
    /// `AuroraError::TraceDivergence`.
    fn trace(
        &self,
        start: &na::Vector3<f64>,
        request: &TraceRequest,
    ) -> Result<TracedFieldLine, AuroraError>;

    /// GSM to geocentric geographic Cartesian at `epoch`
    fn gsm_to_geo(
        &self,
        point: &na::Vector3<f64>,
        epoch: Epoch,
    ) -> Result<na::Vector3<f64>, AuroraError>;
}

/// Field-line traced oval for one equatorial contour.
pub struct TracedOvalModel<T: FieldTracer> {
    tracer: T,
    kind: BoundaryKind,
    config: TracingConfig,
}

impl<T: FieldTracer> TracedOvalModel<T> {
    pub fn new(tracer: T, kind: BoundaryKind, config: TracingConfig) -> Result<Self, AuroraError> {
        config.validate()?;
        Ok(Self {
            tracer,
            kind,
            config,
        })
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn contour(&self) -> EquatorialContour {
        let radii = self.config.contour.for_kind(self.kind);
        EquatorialContour::new(radii.subsolar, radii.tail, self.config.samples)
    }

    /// Traced boundary; samples are traced in parallel and kept in azimuth order.
    pub fn traced_oval(
        &self,
        params: &DrivingParameters,
        epoch: Epoch,
        pole: Pole,
    ) -> Result<OvalCurve, AuroraError> {
        let contour = self.contour();
        let request = TraceRequest {
            epoch,
            direction: pole.trace_direction(),
            parameters: self.config.external_model.parameters(params),
            internal_model: self.config.internal_model,
            external_model: self.config.external_model,
            stop_radius: self.config.stop_radius,
            limit_radius: self.config.limit_radius,
        };

        let samples = contour
            .points()
            .into_par_iter()
            .map(|start| self.sample(&start, &request))
            .collect::<Result<Vec<_>, _>>()?;
        let points: Vec<OvalPoint> = samples.into_iter().flatten().collect();

        let curve = OvalCurve::new(pole, points, contour.len());
        if curve.is_degraded() {
            warn!(
                "{} {} contour: kept {} of {} traced samples",
                pole,
                self.kind,
                curve.len(),
                curve.requested
            );
        }
        Ok(curve)
    }

    fn sample(
        &self,
        start: &na::Vector3<f64>,
        request: &TraceRequest,
    ) -> Result<Option<OvalPoint>, AuroraError> {
        let line = match self.tracer.trace(start, request) {
            Ok(line) => line,
            Err(e) if e.is_recoverable_sample() => {
                debug!("dropping sample: {}", e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !line.is_accepted(self.config.acceptance_radius) {
            debug!(
                "rejecting open line from {:?}: terminal radius {:.3}",
                start.as_slice(),
                line.terminal_radius()
            );
            return Ok(None);
        }

        let geo = self.tracer.gsm_to_geo(&line.terminal, request.epoch)?;
        let (latitude, longitude) = cartesian_to_lat_lon_degrees(&geo);
        Ok(Some(OvalPoint {
            latitude,
            longitude,
        }))
    }
}

impl<T: FieldTracer> OvalModel for TracedOvalModel<T> {
    fn name(&self) -> &'static str {
        "field-line"
    }

    fn compute_oval(
        &self,
        params: &DrivingParameters,
        epoch: Epoch,
        pole: Pole,
    ) -> Result<OvalCurve, AuroraError> {
        self.traced_oval(params, epoch, pole)
    }
}

/// Traced boundary for one explicit contour, default field models and radii.
pub fn traced_oval<T: FieldTracer>(
    tracer: T,
    kind: BoundaryKind,
    radii: RadiusPair,
    samples: usize,
    params: &DrivingParameters,
    epoch: Epoch,
    pole: Pole,
) -> Result<OvalCurve, AuroraError> {
    let mut config = TracingConfig {
        samples,
        ..Default::default()
    };
    match kind {
        BoundaryKind::Inner => config.contour.inner = radii,
        BoundaryKind::Outer => config.contour.outer = radii,
    }
    TracedOvalModel::new(tracer, kind, config)?.traced_oval(params, epoch, pole)
}
