use nalgebra as na;

/// Closed contour in the GSM equatorial plane (Earth radii).
///
/// The radius runs from `subsolar_radius` at noon (azimuth 0) to
/// `tail_radius` at midnight (azimuth pi) as `sin^2(phi / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EquatorialContour {
    pub subsolar_radius: f64,
    pub tail_radius: f64,
    pub azimuths: Vec<f64>,
}

impl EquatorialContour {
    /// Samples `samples` azimuths uniformly over [0, 2pi).
    pub fn new(subsolar_radius: f64, tail_radius: f64, samples: usize) -> Self {
        let step = 2.0 * std::f64::consts::PI / samples.max(1) as f64;
        let azimuths = (0..samples).map(|k| k as f64 * step).collect();
        Self {
            subsolar_radius,
            tail_radius,
            azimuths,
        }
    }

    pub fn radius_at(&self, azimuth: f64) -> f64 {
        let s = (azimuth / 2.0).sin();
        self.subsolar_radius + (self.tail_radius - self.subsolar_radius) * s * s
    }

    pub fn len(&self) -> usize {
        self.azimuths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.azimuths.is_empty()
    }

    /// Contour points `(R cos phi, R sin phi, 0)` in azimuth order
    pub fn points(&self) -> Vec<na::Vector3<f64>> {
        self.azimuths
            .iter()
            .map(|&phi| {
                let r = self.radius_at(phi);
                na::Vector3::new(r * phi.cos(), r * phi.sin(), 0.0)
            })
            .collect()
    }
}

/// Result of following one field line from its equatorial start point.
#[derive(Debug, Clone, PartialEq)]
pub struct TracedFieldLine {
    pub start: na::Vector3<f64>,
    pub path: Vec<na::Vector3<f64>>,
    pub terminal: na::Vector3<f64>,
}

impl TracedFieldLine {
    pub fn terminal_radius(&self) -> f64 {
        self.terminal.magnitude()
    }

    /// A line is kept only when it closed below the acceptance radius.
    pub fn is_accepted(&self, acceptance_radius: f64) -> bool {
        self.terminal_radius() < acceptance_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn contour_interpolates_between_noon_and_midnight() {
        let contour = EquatorialContour::new(10.0, 6.0, 4);
        assert_eq!(contour.len(), 4);
        assert_abs_diff_eq!(contour.radius_at(0.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(contour.radius_at(PI), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(contour.radius_at(PI / 2.0), 8.0, epsilon = 1e-12);

        let points = contour.points();
        assert_abs_diff_eq!(points[0], na::Vector3::new(10.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(points[2], na::Vector3::new(-6.0, 0.0, 0.0), epsilon = 1e-12);
        assert!(points.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn contour_does_not_repeat_the_closing_azimuth() {
        let contour = EquatorialContour::new(9.0, 20.0, 60);
        let last = *contour.azimuths.last().unwrap();
        assert!(last < 2.0 * PI);
        assert_abs_diff_eq!(2.0 * PI - last, 2.0 * PI / 60.0, epsilon = 1e-12);
    }

    #[test]
    fn acceptance_is_strict() {
        let line = |r: f64| TracedFieldLine {
            start: na::Vector3::new(8.0, 0.0, 0.0),
            path: vec![],
            terminal: na::Vector3::new(0.0, 0.0, r),
        };
        assert!(line(4.999).is_accepted(5.0));
        assert!(!line(5.0).is_accepted(5.0));
        assert!(!line(5.001).is_accepted(5.0));
    }
}
