use nalgebra as na;

/// An autonomous first-order system `dy/ds = f(y)` advanced by the integrators.
pub trait FieldLineSystem {
    type State;

    fn compute_derivative(&self, state: &Self::State) -> Self::State;
}

/// Magnetic field model evaluated in GSM coordinates (Earth radii in, nT out).
pub trait MagneticField {
    fn field(&self, position: &na::Vector3<f64>) -> na::Vector3<f64>;
}

/// Unit-speed flow along a field line.
///
/// `direction` follows the tracer convention: -1 moves parallel to B,
/// +1 antiparallel.
pub struct FieldLineFlow<'a, F: MagneticField> {
    field: &'a F,
    direction: f64,
}

impl<'a, F: MagneticField> FieldLineFlow<'a, F> {
    pub fn new(field: &'a F, direction: f64) -> Self {
        Self { field, direction }
    }
}

impl<'a, F: MagneticField> FieldLineSystem for FieldLineFlow<'a, F> {
    type State = na::Vector3<f64>;

    fn compute_derivative(&self, position: &na::Vector3<f64>) -> na::Vector3<f64> {
        let b = self.field.field(position);
        let magnitude = b.magnitude();
        if magnitude < f64::EPSILON {
            return na::Vector3::zeros();
        }
        b * (-self.direction / magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    struct Uniform;

    impl MagneticField for Uniform {
        fn field(&self, _position: &na::Vector3<f64>) -> na::Vector3<f64> {
            na::Vector3::new(0.0, 0.0, 250.0)
        }
    }

    #[test]
    fn flow_is_unit_speed_and_signed() {
        let r = na::Vector3::new(3.0, 0.0, 0.0);
        let parallel = FieldLineFlow::new(&Uniform, -1.0).compute_derivative(&r);
        let antiparallel = FieldLineFlow::new(&Uniform, 1.0).compute_derivative(&r);
        assert_abs_diff_eq!(parallel, na::Vector3::z(), epsilon = 1e-15);
        assert_abs_diff_eq!(antiparallel, -na::Vector3::z(), epsilon = 1e-15);
    }
}
