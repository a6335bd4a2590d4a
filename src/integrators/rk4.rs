use crate::physics::dynamics::FieldLineSystem;

/// Classic fourth-order Runge-Kutta stepper over any `FieldLineSystem`.
pub struct RK4<'a, T: FieldLineSystem> {
    system: &'a T,
}

impl<'a, T: FieldLineSystem> RK4<'a, T>
where
    T::State: Clone + std::ops::Add<Output = T::State> + std::ops::Mul<f64, Output = T::State>,
{
    pub fn new(system: &'a T) -> Self {
        RK4 { system }
    }

    /// Advances `state` by one step of length `ds`
    pub fn step(&self, state: &T::State, ds: f64) -> T::State {
        let k1 = self.system.compute_derivative(state);

        let state2 = state.clone() + k1.clone() * (ds / 2.0);
        let k2 = self.system.compute_derivative(&state2);

        let state3 = state.clone() + k2.clone() * (ds / 2.0);
        let k3 = self.system.compute_derivative(&state3);

        let state4 = state.clone() + k3.clone() * ds;
        let k4 = self.system.compute_derivative(&state4);

        state.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (ds / 6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra as na;

    /// Unit-speed rotation about z: dr/ds = z x r / |r|
    struct Circle;

    impl FieldLineSystem for Circle {
        type State = na::Vector3<f64>;

        fn compute_derivative(&self, state: &Self::State) -> Self::State {
            na::Vector3::z().cross(state) / state.magnitude()
        }
    }

    #[test]
    fn follows_a_circle() {
        let integrator = RK4::new(&Circle);
        let mut r = na::Vector3::new(1.0, 0.0, 0.0);
        let steps = 1000;
        let ds = std::f64::consts::PI / 2.0 / steps as f64;
        for _ in 0..steps {
            r = integrator.step(&r, ds);
        }
        assert_abs_diff_eq!(r, na::Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-9);
    }
}
