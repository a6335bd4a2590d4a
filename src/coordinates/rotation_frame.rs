use super::spherical::{cartesian_to_lat_lon_degrees, spherical_to_cartesian};
use crate::constants::PI;
use crate::models::{OvalPoint, Pole};
use lazy_static::lazy_static;
use nalgebra as na;

lazy_static! {
    static ref NORTH_FRAME: RotationFrame = RotationFrame::new(Pole::North);
    static ref SOUTH_FRAME: RotationFrame = RotationFrame::new(Pole::South);
}

/// Rotation between dipole-centred magnetic coordinates and geographic
/// (geocentric) coordinates. The magnetic z axis points at the selected pole.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationFrame {
    pole: Pole,
    matrix: na::Matrix3<f64>,
}

impl RotationFrame {
    pub fn new(pole: Pole) -> Self {
        let lon0 = pole.longitude().to_radians();
        let lambda = PI / 2.0 - pole.latitude().to_radians();

        let (sin_lon, cos_lon) = lon0.sin_cos();
        let (sin_l, cos_l) = lambda.sin_cos();

        #[rustfmt::skip]
        let matrix = na::Matrix3::new(
            cos_lon * cos_l, -sin_lon, cos_lon * sin_l,
            sin_lon * cos_l,  cos_lon, sin_lon * sin_l,
            -sin_l,           0.0,     cos_l,
        );

        Self { pole, matrix }
    }

    /// Shared, lazily built frame for `pole`
    pub fn for_pole(pole: Pole) -> &'static RotationFrame {
        match pole {
            Pole::North => &NORTH_FRAME,
            Pole::South => &SOUTH_FRAME,
        }
    }

    pub fn pole(&self) -> Pole {
        self.pole
    }

    pub fn matrix(&self) -> &na::Matrix3<f64> {
        &self.matrix
    }

    /// R * v_mag
    pub fn to_geographic(&self, v_mag: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.matrix * v_mag
    }

    /// R^T * v_geo
    pub fn to_magnetic(&self, v_geo: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.matrix.transpose() * v_geo
    }

    /// Geographic direction of the magnetic z axis
    pub fn dipole_axis(&self) -> na::Vector3<f64> {
        self.to_geographic(&na::Vector3::z())
    }

    /// Maps a magnetic latitude/longitude (radians) to a geographic point in degrees.
    pub fn magnetic_to_geographic_point(&self, latitude: f64, longitude: f64) -> OvalPoint {
        let v_geo = self.to_geographic(&spherical_to_cartesian(latitude, longitude));
        let (latitude, longitude) = cartesian_to_lat_lon_degrees(&v_geo);
        OvalPoint {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::Rng;
    use test_case::test_case;

    #[test_case(Pole::North; "north")]
    #[test_case(Pole::South; "south")]
    fn frame_is_orthogonal(pole: Pole) {
        let r = RotationFrame::new(pole);
        let product = r.matrix() * r.matrix().transpose();
        assert_abs_diff_eq!(product, na::Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(r.matrix().determinant(), 1.0, epsilon = 1e-12);
    }

    #[test_case(Pole::North; "north")]
    #[test_case(Pole::South; "south")]
    fn random_vectors_round_trip(pole: Pole) {
        let frame = RotationFrame::for_pole(pole);
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let v = na::Vector3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if v.magnitude() < 1e-6 {
                continue;
            }
            let v = v.normalize();
            let back = frame.to_magnetic(&frame.to_geographic(&v));
            assert_abs_diff_eq!(back, v, epsilon = 1e-12);
        }
    }

    #[test_case(Pole::North; "north")]
    #[test_case(Pole::South; "south")]
    fn magnetic_pole_maps_to_dipole_location(pole: Pole) {
        let frame = RotationFrame::for_pole(pole);
        let point = frame.magnetic_to_geographic_point(PI / 2.0, 0.0);
        assert_abs_diff_eq!(point.latitude, pole.latitude(), epsilon = 1e-9);
        assert_abs_diff_eq!(point.longitude, pole.longitude(), epsilon = 1e-9);
    }
}
