use crate::constants::PI;
use nalgebra as na;

/// Unit vector for a latitude/longitude pair given in radians
pub fn spherical_to_cartesian(latitude: f64, longitude: f64) -> na::Vector3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    na::Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Latitude and longitude (radians) of a Cartesian vector of any length
pub fn cartesian_to_spherical(v: &na::Vector3<f64>) -> (f64, f64) {
    let r = v.magnitude();
    let latitude = (v.z / r).clamp(-1.0, 1.0).asin();
    let longitude = v.y.atan2(v.x);
    (latitude, longitude)
}

/// Same as `cartesian_to_spherical`, in degrees with longitude in (-180, 180]
pub fn cartesian_to_lat_lon_degrees(v: &na::Vector3<f64>) -> (f64, f64) {
    let (latitude, longitude) = cartesian_to_spherical(v);
    (
        latitude.to_degrees(),
        normalize_longitude(longitude.to_degrees()),
    )
}

/// Wraps an angle in radians into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Wraps a longitude in degrees into (-180, 180]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(190.0, -170.0; "past the antimeridian")]
    #[test_case(-180.0, 180.0; "minus 180 maps to plus 180")]
    #[test_case(180.0, 180.0; "plus 180 is kept")]
    #[test_case(-540.0, 180.0; "several turns")]
    #[test_case(45.0, 45.0; "already normalised")]
    fn longitude_wrapping(input: f64, expected: f64) {
        assert_abs_diff_eq!(normalize_longitude(input), expected, epsilon = 1e-9);
    }

    #[test]
    fn angle_wrapping_is_half_open() {
        assert_abs_diff_eq!(normalize_angle(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn spherical_round_trip() {
        let (lat, lon) = (0.7_f64, -2.1_f64);
        let v = spherical_to_cartesian(lat, lon) * 3.5;
        let (lat2, lon2) = cartesian_to_spherical(&v);
        assert_abs_diff_eq!(lat, lat2, epsilon = 1e-12);
        assert_abs_diff_eq!(lon, lon2, epsilon = 1e-12);
    }
}
