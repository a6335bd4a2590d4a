use super::rotation_frame::RotationFrame;
use super::spherical::spherical_to_cartesian;
use super::subsolar::SolarEphemeris;
use crate::errors::AuroraError;
use crate::models::Pole;
use hifitime::Epoch;
use log::debug;
use nalgebra as na;

/// Geocentric Solar Magnetospheric frame at one instant.
///
/// X points at the Sun, Y is perpendicular to the dipole axis and the Sun
/// line, Z completes the right-handed set (dipole axis lies in X-Z).
#[derive(Debug, Clone, PartialEq)]
pub struct GsmFrame {
    basis: na::Matrix3<f64>, // columns: GSM axes expressed in geographic coordinates
    tilt: f64,
}

impl GsmFrame {
    /// Builds the frame from geographic unit vectors of the Sun and the
    /// northern dipole axis.
    pub fn new(sun: &na::Vector3<f64>, dipole_axis: &na::Vector3<f64>) -> Result<Self, AuroraError> {
        let x = sun.normalize();
        let y = dipole_axis.cross(&x);
        if y.magnitude() < 1e-12 {
            return Err(AuroraError::domain(
                "GSM frame (Sun aligned with dipole axis)",
                x.dot(dipole_axis),
            ));
        }
        let y = y.normalize();
        let z = x.cross(&y);
        let tilt = dipole_axis.normalize().dot(&x).clamp(-1.0, 1.0).asin();

        Ok(Self {
            basis: na::Matrix3::from_columns(&[x, y, z]),
            tilt,
        })
    }

    pub fn at<E: SolarEphemeris + ?Sized>(ephemeris: &E, epoch: Epoch) -> Result<Self, AuroraError> {
        let (lat, lon) = ephemeris.subsolar_point(epoch)?;
        let sun = spherical_to_cartesian(lat.to_radians(), lon.to_radians());
        let dipole_axis = RotationFrame::for_pole(Pole::North).dipole_axis();
        let frame = Self::new(&sun, &dipole_axis)?;
        debug!("{}: dipole tilt {:.2} deg", epoch, frame.tilt.to_degrees());
        Ok(frame)
    }

    /// Dipole tilt angle (radians), positive when the northern dipole pole leans sunward
    pub fn dipole_tilt(&self) -> f64 {
        self.tilt
    }

    /// Northern dipole axis expressed in GSM
    pub fn dipole_axis_gsm(&self) -> na::Vector3<f64> {
        na::Vector3::new(self.tilt.sin(), 0.0, self.tilt.cos())
    }

    pub fn to_geographic(&self, v_gsm: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.basis * v_gsm
    }

    pub fn to_gsm(&self, v_geo: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.basis.transpose() * v_geo
    }
}
