use crate::constants::MAX_KP_CLASS;
use crate::errors::AuroraError;
use hifitime::Epoch;

/// Solar-wind and geomagnetic driving parameters for one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DrivingParameters {
    pub epoch: Epoch,
    pub pressure: f64, // Solar-wind dynamic pressure (nPa)
    pub dst: f64,      // Dst index (nT)
    pub by: f64,       // IMF By, GSM (nT)
    pub bz: f64,       // IMF Bz, GSM (nT)
    pub kp: f64,       // Measured Kp
    pub kp_class: u8,  // Kp class in 1..=7
}

impl DrivingParameters {
    pub fn new(
        epoch: Epoch,
        pressure: f64,
        dst: f64,
        by: f64,
        bz: f64,
        kp: f64,
    ) -> Result<Self, AuroraError> {
        if !(pressure > 0.0) || !pressure.is_finite() {
            return Err(AuroraError::domain("dynamic pressure", pressure));
        }
        Ok(Self {
            epoch,
            pressure,
            dst,
            by,
            bz,
            kp,
            kp_class: kp_class(kp)?,
        })
    }
}

/// Bins a measured Kp into half-open unit intervals: [0,1) -> 1, ..., [5,6) -> 6,
/// and everything from 6 up -> 7.
pub fn kp_class(kp: f64) -> Result<u8, AuroraError> {
    if !(kp >= 0.0) || !kp.is_finite() {
        return Err(AuroraError::domain("Kp binning", kp));
    }
    let class = kp.floor() + 1.0;
    Ok(class.min(MAX_KP_CLASS as f64) as u8)
}

/// Supplies driving parameters for a selected timestamp (row index).
pub trait DrivingParameterSource {
    fn read(&self, selector: usize) -> Result<DrivingParameters, AuroraError>;
}
