//! Hourly OMNIWeb extracts.
//!
//! Each row carries `year doy hour By Bz Pdyn Kp*10 Dst`, whitespace
//! separated, with IMF components in GSM.

use crate::errors::AuroraError;
use crate::models::{DrivingParameterSource, DrivingParameters};
use csv::{ReaderBuilder, Trim};
use hifitime::{Duration, Epoch};
use log::{debug, warn};
use std::fs;
use std::path::Path;

const FIELDS: usize = 8;

// OMNI fill values, anything at or above is missing data
const FILL_IMF: f64 = 999.9;
const FILL_PRESSURE: f64 = 99.99;
const FILL_KP10: f64 = 99.0;
const FILL_DST: f64 = 99999.0;

/// One raw hourly row, values as found in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OmniRecord {
    pub year: i32,
    pub day_of_year: u16,
    pub hour: u8,
    pub by: f64,
    pub bz: f64,
    pub pressure: f64,
    pub kp10: f64,
    pub dst: f64,
}

impl OmniRecord {
    pub fn epoch(&self) -> Epoch {
        let hours = (self.day_of_year as f64 - 1.0) * 24.0 + self.hour as f64;
        Epoch::from_gregorian_utc_at_midnight(self.year, 1, 1)
            + Duration::from_seconds(hours * 3600.0)
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.by.abs() >= FILL_IMF {
            missing.push("By");
        }
        if self.bz.abs() >= FILL_IMF {
            missing.push("Bz");
        }
        if self.pressure >= FILL_PRESSURE {
            missing.push("Pdyn");
        }
        if self.kp10 >= FILL_KP10 {
            missing.push("Kp");
        }
        if self.dst.abs() >= FILL_DST {
            missing.push("Dst");
        }
        missing
    }

    /// Driving parameters for this hour, failing on fill values.
    pub fn to_driving_parameters(&self) -> Result<DrivingParameters, AuroraError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(AuroraError::UpstreamUnavailable(format!(
                "OMNI {} day {} hour {}: fill value for {}",
                self.year,
                self.day_of_year,
                self.hour,
                missing.join(", ")
            )));
        }
        DrivingParameters::new(
            self.epoch(),
            self.pressure,
            self.dst,
            self.by,
            self.bz,
            self.kp10 / 10.0,
        )
    }
}

/// Parsed OMNI extract, rows in file order.
#[derive(Debug, Clone, Default)]
pub struct OmniFile {
    records: Vec<OmniRecord>,
}

impl OmniFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AuroraError> {
        let data = fs::read(path.as_ref())?;
        debug!("reading OMNI extract {}", path.as_ref().display());
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, AuroraError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .trim(Trim::All)
            .from_reader(data);

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < FIELDS {
                warn!("skipping short OMNI row {:?}", fields);
                continue;
            }

            let values = fields[..FIELDS]
                .iter()
                .map(|f| f.parse::<f64>())
                .collect::<Result<Vec<_>, _>>()?;
            records.push(parse_record(&values)?);
        }

        if records.is_empty() {
            return Err(AuroraError::UpstreamUnavailable(
                "OMNI extract holds no data rows".to_string(),
            ));
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[OmniRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_record(values: &[f64]) -> Result<OmniRecord, AuroraError> {
    let (year, doy, hour) = (values[0], values[1], values[2]);
    if year.fract() != 0.0 || !(1.0..=9999.0).contains(&year) {
        return Err(AuroraError::domain("OMNI year", year));
    }
    if doy.fract() != 0.0 || !(1.0..=366.0).contains(&doy) {
        return Err(AuroraError::domain("OMNI day of year", doy));
    }
    if hour.fract() != 0.0 || !(0.0..=23.0).contains(&hour) {
        return Err(AuroraError::domain("OMNI hour", hour));
    }

    Ok(OmniRecord {
        year: year as i32,
        day_of_year: doy as u16,
        hour: hour as u8,
        by: values[3],
        bz: values[4],
        pressure: values[5],
        kp10: values[6],
        dst: values[7],
    })
}

impl DrivingParameterSource for OmniFile {
    fn read(&self, selector: usize) -> Result<DrivingParameters, AuroraError> {
        let record = self.records.get(selector).ok_or_else(|| {
            AuroraError::UpstreamUnavailable(format!(
                "row {} requested from an OMNI extract of {} rows",
                selector,
                self.records.len()
            ))
        })?;
        record.to_driving_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SAMPLE: &str = "\
2025   1  0   3.1  -4.2  2.15 27   -18
2025   1  1   2.9  -5.0  2.40 33   -22

2025  32 12 999.9 999.9 99.99 99 99999
";

    #[test]
    fn parses_rows_in_order() {
        let omni = OmniFile::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(omni.len(), 3);

        let params = omni.read(1).unwrap();
        assert_abs_diff_eq!(params.pressure, 2.40);
        assert_abs_diff_eq!(params.dst, -22.0);
        assert_abs_diff_eq!(params.by, 2.9);
        assert_abs_diff_eq!(params.bz, -5.0);
        assert_abs_diff_eq!(params.kp, 3.3, epsilon = 1e-12);
        assert_eq!(params.kp_class, 4);
        assert_eq!(params.epoch, Epoch::from_gregorian_utc(2025, 1, 1, 1, 0, 0, 0));
    }

    #[test]
    fn day_of_year_maps_to_calendar_date() {
        let omni = OmniFile::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            omni.records()[2].epoch(),
            Epoch::from_gregorian_utc(2025, 2, 1, 12, 0, 0, 0)
        );
    }

    #[test]
    fn fill_values_and_missing_rows_are_unavailable() {
        let omni = OmniFile::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert!(matches!(omni.read(2), Err(AuroraError::UpstreamUnavailable(_))));
        assert!(matches!(omni.read(9), Err(AuroraError::UpstreamUnavailable(_))));
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(matches!(
            OmniFile::from_bytes(b"2025 1 0 3.1 x -4.2 2.15 27 -18\n"),
            Err(AuroraError::ParseFloat(_))
        ));
        assert!(matches!(
            OmniFile::from_bytes(b"2025 1 25 3.1 -4.2 2.15 27 -18\n"),
            Err(AuroraError::Domain { .. })
        ));
        assert!(OmniFile::from_bytes(b"\n\n").is_err());
    }
}
