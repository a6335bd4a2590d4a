use crate::constants::*;
use crate::errors::AuroraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Magnetic pole whose auroral oval is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pole {
    North,
    South,
}

/// Per-pole constants, indexed by `Pole::index`.
struct PoleTable {
    latitude: f64,
    longitude: f64,
    trace_direction: f64,
    hemisphere_sign: f64,
}

const POLE_TABLE: [PoleTable; 2] = [
    PoleTable {
        latitude: NORTH_DIPOLE_POLE_LAT,
        longitude: NORTH_DIPOLE_POLE_LON,
        trace_direction: -1.0,
        hemisphere_sign: 1.0,
    },
    PoleTable {
        latitude: SOUTH_DIPOLE_POLE_LAT,
        longitude: SOUTH_DIPOLE_POLE_LON,
        trace_direction: 1.0,
        hemisphere_sign: -1.0,
    },
];

impl Pole {
    pub const ALL: [Pole; 2] = [Pole::North, Pole::South];

    fn index(self) -> usize {
        match self {
            Pole::North => 0,
            Pole::South => 1,
        }
    }

    fn table(self) -> &'static PoleTable {
        &POLE_TABLE[self.index()]
    }

    /// Geographic latitude of the dipole pole (degrees)
    pub fn latitude(self) -> f64 {
        self.table().latitude
    }

    /// Geographic longitude of the dipole pole (degrees)
    pub fn longitude(self) -> f64 {
        self.table().longitude
    }

    /// Sign handed to the field-line tracer: -1 follows B (towards the north),
    /// +1 runs antiparallel to B (towards the south).
    pub fn trace_direction(self) -> f64 {
        self.table().trace_direction
    }

    /// +1 for the northern hemisphere, -1 for the southern one
    pub fn hemisphere_sign(self) -> f64 {
        self.table().hemisphere_sign
    }
}

impl fmt::Display for Pole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pole::North => write!(f, "north"),
            Pole::South => write!(f, "south"),
        }
    }
}

impl FromStr for Pole {
    type Err = AuroraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Pole::North),
            "south" | "s" => Ok(Pole::South),
            other => Err(AuroraError::Configuration(format!(
                "unknown pole \"{}\", expected north or south",
                other
            ))),
        }
    }
}
