use super::pole::Pole;
use crate::errors::AuroraError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which edge of the oval the empirical model evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySelector {
    Poleward,
    Equatorward,
    Diffuse,
}

impl BoundarySelector {
    pub const ALL: [BoundarySelector; 3] = [
        BoundarySelector::Poleward,
        BoundarySelector::Equatorward,
        BoundarySelector::Diffuse,
    ];
}

impl TryFrom<u8> for BoundarySelector {
    type Error = AuroraError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(BoundarySelector::Poleward),
            1 => Ok(BoundarySelector::Equatorward),
            2 => Ok(BoundarySelector::Diffuse),
            other => Err(AuroraError::Configuration(format!(
                "boundary selector {} not allowed, expected 0, 1 or 2",
                other
            ))),
        }
    }
}

impl FromStr for BoundarySelector {
    type Err = AuroraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(index) = s.parse::<u8>() {
            return Self::try_from(index);
        }
        match s.as_str() {
            "poleward" => Ok(BoundarySelector::Poleward),
            "equatorward" => Ok(BoundarySelector::Equatorward),
            "diffuse" => Ok(BoundarySelector::Diffuse),
            other => Err(AuroraError::Configuration(format!(
                "unknown boundary selector \"{}\"",
                other
            ))),
        }
    }
}

impl fmt::Display for BoundarySelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundarySelector::Poleward => write!(f, "poleward"),
            BoundarySelector::Equatorward => write!(f, "equatorward"),
            BoundarySelector::Diffuse => write!(f, "diffuse"),
        }
    }
}

/// Equatorial contour traced by the field-line model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Inner,
    Outer,
}

impl FromStr for BoundaryKind {
    type Err = AuroraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inner" | "int" => Ok(BoundaryKind::Inner),
            "outer" | "ext" => Ok(BoundaryKind::Outer),
            other => Err(AuroraError::Configuration(format!(
                "unknown boundary kind \"{}\", expected inner or outer",
                other
            ))),
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryKind::Inner => write!(f, "inner"),
            BoundaryKind::Outer => write!(f, "outer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvalPoint {
    pub latitude: f64,  // geographic, degrees
    pub longitude: f64, // geographic, degrees in (-180, 180]
}

/// Ordered boundary curve in geographic coordinates.
///
/// `requested` is the number of samples the model attempted; a traced curve
/// can come back with fewer points when field lines are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct OvalCurve {
    pub pole: Pole,
    pub points: Vec<OvalPoint>,
    pub requested: usize,
}

impl OvalCurve {
    pub fn new(pole: Pole, points: Vec<OvalPoint>, requested: usize) -> Self {
        Self {
            pole,
            points,
            requested,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when some samples were dropped
    pub fn is_degraded(&self) -> bool {
        self.points.len() < self.requested
    }

    pub fn latitudes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.latitude).collect()
    }

    pub fn longitudes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.longitude).collect()
    }
}

/// Pair of curves bounding the shaded auroral region.
#[derive(Debug, Clone, PartialEq)]
pub struct OvalBand {
    pub poleward: OvalCurve,
    pub equatorward: OvalCurve,
}

impl OvalBand {
    pub fn new(poleward: OvalCurve, equatorward: OvalCurve) -> Result<Self, AuroraError> {
        if poleward.pole != equatorward.pole {
            return Err(AuroraError::Configuration(format!(
                "band edges belong to different poles ({} and {})",
                poleward.pole, equatorward.pole
            )));
        }
        Ok(Self {
            poleward,
            equatorward,
        })
    }

    pub fn pole(&self) -> Pole {
        self.poleward.pole
    }
}
