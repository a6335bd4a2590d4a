use crate::errors::AuroraError;
use crate::models::{OvalBand, OvalCurve};
use csv::Writer;
use serde::Serialize;
use std::io;

/// A curve plus the labels it is exported under.
#[derive(Debug, Clone, Copy)]
pub struct LabelledCurve<'a> {
    pub model: &'a str,
    pub boundary: &'a str,
    pub curve: &'a OvalCurve,
}

#[derive(Debug, Serialize)]
struct CurveRow<'a> {
    model: &'a str,
    boundary: &'a str,
    pole: String,
    index: usize,
    latitude: f64,
    longitude: f64,
}

/// Writes one CSV row per curve point, with a header row.
pub fn write_curves<W: io::Write>(
    writer: W,
    curves: &[LabelledCurve<'_>],
) -> Result<usize, AuroraError> {
    let mut wtr = Writer::from_writer(writer);
    let mut rows = 0;

    for labelled in curves {
        let pole = labelled.curve.pole.to_string();
        for (index, point) in labelled.curve.points.iter().enumerate() {
            wtr.serialize(CurveRow {
                model: labelled.model,
                boundary: labelled.boundary,
                pole: pole.clone(),
                index,
                latitude: point.latitude,
                longitude: point.longitude,
            })?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// Both edges of a band, labelled `poleward` and `equatorward`.
pub fn band_curves<'a>(model: &'a str, band: &'a OvalBand) -> [LabelledCurve<'a>; 2] {
    [
        LabelledCurve {
            model,
            boundary: "poleward",
            curve: &band.poleward,
        },
        LabelledCurve {
            model,
            boundary: "equatorward",
            curve: &band.equatorward,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OvalPoint, Pole};

    #[test]
    fn rows_carry_labels_and_indices() {
        let curve = OvalCurve::new(
            Pole::South,
            vec![
                OvalPoint {
                    latitude: -68.5,
                    longitude: 12.0,
                },
                OvalPoint {
                    latitude: -67.25,
                    longitude: 18.0,
                },
            ],
            2,
        );
        let mut buffer = Vec::new();
        let rows = write_curves(
            &mut buffer,
            &[LabelledCurve {
                model: "starkov",
                boundary: "diffuse",
                curve: &curve,
            }],
        )
        .unwrap();

        assert_eq!(rows, 2);
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "model,boundary,pole,index,latitude,longitude");
        assert_eq!(lines[1], "starkov,diffuse,south,0,-68.5,12.0");
        assert_eq!(lines[2], "starkov,diffuse,south,1,-67.25,18.0");
    }
}
