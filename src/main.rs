use aurora_oval::config::TracingConfig;
use aurora_oval::data::{band_curves, write_curves, LabelledCurve, OmniFile};
use aurora_oval::models::{
    BoundaryKind, BoundarySelector, DrivingParameterSource, DrivingParameters, OvalBand, Pole,
};
use aurora_oval::physics::{
    DipoleTracer, OvalModel, PressureScaledModel, StarkovModel, TracedOvalModel,
};
use env_logger::{Builder, Env, Target};
use hifitime::Epoch;
use log::info;
use std::env;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    // Driving conditions: an OMNI extract row if given, a fixed moderate scenario otherwise
    let mut args = env::args().skip(1);
    let params = match args.next() {
        Some(path) => {
            let row = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(0);
            let omni = OmniFile::from_path(&path)?;
            info!("using row {} of {} from {}", row, omni.len(), path);
            omni.read(row)?
        }
        None => {
            let epoch = Epoch::from_gregorian_utc(2025, 1, 1, 15, 0, 0, 0);
            DrivingParameters::new(
                epoch,
                2.0,   // Pdyn (nPa)
                -20.0, // Dst (nT)
                1.0,   // By (nT)
                -3.0,  // Bz (nT)
                2.7,   // Kp
            )?
        }
    };
    let epoch = params.epoch;
    info!(
        "{}: Pdyn {} nPa, Dst {} nT, By {} nT, Bz {} nT, Kp {} (class {})",
        epoch, params.pressure, params.dst, params.by, params.bz, params.kp, params.kp_class
    );

    let poleward = StarkovModel::new(BoundarySelector::Poleward);
    let equatorward = StarkovModel::new(BoundarySelector::Equatorward);
    let diffuse = StarkovModel::new(BoundarySelector::Diffuse);
    let scaled_poleward = PressureScaledModel::new(BoundarySelector::Poleward);
    let scaled_equatorward = PressureScaledModel::new(BoundarySelector::Equatorward);
    let traced_outer =
        TracedOvalModel::new(DipoleTracer::new(), BoundaryKind::Outer, TracingConfig::default())?;
    let traced_inner =
        TracedOvalModel::new(DipoleTracer::new(), BoundaryKind::Inner, TracingConfig::default())?;

    let mut bands: Vec<(&str, OvalBand)> = Vec::new();
    let mut diffuse_curves = Vec::new();
    for pole in Pole::ALL {
        bands.push((
            poleward.name(),
            OvalBand::new(
                poleward.compute_oval(&params, epoch, pole)?,
                equatorward.compute_oval(&params, epoch, pole)?,
            )?,
        ));
        bands.push((
            scaled_poleward.name(),
            OvalBand::new(
                scaled_poleward.compute_oval(&params, epoch, pole)?,
                scaled_equatorward.compute_oval(&params, epoch, pole)?,
            )?,
        ));
        bands.push((
            traced_outer.name(),
            OvalBand::new(
                traced_outer.compute_oval(&params, epoch, pole)?,
                traced_inner.compute_oval(&params, epoch, pole)?,
            )?,
        ));
        diffuse_curves.push(diffuse.compute_oval(&params, epoch, pole)?);
    }

    for (model, band) in &bands {
        info!(
            "{} {}: {} poleward / {} equatorward points",
            model,
            band.pole(),
            band.poleward.len(),
            band.equatorward.len()
        );
    }

    let mut curves: Vec<LabelledCurve> = bands
        .iter()
        .flat_map(|(model, band)| band_curves(model, band))
        .collect();
    curves.extend(diffuse_curves.iter().map(|curve| LabelledCurve {
        model: diffuse.name(),
        boundary: "diffuse",
        curve,
    }));

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("ovals.csv");
    let rows = write_curves(File::create(&path)?, &curves)?;

    info!("wrote {} points to {}", rows, path.display());
    Ok(())
}
