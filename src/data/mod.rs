pub mod export;
pub mod omni;

pub use export::{band_curves, write_curves, LabelledCurve};
pub use omni::{OmniFile, OmniRecord};
