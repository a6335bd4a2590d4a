pub mod gsm;
pub mod rotation_frame;
pub mod spherical;
pub mod subsolar;

pub use gsm::GsmFrame;
pub use rotation_frame::RotationFrame;
pub use subsolar::{magnetic_longitude_offset, AnalyticSun, MltCorrection, SolarEphemeris};
