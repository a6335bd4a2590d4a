pub mod driving;
pub mod field_line;
pub mod oval;
pub mod pole;

pub use driving::{kp_class, DrivingParameterSource, DrivingParameters};
pub use field_line::{EquatorialContour, TracedFieldLine};
pub use oval::{BoundaryKind, BoundarySelector, OvalBand, OvalCurve, OvalPoint};
pub use pole::Pole;
