pub mod oval;

pub use oval::{
    ContourRadii, ExternalModel, InternalModel, RadiusPair, ScalingConfig, StarkovConfig,
    TracingConfig,
};
