pub mod config;
pub mod constants;
pub mod coordinates;
pub mod data;
pub mod errors;
pub mod integrators;
pub mod models;
pub mod physics;
