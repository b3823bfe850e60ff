// Domain layer - Pure bathymetry types and rules
pub mod color;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod hazard;
pub mod point;
