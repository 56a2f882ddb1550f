//! Triangular and PERT sampling from three-point `[min, most likely, max]`
//! estimates.

pub mod domain;
pub mod services;

#[cfg(test)]
mod test_support;

pub use domain::estimate::ThreePointEstimate;
pub use domain::quantity::{Days, Quantity};
pub use domain::shape::{Shape, ShapeDescriptor};
pub use services::beta_pert_sampler::{
    BetaPertSampler, PertDensity, PertSamples, PertShape, pert_density, sample_pert,
    sample_pert_with_density, sample_pert_with_rng,
};
pub use services::three_point_sampler::{SamplerError, ThreePointSampler};
pub use services::triangular_sampler::{
    TriangularSampler, sample_triangular, sample_triangular_with_rng,
};
