pub mod beta_pert_sampler;
pub mod plan_runner;
pub mod sample_output;
pub mod sampling_plan_yaml;
pub mod special_functions;
pub mod three_point_sampler;
pub mod triangular_sampler;
pub mod uniform_source;
