pub mod estimate;
pub mod quantity;
pub mod sampling_plan;
pub mod shape;
