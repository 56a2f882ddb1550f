use serde::{Deserialize, Serialize};

use crate::domain::shape::ShapeDescriptor;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    Triangular,
    Pert,
}

impl DistributionKind {
    pub fn name(&self) -> &'static str {
        match self {
            DistributionKind::Triangular => "triangular",
            DistributionKind::Pert => "pert",
        }
    }
}

/// One named quantity to sample.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanVariable {
    pub name: String,
    pub distribution: DistributionKind,
    pub bounds: Vec<f64>,
    pub shape: ShapeDescriptor,
    pub mode_first: bool,
    /// PERT only; `None` means the default.
    pub lambda: Option<f64>,
    /// PERT only; points at which to report the density.
    pub density_at: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPlan {
    pub seed: Option<u64>,
    pub variables: Vec<PlanVariable>,
}
