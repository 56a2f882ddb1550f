use std::collections::HashSet;
use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::sampling_plan::{DistributionKind, PlanVariable, SamplingPlan};
use crate::domain::shape::ShapeDescriptor;

#[derive(Error, Debug)]
pub enum SamplingPlanError {
    #[error("failed to read sampling plan: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse sampling plan yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("sampling plan has no variables")]
    EmptyPlan,
    #[error("missing variable name")]
    MissingName,
    #[error("duplicate variable name: {0}")]
    DuplicateName(String),
    #[error("lambda is only valid for pert variables: {0}")]
    UnexpectedLambda(String),
    #[error("density_at is only valid for pert variables: {0}")]
    UnexpectedDensityPoints(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SamplingPlanRecord {
    seed: Option<u64>,
    variables: Vec<VariableRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VariableRecord {
    name: String,
    distribution: DistributionKind,
    bounds: Vec<f64>,
    #[serde(default)]
    shape: ShapeDescriptor,
    #[serde(default)]
    mode_first: bool,
    lambda: Option<f64>,
    #[serde(default)]
    density_at: Vec<f64>,
}

pub fn load_sampling_plan_from_yaml_file(path: &str) -> Result<SamplingPlan, SamplingPlanError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_sampling_plan_from_yaml_str(&contents)
}

pub fn deserialize_sampling_plan_from_yaml_str(
    input: &str,
) -> Result<SamplingPlan, SamplingPlanError> {
    let record: SamplingPlanRecord = serde_yaml::from_str(input)?;
    if record.variables.is_empty() {
        return Err(SamplingPlanError::EmptyPlan);
    }

    let mut seen = HashSet::new();
    let mut variables = Vec::with_capacity(record.variables.len());
    for variable in record.variables {
        let name = variable.name.trim().to_string();
        if name.is_empty() {
            return Err(SamplingPlanError::MissingName);
        }
        if !seen.insert(name.clone()) {
            return Err(SamplingPlanError::DuplicateName(name));
        }
        if variable.distribution == DistributionKind::Triangular {
            if variable.lambda.is_some() {
                return Err(SamplingPlanError::UnexpectedLambda(name));
            }
            if !variable.density_at.is_empty() {
                return Err(SamplingPlanError::UnexpectedDensityPoints(name));
            }
        }

        variables.push(PlanVariable {
            name,
            distribution: variable.distribution,
            bounds: variable.bounds,
            shape: variable.shape,
            mode_first: variable.mode_first,
            lambda: variable.lambda,
            density_at: variable.density_at,
        });
    }

    Ok(SamplingPlan {
        seed: record.seed,
        variables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plan_with_defaults() {
        let yaml = "seed: 42\nvariables:\n  - name: duration\n    distribution: pert\n    bounds: [3, 5, 6]\n    shape: [1000, 1]\n    mode_first: true\n    lambda: 6\n    density_at: [4.0, 5.0]\n  - name: cost\n    distribution: triangular\n    bounds: [1, 2]\n";
        let plan = deserialize_sampling_plan_from_yaml_str(yaml).unwrap();

        assert_eq!(plan.seed, Some(42));
        assert_eq!(plan.variables.len(), 2);

        let duration = &plan.variables[0];
        assert_eq!(duration.name, "duration");
        assert_eq!(duration.distribution, DistributionKind::Pert);
        assert_eq!(duration.bounds, vec![3.0, 5.0, 6.0]);
        assert_eq!(duration.shape, ShapeDescriptor::Dims(vec![1000, 1]));
        assert!(duration.mode_first);
        assert_eq!(duration.lambda, Some(6.0));
        assert_eq!(duration.density_at, vec![4.0, 5.0]);

        let cost = &plan.variables[1];
        assert_eq!(cost.distribution, DistributionKind::Triangular);
        assert_eq!(cost.shape, ShapeDescriptor::default());
        assert!(!cost.mode_first);
        assert_eq!(cost.lambda, None);
    }

    #[test]
    fn accepts_a_scalar_shape_and_nan_mode() {
        let yaml = "variables:\n  - name: x\n    distribution: triangular\n    bounds: [0, .nan, 1]\n    shape: 3\n";
        let plan = deserialize_sampling_plan_from_yaml_str(yaml).unwrap();

        assert_eq!(plan.seed, None);
        assert_eq!(plan.variables[0].shape, ShapeDescriptor::Square(3));
        assert!(plan.variables[0].bounds[1].is_nan());
    }

    #[test]
    fn rejects_an_empty_plan() {
        let error = deserialize_sampling_plan_from_yaml_str("variables: []\n").unwrap_err();
        assert!(matches!(error, SamplingPlanError::EmptyPlan));
    }

    #[test]
    fn rejects_blank_and_duplicate_names() {
        let blank = "variables:\n  - name: ' '\n    distribution: pert\n    bounds: [1, 2]\n";
        assert!(matches!(
            deserialize_sampling_plan_from_yaml_str(blank).unwrap_err(),
            SamplingPlanError::MissingName
        ));

        let duplicate = "variables:\n  - name: a\n    distribution: pert\n    bounds: [1, 2]\n  - name: a\n    distribution: triangular\n    bounds: [1, 2]\n";
        assert!(matches!(
            deserialize_sampling_plan_from_yaml_str(duplicate).unwrap_err(),
            SamplingPlanError::DuplicateName(name) if name == "a"
        ));
    }

    #[test]
    fn rejects_pert_options_on_triangular_variables() {
        let lambda = "variables:\n  - name: a\n    distribution: triangular\n    bounds: [1, 2]\n    lambda: 3\n";
        assert!(matches!(
            deserialize_sampling_plan_from_yaml_str(lambda).unwrap_err(),
            SamplingPlanError::UnexpectedLambda(_)
        ));

        let density = "variables:\n  - name: a\n    distribution: triangular\n    bounds: [1, 2]\n    density_at: [1.5]\n";
        assert!(matches!(
            deserialize_sampling_plan_from_yaml_str(density).unwrap_err(),
            SamplingPlanError::UnexpectedDensityPoints(_)
        ));
    }

    #[test]
    fn rejects_unknown_distributions_and_fields() {
        let unknown = "variables:\n  - name: a\n    distribution: normal\n    bounds: [1, 2]\n";
        assert!(matches!(
            deserialize_sampling_plan_from_yaml_str(unknown).unwrap_err(),
            SamplingPlanError::Parse(_)
        ));

        let typo = "variables:\n  - name: a\n    distribution: pert\n    bounds: [1, 2]\n    mode_frist: true\n";
        assert!(matches!(
            deserialize_sampling_plan_from_yaml_str(typo).unwrap_err(),
            SamplingPlanError::Parse(_)
        ));
    }

    #[test]
    fn load_reports_missing_files() {
        let error = load_sampling_plan_from_yaml_file("/nonexistent/plan.yaml").unwrap_err();
        assert!(matches!(error, SamplingPlanError::Read(_)));
    }
}
