use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::domain::sampling_plan::{DistributionKind, PlanVariable, SamplingPlan};
use crate::domain::shape::Shape;
use crate::services::beta_pert_sampler::{BetaPertSampler, DEFAULT_LAMBDA, pert_density};
use crate::services::sample_output::{DensityPoint, SampleRecord, SampleReport, flatten_samples};
use crate::services::sampling_plan_yaml::{SamplingPlanError, load_sampling_plan_from_yaml_file};
use crate::services::special_functions::StatrsBeta;
use crate::services::three_point_sampler::{SamplerError, ThreePointSampler};
use crate::services::triangular_sampler::TriangularSampler;

#[derive(Error, Debug)]
pub enum PlanRunError {
    #[error("failed to load sampling plan: {0}")]
    LoadPlan(#[from] SamplingPlanError),
    #[error("failed to sample {name}: {source}")]
    Sample {
        name: String,
        #[source]
        source: SamplerError,
    },
}

pub fn run_plan_from_yaml_file(path: &str) -> Result<SampleReport, PlanRunError> {
    let plan = load_sampling_plan_from_yaml_file(path)?;
    let mut report = run_plan(&plan)?;
    report.data_source = Some(data_source_name(path));
    Ok(report)
}

/// Samples every variable of `plan` from one generator, seeded from the plan
/// when it names a seed.
pub fn run_plan(plan: &SamplingPlan) -> Result<SampleReport, PlanRunError> {
    let mut rng = match plan.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_plan_with_rng(plan, &mut rng)
}

pub fn run_plan_with_rng<R: Rng>(
    plan: &SamplingPlan,
    rng: &mut R,
) -> Result<SampleReport, PlanRunError> {
    let samples = plan
        .variables
        .iter()
        .map(|variable| {
            sample_variable(variable, rng).map_err(|source| PlanRunError::Sample {
                name: variable.name.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SampleReport {
        data_source: None,
        seed: plan.seed,
        samples,
    })
}

fn sample_variable<R: Rng>(
    variable: &PlanVariable,
    rng: &mut R,
) -> Result<SampleRecord, SamplerError> {
    let shape = Shape::resolve(variable.shape.clone())?;
    let mut sampler: Box<dyn ThreePointSampler<f64> + '_> = match variable.distribution {
        DistributionKind::Triangular => Box::new(TriangularSampler::new(&mut *rng)),
        DistributionKind::Pert => Box::new(BetaPertSampler::with_lambda(
            &mut *rng,
            variable.lambda.unwrap_or(DEFAULT_LAMBDA),
        )),
    };
    let drawn = sampler.sample(&variable.bounds, &shape, variable.mode_first)?;

    let density = if variable.density_at.is_empty() {
        Vec::new()
    } else {
        let density = pert_density(&variable.bounds, variable.lambda, &StatrsBeta)?;
        variable
            .density_at
            .iter()
            .map(|&x| DensityPoint {
                x,
                density: density.evaluate(x),
            })
            .collect()
    };

    let (shape, values) = flatten_samples(&drawn);
    Ok(SampleRecord {
        name: variable.name.clone(),
        distribution: variable.distribution,
        bounds: variable.bounds.clone(),
        lambda: match variable.distribution {
            DistributionKind::Triangular => None,
            DistributionKind::Pert => Some(variable.lambda.unwrap_or(DEFAULT_LAMBDA)),
        },
        mode_first: variable.mode_first,
        shape,
        values,
        density,
    })
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
