use std::io;
use std::process::ExitCode;

use threepoint::domain::sampling_plan::{DistributionKind, PlanVariable, SamplingPlan};
use threepoint::domain::shape::ShapeDescriptor;
use threepoint::services::plan_runner::run_plan;
use threepoint::services::sample_output::{OutputFormat, SampleReport, serialize_report};

use crate::commands::base_commands::Commands;

pub fn sample_command(cmd: Commands) -> ExitCode {
    let (distribution, sample, lambda, density_at) = match cmd {
        Commands::Triangular { sample } => {
            (DistributionKind::Triangular, sample, None, Vec::new())
        }
        Commands::Pert {
            sample,
            lambda,
            density_at,
        } => (DistributionKind::Pert, sample, Some(lambda), density_at),
        _ => return ExitCode::FAILURE,
    };

    let plan = SamplingPlan {
        seed: sample.seed,
        variables: vec![PlanVariable {
            name: distribution.name().to_string(),
            distribution,
            bounds: sample.bounds,
            shape: ShapeDescriptor::Dims(sample.shape),
            mode_first: sample.mode_first,
            lambda,
            density_at,
        }],
    };

    let report = match run_plan(&plan) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to sample {}: {e:?}", distribution.name());
            return ExitCode::FAILURE;
        }
    };

    write_report(&report, sample.output.as_deref(), sample.format)
}

pub fn write_report(report: &SampleReport, output: Option<&str>, format: OutputFormat) -> ExitCode {
    let Some(output) = output else {
        let mut stdout = io::stdout().lock();
        if let Err(e) = serialize_report(&mut stdout, report, format) {
            eprintln!("Failed to write samples: {e:?}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let mut file = match std::fs::File::create(output) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create output file: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = serialize_report(&mut file, report, format) {
        eprintln!("Failed to write samples: {e:?}");
        return ExitCode::FAILURE;
    }

    let count: usize = report.samples.iter().map(|record| record.values.len()).sum();
    println!("{count} samples written to {output}");
    ExitCode::SUCCESS
}
