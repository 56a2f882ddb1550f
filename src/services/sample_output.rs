use std::io::{self, Write};

use clap::ValueEnum;
use ndarray::ArrayD;
use serde::Serialize;
use thiserror::Error;

use crate::domain::sampling_plan::DistributionKind;

#[derive(Error, Debug)]
pub enum SampleOutputError {
    #[error("failed to serialize yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write samples: {0}")]
    Write(#[from] io::Error),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Samples of one variable, flattened in row-major order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SampleRecord {
    pub name: String,
    pub distribution: DistributionKind,
    pub bounds: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    pub mode_first: bool,
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub density: Vec<DensityPoint>,
}

/// Splits an array into its dimension list and row-major values.
pub fn flatten_samples(samples: &ArrayD<f64>) -> (Vec<usize>, Vec<f64>) {
    (samples.shape().to_vec(), samples.iter().copied().collect())
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SampleReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    pub seed: Option<u64>,
    pub samples: Vec<SampleRecord>,
}

pub fn serialize_report<W: Write>(
    writer: &mut W,
    report: &SampleReport,
    format: OutputFormat,
) -> Result<(), SampleOutputError> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(report)?;
            writer.write_all(yaml.as_bytes())?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, report)?;
            writer.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_report() -> SampleReport {
        let samples = ArrayD::from_shape_vec(vec![2_usize, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let (shape, values) = flatten_samples(&samples);
        SampleReport {
            data_source: Some("plan.yaml".to_string()),
            seed: Some(7),
            samples: vec![SampleRecord {
                name: "duration".to_string(),
                distribution: DistributionKind::Pert,
                bounds: vec![1.0, 2.0, 4.0],
                lambda: Some(4.0),
                mode_first: false,
                shape,
                values,
                density: vec![DensityPoint {
                    x: 2.0,
                    density: 0.5,
                }],
            }],
        }
    }

    #[test]
    fn flatten_samples_keeps_row_major_order() {
        let report = build_report();
        assert_eq!(report.samples[0].shape, vec![2, 2]);
        assert_eq!(report.samples[0].values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn serializes_yaml() {
        let mut buf = Vec::new();
        serialize_report(&mut buf, &build_report(), OutputFormat::Yaml).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("data_source: plan.yaml"));
        assert!(output.contains("seed: 7"));
        assert!(output.contains("name: duration"));
        assert!(output.contains("distribution: pert"));
        assert!(output.contains("lambda: 4.0"));
        assert!(output.contains("density:"));
    }

    #[test]
    fn serializes_json() {
        let mut buf = Vec::new();
        serialize_report(&mut buf, &build_report(), OutputFormat::Json).unwrap();
        let output: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(output["seed"], 7);
        assert_eq!(output["samples"][0]["distribution"], "pert");
        assert_eq!(output["samples"][0]["values"][3], 4.0);
    }

    #[test]
    fn omits_empty_optional_fields() {
        let mut report = build_report();
        report.data_source = None;
        report.samples[0].lambda = None;
        report.samples[0].density.clear();

        let mut buf = Vec::new();
        serialize_report(&mut buf, &report, OutputFormat::Yaml).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(!output.contains("data_source"));
        assert!(!output.contains("lambda"));
        assert!(!output.contains("density"));
    }
}
