use ndarray::ArrayD;

use crate::services::uniform_source::UniformSource;

// A UniformSource that replays a fixed sequence and counts its draws
pub struct FixedUniforms {
    values: Vec<f64>,
    pub draws: usize,
}

impl FixedUniforms {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            draws: 0,
        }
    }
}

impl UniformSource for FixedUniforms {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.draws % self.values.len()];
        self.draws += 1;
        value
    }
}

pub fn values<T: Copy>(samples: &ArrayD<T>) -> Vec<T> {
    samples.iter().copied().collect()
}

pub fn min_max_mean(samples: &ArrayD<f64>) -> (f64, f64, f64) {
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max, mean(samples))
}

pub fn mean(samples: &ArrayD<f64>) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

pub fn variance(samples: &ArrayD<f64>) -> f64 {
    let mean = mean(samples);
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (samples.len() as f64 - 1.0)
}
