use ndarray::ArrayD;
use rand::Rng;
use rand::distributions::{Distribution, Standard};

use crate::domain::shape::Shape;

/// Source of independent uniform variates on `[0, 1)`.
///
/// This is the only source of randomness the samplers use. Every `rand::Rng`
/// is one, so a seeded `StdRng` makes a run reproducible.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;

    /// Draws one batch of variates in row-major order.
    fn uniform_array(&mut self, shape: &Shape) -> ArrayD<f64> {
        ArrayD::from_shape_simple_fn(shape.to_ix(), || self.next_uniform())
    }
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        Standard.sample(self)
    }
}
