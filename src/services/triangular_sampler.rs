use ndarray::ArrayD;
use rand::Rng;

use crate::domain::estimate::ThreePointEstimate;
use crate::domain::quantity::Quantity;
use crate::domain::shape::{Shape, ShapeDescriptor};
use crate::services::three_point_sampler::{
    SamplerError, ThreePointSampler, constant_samples, force_first, uniform_samples,
};
use crate::services::uniform_source::UniformSource;

/// Draws triangular samples from `bounds` using the thread-local generator.
pub fn sample_triangular<T: Quantity>(
    bounds: &[T],
    shape: impl Into<ShapeDescriptor>,
    force_mode_first: bool,
) -> Result<ArrayD<T>, SamplerError> {
    let mut rng = rand::thread_rng();
    sample_triangular_with_rng(bounds, shape, force_mode_first, &mut rng)
}

pub fn sample_triangular_with_rng<T: Quantity, U: UniformSource + ?Sized>(
    bounds: &[T],
    shape: impl Into<ShapeDescriptor>,
    force_mode_first: bool,
    uniforms: &mut U,
) -> Result<ArrayD<T>, SamplerError> {
    let estimate = ThreePointEstimate::from_bounds(bounds)?;
    let shape = Shape::resolve(shape)?;
    Ok(sample_estimate(&estimate, &shape, force_mode_first, uniforms))
}

fn sample_estimate<T: Quantity, U: UniformSource + ?Sized>(
    estimate: &ThreePointEstimate<T>,
    shape: &Shape,
    force_mode_first: bool,
    uniforms: &mut U,
) -> ArrayD<T> {
    if estimate.is_degenerate() {
        return constant_samples(estimate, shape);
    }

    let u = uniforms.uniform_array(shape);
    let mut samples = if estimate.has_mode() {
        let t = estimate.mode_fraction();
        u.mapv(|u| estimate.rescale(inverse_cdf(t, u)))
    } else {
        uniform_samples(estimate, &u)
    };

    if force_mode_first {
        force_first(&mut samples, estimate.mode_or_midpoint());
    }
    samples
}

/// Inverse CDF of the standard triangular distribution on `[0, 1]` with its
/// mode at `t`.
fn inverse_cdf(t: f64, u: f64) -> f64 {
    if u <= t {
        (t * u).sqrt()
    } else {
        1.0 - ((1.0 - t) * (1.0 - u)).sqrt()
    }
}

pub struct TriangularSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> TriangularSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<T: Quantity, R: Rng> ThreePointSampler<T> for TriangularSampler<R> {
    fn sample(
        &mut self,
        bounds: &[T],
        shape: &Shape,
        force_mode_first: bool,
    ) -> Result<ArrayD<T>, SamplerError> {
        sample_triangular_with_rng(bounds, shape.clone(), force_mode_first, &mut self.rng)
    }
}
