use ndarray::ArrayD;
use thiserror::Error;

use crate::domain::estimate::{EstimateError, ThreePointEstimate};
use crate::domain::quantity::Quantity;
use crate::domain::shape::{Shape, ShapeError};
use crate::services::special_functions::SpecialFunctionError;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] EstimateError),
    #[error("invalid shape: {0}")]
    InvalidShape(#[from] ShapeError),
    #[error("lambda must be finite and non-negative, got {0}")]
    InvalidLambda(f64),
    #[error("special function failed: {0}")]
    SpecialFunction(#[from] SpecialFunctionError),
    #[error("failed to lay out samples: {0}")]
    Layout(#[from] ndarray::ShapeError),
}

impl SamplerError {
    /// Errors caused by the caller's arguments rather than by the numerics.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SamplerError::InvalidBounds(_)
                | SamplerError::InvalidShape(_)
                | SamplerError::InvalidLambda(_)
        )
    }
}

/// A sampler driven by a three-point `[a, m, b]` bounds vector.
pub trait ThreePointSampler<T: Quantity> {
    fn sample(
        &mut self,
        bounds: &[T],
        shape: &Shape,
        force_mode_first: bool,
    ) -> Result<ArrayD<T>, SamplerError>;
}

/// Every element is the constant `a`; no variates are drawn.
pub(crate) fn constant_samples<T: Quantity>(
    estimate: &ThreePointEstimate<T>,
    shape: &Shape,
) -> ArrayD<T> {
    ArrayD::from_elem(shape.to_ix(), estimate.optimistic)
}

/// `a + u * (b - a)`, used when the estimate has no mode.
pub(crate) fn uniform_samples<T: Quantity>(
    estimate: &ThreePointEstimate<T>,
    uniforms: &ArrayD<f64>,
) -> ArrayD<T> {
    uniforms.mapv(|u| estimate.rescale(u))
}

/// Overwrites the first element in row-major order.
pub(crate) fn force_first<T: Quantity>(samples: &mut ArrayD<T>, value: T) {
    if let Some(first) = samples.iter_mut().next() {
        *first = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_samples_fill_the_whole_shape() {
        let estimate = ThreePointEstimate::from_bounds(&[4.0]).unwrap();
        let samples = constant_samples(&estimate, &Shape::resolve([2_usize, 3]).unwrap());
        assert_eq!(samples.shape(), &[2, 3]);
        assert!(samples.iter().all(|value| *value == 4.0));
    }

    #[test]
    fn uniform_samples_rescale_onto_the_bounds() {
        let estimate = ThreePointEstimate::from_bounds(&[2.0, f64::NAN, 4.0]).unwrap();
        let uniforms = ArrayD::from_shape_vec(vec![3_usize], vec![0.0, 0.5, 0.75]).unwrap();
        let samples = uniform_samples(&estimate, &uniforms);
        assert_eq!(samples.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0, 3.5]);
    }

    #[test]
    fn force_first_replaces_only_the_first_element() {
        let mut samples = ArrayD::from_elem(vec![2_usize, 2], 1.0);
        force_first(&mut samples, 9.0);
        assert_eq!(samples.iter().copied().collect::<Vec<_>>(), vec![9.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn force_first_ignores_empty_arrays() {
        let mut samples: ArrayD<f64> = ArrayD::from_elem(vec![0_usize, 3], 1.0);
        force_first(&mut samples, 9.0);
        assert!(samples.is_empty());
    }

    #[test]
    fn invalid_argument_classification() {
        assert!(SamplerError::InvalidLambda(-1.0).is_invalid_argument());
        assert!(SamplerError::from(EstimateError::InvalidLength(4)).is_invalid_argument());
        assert!(
            !SamplerError::from(SpecialFunctionError::ProbabilityOutOfRange(2.0))
                .is_invalid_argument()
        );
    }
}
