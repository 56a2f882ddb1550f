use ndarray::ArrayD;
use rand::Rng;

use crate::domain::estimate::ThreePointEstimate;
use crate::domain::quantity::Quantity;
use crate::domain::shape::{Shape, ShapeDescriptor};
use crate::services::special_functions::{BetaFunctions, StatrsBeta};
use crate::services::three_point_sampler::{
    SamplerError, ThreePointSampler, constant_samples, force_first, uniform_samples,
};
use crate::services::uniform_source::UniformSource;

pub const DEFAULT_LAMBDA: f64 = 4.0;

/// Density reported by a point mass at its location.
pub const POINT_MASS_DENSITY: f64 = f64::MAX;

/// Shape parameters of the Beta distribution behind a PERT estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PertShape {
    pub alpha: f64,
    pub beta: f64,
}

impl PertShape {
    pub const UNIFORM: PertShape = PertShape {
        alpha: 1.0,
        beta: 1.0,
    };

    /// Derives `(alpha, beta)` from the PERT mean `(a + lambda*m + b) / (lambda + 2)`.
    ///
    /// The estimate must have a mode and distinct bounds.
    pub fn derive<T: Quantity>(estimate: &ThreePointEstimate<T>, lambda: f64) -> Self {
        let a = estimate.optimistic.magnitude();
        let m = estimate.most_likely.magnitude();
        let b = estimate.pessimistic.magnitude();
        let mu = pert_mean(estimate, lambda);

        // m == mu makes the general expression 0/0. Within a few ULPs of mu
        // both differences cancel, so alpha is noisy there but stays usable.
        let alpha = if m == mu || (1.0 - m / mu).abs() < f64::EPSILON {
            lambda / 2.0 + 1.0
        } else {
            (mu - a) * (2.0 * m - a - b) / ((m - mu) * (b - a))
        };
        let beta = alpha * (b - mu) / (mu - a);
        Self { alpha, beta }
    }
}

/// The PERT mean estimate `(a + lambda*m + b) / (lambda + 2)`.
pub fn pert_mean<T: Quantity>(estimate: &ThreePointEstimate<T>, lambda: f64) -> f64 {
    let a = estimate.optimistic.magnitude();
    let m = estimate.most_likely.magnitude();
    let b = estimate.pessimistic.magnitude();
    (a + lambda * m + b) / (lambda + 2.0)
}

/// Probability density of a PERT draw.
///
/// `PointMass` stands in for a Dirac delta when both bounds coincide. It is
/// an approximation, not a density: it reports [`POINT_MASS_DENSITY`] at the
/// point itself and `0.0` everywhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PertDensity<T> {
    Beta {
        beta_shape: PertShape,
        optimistic: T,
        pessimistic: T,
        normalization: f64,
    },
    PointMass {
        at: T,
    },
}

impl<T: Quantity> PertDensity<T> {
    fn new<B: BetaFunctions + ?Sized>(
        estimate: &ThreePointEstimate<T>,
        beta_shape: Option<PertShape>,
        beta_functions: &B,
    ) -> Result<Self, SamplerError> {
        let Some(beta_shape) = beta_shape else {
            return Ok(PertDensity::PointMass {
                at: estimate.optimistic,
            });
        };
        let normalization = beta_functions.beta(beta_shape.alpha, beta_shape.beta)?;
        Ok(PertDensity::Beta {
            beta_shape,
            optimistic: estimate.optimistic,
            pessimistic: estimate.pessimistic,
            normalization,
        })
    }

    /// Density at `x`, per base unit of `T`. Zero outside the bounds.
    pub fn evaluate(&self, x: T) -> f64 {
        match *self {
            PertDensity::PointMass { at } => {
                if x == at {
                    POINT_MASS_DENSITY
                } else {
                    0.0
                }
            }
            PertDensity::Beta {
                beta_shape,
                optimistic,
                pessimistic,
                normalization,
            } => {
                let inside = (optimistic <= x && x <= pessimistic)
                    || (pessimistic <= x && x <= optimistic);
                if !inside {
                    return 0.0;
                }
                let a = optimistic.magnitude();
                let range = pessimistic.magnitude() - a;
                let z = (x.magnitude() - a) / range;
                z.powf(beta_shape.alpha - 1.0) * (1.0 - z).powf(beta_shape.beta - 1.0)
                    / (normalization * range.abs())
            }
        }
    }
}

/// Result of one PERT draw.
#[derive(Debug, Clone)]
pub struct PertSamples<T> {
    pub samples: ArrayD<T>,
    estimate: ThreePointEstimate<T>,
    beta_shape: Option<PertShape>,
}

impl<T: Quantity> PertSamples<T> {
    /// `None` when the bounds coincide.
    pub fn beta_shape(&self) -> Option<PertShape> {
        self.beta_shape
    }

    /// Builds the density of the distribution the samples were drawn from.
    /// The returned value does not borrow from `self`.
    pub fn density<B: BetaFunctions + ?Sized>(
        &self,
        beta_functions: &B,
    ) -> Result<PertDensity<T>, SamplerError> {
        PertDensity::new(&self.estimate, self.beta_shape, beta_functions)
    }

    pub fn into_samples(self) -> ArrayD<T> {
        self.samples
    }
}

/// Draws PERT samples from `bounds` using the thread-local generator.
/// `lambda` defaults to [`DEFAULT_LAMBDA`].
pub fn sample_pert<T: Quantity>(
    bounds: &[T],
    shape: impl Into<ShapeDescriptor>,
    force_mode_first: bool,
    lambda: Option<f64>,
) -> Result<ArrayD<T>, SamplerError> {
    let mut rng = rand::thread_rng();
    let drawn =
        sample_pert_with_rng(bounds, shape, force_mode_first, lambda, &mut rng, &StatrsBeta)?;
    Ok(drawn.into_samples())
}

/// Like [`sample_pert`], also returning the density function.
pub fn sample_pert_with_density<T: Quantity>(
    bounds: &[T],
    shape: impl Into<ShapeDescriptor>,
    force_mode_first: bool,
    lambda: Option<f64>,
) -> Result<(ArrayD<T>, PertDensity<T>), SamplerError> {
    let mut rng = rand::thread_rng();
    let drawn =
        sample_pert_with_rng(bounds, shape, force_mode_first, lambda, &mut rng, &StatrsBeta)?;
    let density = drawn.density(&StatrsBeta)?;
    Ok((drawn.into_samples(), density))
}

pub fn sample_pert_with_rng<T, U, B>(
    bounds: &[T],
    shape: impl Into<ShapeDescriptor>,
    force_mode_first: bool,
    lambda: Option<f64>,
    uniforms: &mut U,
    beta_functions: &B,
) -> Result<PertSamples<T>, SamplerError>
where
    T: Quantity,
    U: UniformSource + ?Sized,
    B: BetaFunctions + ?Sized,
{
    let lambda = resolve_lambda(lambda)?;
    let estimate = ThreePointEstimate::from_bounds(bounds)?;
    let shape = Shape::resolve(shape)?;

    if estimate.is_degenerate() {
        return Ok(PertSamples {
            samples: constant_samples(&estimate, &shape),
            estimate,
            beta_shape: None,
        });
    }

    let u = uniforms.uniform_array(&shape);
    let (mut samples, beta_shape) = if estimate.has_mode() {
        let beta_shape = PertShape::derive(&estimate, lambda);
        let values = u
            .iter()
            .map(|&p| {
                beta_functions
                    .inv_incomplete_beta(p, beta_shape.alpha, beta_shape.beta)
                    .map(|x| estimate.rescale(x))
            })
            .collect::<Result<Vec<T>, _>>()?;
        (ArrayD::from_shape_vec(u.raw_dim(), values)?, beta_shape)
    } else {
        (uniform_samples(&estimate, &u), PertShape::UNIFORM)
    };

    if force_mode_first {
        force_first(&mut samples, estimate.mode_or_midpoint());
    }
    Ok(PertSamples {
        samples,
        estimate,
        beta_shape: Some(beta_shape),
    })
}

/// Builds the density for `bounds` without drawing any samples.
pub fn pert_density<T, B>(
    bounds: &[T],
    lambda: Option<f64>,
    beta_functions: &B,
) -> Result<PertDensity<T>, SamplerError>
where
    T: Quantity,
    B: BetaFunctions + ?Sized,
{
    let lambda = resolve_lambda(lambda)?;
    let estimate = ThreePointEstimate::from_bounds(bounds)?;
    let beta_shape = if estimate.is_degenerate() {
        None
    } else if estimate.has_mode() {
        Some(PertShape::derive(&estimate, lambda))
    } else {
        Some(PertShape::UNIFORM)
    };
    PertDensity::new(&estimate, beta_shape, beta_functions)
}

fn resolve_lambda(lambda: Option<f64>) -> Result<f64, SamplerError> {
    let lambda = lambda.unwrap_or(DEFAULT_LAMBDA);
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(SamplerError::InvalidLambda(lambda));
    }
    Ok(lambda)
}

pub struct BetaPertSampler<R: Rng, B: BetaFunctions = StatrsBeta> {
    rng: R,
    lambda: f64,
    beta_functions: B,
}

impl<R: Rng> BetaPertSampler<R> {
    pub fn new(rng: R) -> Self {
        Self::with_lambda(rng, DEFAULT_LAMBDA)
    }

    pub fn with_lambda(rng: R, lambda: f64) -> Self {
        Self {
            rng,
            lambda,
            beta_functions: StatrsBeta,
        }
    }
}

impl<R: Rng, B: BetaFunctions> BetaPertSampler<R, B> {
    pub fn with_beta_functions(rng: R, lambda: f64, beta_functions: B) -> Self {
        Self {
            rng,
            lambda,
            beta_functions,
        }
    }

    pub fn sample_with_density<T: Quantity>(
        &mut self,
        bounds: &[T],
        shape: &Shape,
        force_mode_first: bool,
    ) -> Result<(ArrayD<T>, PertDensity<T>), SamplerError> {
        let drawn = sample_pert_with_rng(
            bounds,
            shape.clone(),
            force_mode_first,
            Some(self.lambda),
            &mut self.rng,
            &self.beta_functions,
        )?;
        let density = drawn.density(&self.beta_functions)?;
        Ok((drawn.into_samples(), density))
    }
}

impl<T: Quantity, R: Rng, B: BetaFunctions> ThreePointSampler<T> for BetaPertSampler<R, B> {
    fn sample(
        &mut self,
        bounds: &[T],
        shape: &Shape,
        force_mode_first: bool,
    ) -> Result<ArrayD<T>, SamplerError> {
        let drawn = sample_pert_with_rng(
            bounds,
            shape.clone(),
            force_mode_first,
            Some(self.lambda),
            &mut self.rng,
            &self.beta_functions,
        )?;
        Ok(drawn.into_samples())
    }
}
