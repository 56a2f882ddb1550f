use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecialFunctionError {
    #[error("probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),
    #[error("beta shape parameters must be positive and finite, got alpha={alpha}, beta={beta}")]
    InvalidShape { alpha: f64, beta: f64 },
    #[error("{function} returned a non-finite value for alpha={alpha}, beta={beta}")]
    NonFinite {
        function: &'static str,
        alpha: f64,
        beta: f64,
    },
}

/// Beta-family special functions the PERT sampler depends on.
pub trait BetaFunctions {
    /// Inverse of the regularized incomplete Beta function: the `p`-quantile
    /// of a `Beta(alpha, beta)` variable.
    fn inv_incomplete_beta(&self, p: f64, alpha: f64, beta: f64)
    -> Result<f64, SpecialFunctionError>;

    /// The Beta function `B(alpha, beta)`.
    fn beta(&self, alpha: f64, beta: f64) -> Result<f64, SpecialFunctionError>;
}

/// [`BetaFunctions`] backed by `statrs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatrsBeta;

impl BetaFunctions for StatrsBeta {
    fn inv_incomplete_beta(
        &self,
        p: f64,
        alpha: f64,
        beta: f64,
    ) -> Result<f64, SpecialFunctionError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SpecialFunctionError::ProbabilityOutOfRange(p));
        }
        check_shape(alpha, beta)?;

        let x = statrs::function::beta::inv_beta_reg(alpha, beta, p);
        if !x.is_finite() {
            return Err(SpecialFunctionError::NonFinite {
                function: "inv_beta_reg",
                alpha,
                beta,
            });
        }
        Ok(x.clamp(0.0, 1.0))
    }

    fn beta(&self, alpha: f64, beta: f64) -> Result<f64, SpecialFunctionError> {
        check_shape(alpha, beta)?;
        let value = statrs::function::beta::ln_beta(alpha, beta).exp();
        if !value.is_finite() {
            return Err(SpecialFunctionError::NonFinite {
                function: "beta",
                alpha,
                beta,
            });
        }
        Ok(value)
    }
}

fn check_shape(alpha: f64, beta: f64) -> Result<(), SpecialFunctionError> {
    let valid = |value: f64| value.is_finite() && value > 0.0;
    if valid(alpha) && valid(beta) {
        Ok(())
    } else {
        Err(SpecialFunctionError::InvalidShape { alpha, beta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn inverse_of_uniform_beta_is_identity() {
        for p in [0.0, 0.1, 0.5, 0.9] {
            let x = StatrsBeta.inv_incomplete_beta(p, 1.0, 1.0).unwrap();
            assert_abs_diff_eq!(x, p, epsilon = 1e-6);
        }
    }

    #[test]
    fn symmetric_beta_has_its_median_at_one_half() {
        let x = StatrsBeta.inv_incomplete_beta(0.5, 3.0, 3.0).unwrap();
        assert_abs_diff_eq!(x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn inverse_matches_closed_form_for_beta_two_one() {
        // Beta(2, 1) has CDF x^2.
        let x = StatrsBeta.inv_incomplete_beta(0.25, 2.0, 1.0).unwrap();
        assert_abs_diff_eq!(x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn beta_function_matches_known_values() {
        assert_abs_diff_eq!(StatrsBeta.beta(1.0, 1.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(StatrsBeta.beta(2.0, 3.0).unwrap(), 1.0 / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert_eq!(
            StatrsBeta.inv_incomplete_beta(1.5, 2.0, 2.0),
            Err(SpecialFunctionError::ProbabilityOutOfRange(1.5))
        );
        assert!(matches!(
            StatrsBeta.beta(0.0, 2.0),
            Err(SpecialFunctionError::InvalidShape { .. })
        ));
        assert!(matches!(
            StatrsBeta.inv_incomplete_beta(0.5, f64::NAN, 2.0),
            Err(SpecialFunctionError::InvalidShape { .. })
        ));
    }
}
