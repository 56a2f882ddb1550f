use thiserror::Error;

use crate::domain::quantity::Quantity;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("bounds must have 1, 2 or 3 elements, got {0}")]
    InvalidLength(usize),
    #[error("bounds must be finite, got optimistic={optimistic}, pessimistic={pessimistic}")]
    NonFiniteBounds { optimistic: f64, pessimistic: f64 },
    #[error("most likely value {most_likely} is outside [{optimistic}, {pessimistic}]")]
    ModeOutOfRange {
        optimistic: f64,
        most_likely: f64,
        pessimistic: f64,
    },
}

/// Resolved `(a, m, b)` triple of a three-point estimate.
///
/// `optimistic` and `pessimistic` are the first and last bound as given; they
/// may appear in either order. A NaN `most_likely` means "no mode" and makes
/// the samplers fall back to a uniform distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePointEstimate<T> {
    pub optimistic: T,
    pub most_likely: T,
    pub pessimistic: T,
}

impl<T: Quantity> ThreePointEstimate<T> {
    /// Resolves a 1-, 2- or 3-element bounds vector.
    ///
    /// - `[x]` is the constant `x`.
    /// - `[a, b]` puts the mode at the midpoint.
    /// - `[a, m, b]` is taken as is.
    pub fn from_bounds(bounds: &[T]) -> Result<Self, EstimateError> {
        let estimate = match *bounds {
            [value] => Self {
                optimistic: value,
                most_likely: value,
                pessimistic: value,
            },
            [optimistic, pessimistic] => Self {
                optimistic,
                most_likely: midpoint(optimistic, pessimistic),
                pessimistic,
            },
            [optimistic, most_likely, pessimistic] => Self {
                optimistic,
                most_likely,
                pessimistic,
            },
            _ => return Err(EstimateError::InvalidLength(bounds.len())),
        };
        estimate.validate()?;
        Ok(estimate)
    }

    fn validate(&self) -> Result<(), EstimateError> {
        if !self.optimistic.is_finite() || !self.pessimistic.is_finite() {
            return Err(EstimateError::NonFiniteBounds {
                optimistic: self.optimistic.magnitude(),
                pessimistic: self.pessimistic.magnitude(),
            });
        }
        if self.most_likely.is_nan() {
            return Ok(());
        }

        let (a, m, b) = (self.optimistic, self.most_likely, self.pessimistic);
        let ascending = a <= m && m <= b;
        let descending = b <= m && m <= a;
        if !ascending && !descending {
            return Err(EstimateError::ModeOutOfRange {
                optimistic: a.magnitude(),
                most_likely: m.magnitude(),
                pessimistic: b.magnitude(),
            });
        }
        Ok(())
    }

    /// Both bounds coincide; the estimate is a constant.
    pub fn is_degenerate(&self) -> bool {
        self.optimistic == self.pessimistic
    }

    pub fn has_mode(&self) -> bool {
        !self.most_likely.is_nan()
    }

    pub fn midpoint(&self) -> T {
        midpoint(self.optimistic, self.pessimistic)
    }

    /// The mode, or the midpoint when no mode was given.
    pub fn mode_or_midpoint(&self) -> T {
        if self.has_mode() {
            self.most_likely
        } else {
            self.midpoint()
        }
    }

    /// Signed width `b - a` in base units.
    pub fn range(&self) -> f64 {
        self.pessimistic.magnitude() - self.optimistic.magnitude()
    }

    /// Position of the mode within the bounds, `(m - a) / (b - a)`.
    pub fn mode_fraction(&self) -> f64 {
        (self.most_likely.magnitude() - self.optimistic.magnitude()) / self.range()
    }

    /// Maps a fraction of the range back onto the bounds, clamped to them.
    pub fn rescale(&self, fraction: f64) -> T {
        let a = self.optimistic.magnitude();
        let b = self.pessimistic.magnitude();
        let value = a + (b - a) * fraction;
        T::from_magnitude(value.clamp(a.min(b), a.max(b)))
    }

    /// Whether `value` lies in the closed interval spanned by the bounds.
    pub fn contains(&self, value: T) -> bool {
        let (a, b) = (self.optimistic, self.pessimistic);
        (a <= value && value <= b) || (b <= value && value <= a)
    }
}

fn midpoint<T: Quantity>(a: T, b: T) -> T {
    T::from_magnitude((a.magnitude() + b.magnitude()) / 2.0)
}
