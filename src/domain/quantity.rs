use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar that can be bracketed by a three-point estimate.
///
/// Samplers only need to subtract, compare and rescale values. They do that
/// on the dimensionless magnitude and convert back, so plain floats and
/// unit-carrying newtypes share the same code path.
pub trait Quantity: Copy + PartialOrd + fmt::Debug {
    /// Magnitude in the type's base unit.
    fn magnitude(self) -> f64;

    fn from_magnitude(value: f64) -> Self;

    fn is_nan(self) -> bool {
        self.magnitude().is_nan()
    }

    fn is_finite(self) -> bool {
        self.magnitude().is_finite()
    }
}

impl Quantity for f64 {
    fn magnitude(self) -> f64 {
        self
    }

    fn from_magnitude(value: f64) -> Self {
        value
    }
}

impl Quantity for f32 {
    fn magnitude(self) -> f64 {
        self as f64
    }

    fn from_magnitude(value: f64) -> Self {
        value as f32
    }
}

/// A duration in (fractional) working days.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Days(pub f64);

impl Quantity for Days {
    fn magnitude(self) -> f64 {
        self.0
    }

    fn from_magnitude(value: f64) -> Self {
        Days(value)
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} days", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_magnitude_widens_without_loss() {
        let value = 1.5_f32;
        assert_eq!(value.magnitude(), 1.5_f64);
        assert_eq!(f32::from_magnitude(value.magnitude()), value);
    }

    #[test]
    fn days_keep_their_unit_through_magnitude() {
        let days = Days::from_magnitude(2.25);
        assert_eq!(days, Days(2.25));
        assert_eq!(days.to_string(), "2.25 days");
    }

    #[test]
    fn nan_and_infinite_are_detected_on_magnitude() {
        assert!(Days(f64::NAN).is_nan());
        assert!(!Days(f64::INFINITY).is_finite());
        assert!(f32::NAN.is_nan());
        assert!(Quantity::is_finite(3.0_f64));
    }
}
