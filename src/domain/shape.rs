use ndarray::IxDyn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape must have at least one dimension")]
    NoDimensions,
    #[error("shape {0:?} has too many elements")]
    TooLarge(Vec<usize>),
}

// Largest element count a buffer of f64 samples can address.
const MAX_ELEMENTS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Requested output shape as a caller may spell it.
///
/// A scalar `n` and a one-element list `[n]` both mean an `n x n` array.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ShapeDescriptor {
    Square(usize),
    Dims(Vec<usize>),
}

impl Default for ShapeDescriptor {
    fn default() -> Self {
        ShapeDescriptor::Dims(vec![1, 1])
    }
}

impl From<usize> for ShapeDescriptor {
    fn from(value: usize) -> Self {
        ShapeDescriptor::Square(value)
    }
}

impl From<Vec<usize>> for ShapeDescriptor {
    fn from(value: Vec<usize>) -> Self {
        ShapeDescriptor::Dims(value)
    }
}

impl From<&[usize]> for ShapeDescriptor {
    fn from(value: &[usize]) -> Self {
        ShapeDescriptor::Dims(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for ShapeDescriptor {
    fn from(value: [usize; N]) -> Self {
        ShapeDescriptor::Dims(value.to_vec())
    }
}

impl From<Shape> for ShapeDescriptor {
    fn from(value: Shape) -> Self {
        ShapeDescriptor::Dims(value.dims)
    }
}

/// Canonical dimension list of a sample array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn square(n: usize) -> Self {
        Self { dims: vec![n, n] }
    }

    pub fn resolve(descriptor: impl Into<ShapeDescriptor>) -> Result<Self, ShapeError> {
        let shape = match descriptor.into() {
            ShapeDescriptor::Square(n) => Self::square(n),
            ShapeDescriptor::Dims(dims) => match dims.as_slice() {
                [] => return Err(ShapeError::NoDimensions),
                [n] => Self::square(*n),
                _ => Self { dims },
            },
        };
        shape.check_size()?;
        Ok(shape)
    }

    // Zero-length axes are skipped, matching how ndarray sizes its buffers.
    fn check_size(&self) -> Result<(), ShapeError> {
        let elements = self
            .dims
            .iter()
            .filter(|&&d| d != 0)
            .try_fold(1_usize, |acc, &d| acc.checked_mul(d));
        match elements {
            Some(n) if n <= MAX_ELEMENTS => Ok(()),
            _ => Err(ShapeError::TooLarge(self.dims.clone())),
        }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_ix(&self) -> IxDyn {
        IxDyn(&self.dims)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self { dims: vec![1, 1] }
    }
}
