//! Simulation dimensionality.

use std::fmt;

use crate::error::DimensionError;
use crate::id::Vector;

/// Spatial dimensionality of a coupled simulation: 2 or 3.
///
/// Every offset and coordinate vector in a configuration pass is checked
/// against this value before any binding is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions(usize);

impl Dimensions {
    /// Two-dimensional simulation.
    pub const TWO: Self = Self(2);
    /// Three-dimensional simulation.
    pub const THREE: Self = Self(3);

    /// Validate a raw dimensionality.
    pub fn new(value: usize) -> Result<Self, DimensionError> {
        match value {
            2 | 3 => Ok(Self(value)),
            _ => Err(DimensionError::Unsupported { value }),
        }
    }

    /// Number of spatial components.
    pub fn get(self) -> usize {
        self.0
    }

    /// The zero vector of this dimensionality.
    pub fn zero_vector(self) -> Vector {
        smallvec::smallvec![0.0; self.0]
    }

    /// Check that `vector` has exactly `self` components.
    ///
    /// `what` is only used to describe the vector in the error.
    pub fn check(self, vector: &[f64], what: impl FnOnce() -> String) -> Result<(), DimensionError> {
        if vector.len() == self.0 {
            Ok(())
        } else {
            Err(DimensionError::VectorLength {
                what: what(),
                expected: self.0,
                actual: vector.len(),
            })
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.0)
    }
}

impl TryFrom<usize> for Dimensions {
    type Error = DimensionError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_two_and_three() {
        assert_eq!(Dimensions::new(2), Ok(Dimensions::TWO));
        assert_eq!(Dimensions::new(3), Ok(Dimensions::THREE));
    }

    #[test]
    fn rejects_other_values() {
        for value in [0, 1, 4, 7] {
            assert_eq!(
                Dimensions::new(value),
                Err(DimensionError::Unsupported { value })
            );
        }
    }

    #[test]
    fn zero_vector_has_matching_length() {
        assert_eq!(Dimensions::TWO.zero_vector().as_slice(), &[0.0, 0.0]);
        assert_eq!(Dimensions::THREE.zero_vector().len(), 3);
    }

    #[test]
    fn check_reports_lengths() {
        let err = Dimensions::THREE
            .check(&[1.0, 2.0], || "offset".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            DimensionError::VectorLength {
                what: "offset".to_string(),
                expected: 3,
                actual: 2,
            }
        );
        assert!(Dimensions::TWO.check(&[1.0, 2.0], String::new).is_ok());
    }
}
