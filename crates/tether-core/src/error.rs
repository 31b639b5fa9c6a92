//! Dimensionality errors.

use std::error::Error;
use std::fmt;

/// A vector or dimensionality does not match the configured simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DimensionError {
    /// Only 2D and 3D simulations are supported.
    Unsupported {
        /// The rejected dimensionality.
        value: usize,
    },
    /// A coordinate or offset vector has the wrong number of components.
    VectorLength {
        /// What the vector describes (e.g. `offset of mesh "Surface"`).
        what: String,
        /// Configured dimensionality.
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { value } => {
                write!(f, "dimensionality must be 2 or 3, got {value}")
            }
            Self::VectorLength {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{what} has {actual} components but the simulation is {expected}D"
                )
            }
        }
    }
}

impl Error for DimensionError {}
