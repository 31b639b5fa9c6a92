//! Built-in interpolation mappings.
//!
//! These are declarations: they record the method and constraint chosen in
//! the configuration and report the mesh requirements that follow from
//! them. The numerical kernels are supplied by the runtime.

use std::sync::Arc;

use tether_core::MeshRequirement;
use tether_mesh::Mesh;

use crate::mapping::{Mapping, MeshPair};

/// Whether a mapping preserves values or integral quantities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Interpolated values match the source values (e.g. temperature).
    Consistent,
    /// Sums over the mesh are preserved (e.g. forces).
    Conservative,
}

/// Radial basis function kernels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RbfKernel {
    /// Global thin plate splines.
    ThinPlateSplines,
    /// Global Gaussian with the given shape parameter.
    Gaussian {
        /// Shape parameter.
        shape_parameter: f64,
    },
    /// Wendland C2 polynomial with compact support.
    CompactPolynomialC2 {
        /// Support radius.
        support_radius: f64,
    },
}

/// Interpolation method.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Method {
    /// Copy the value of the closest vertex.
    NearestNeighbor,
    /// Project onto the closest edge or triangle and interpolate linearly.
    NearestProjection,
    /// Radial basis function interpolation.
    RadialBasis(RbfKernel),
}

impl Method {
    fn label(&self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest-neighbor",
            Self::NearestProjection => "nearest-projection",
            Self::RadialBasis(RbfKernel::ThinPlateSplines) => "rbf-thin-plate-splines",
            Self::RadialBasis(RbfKernel::Gaussian { .. }) => "rbf-gaussian",
            Self::RadialBasis(RbfKernel::CompactPolynomialC2 { .. }) => {
                "rbf-compact-polynomial-c2"
            }
        }
    }
}

/// A declared interpolation mapping.
#[derive(Debug)]
pub struct InterpolationMapping {
    method: Method,
    constraint: Constraint,
    meshes: Option<MeshPair>,
}

impl InterpolationMapping {
    /// Declare a mapping. Meshes are bound later by participant
    /// finalization.
    pub fn new(method: Method, constraint: Constraint) -> Self {
        Self {
            method,
            constraint,
            meshes: None,
        }
    }

    /// Interpolation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Constraint.
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }
}

impl Mapping for InterpolationMapping {
    fn name(&self) -> &str {
        self.method.label()
    }

    fn input_requirement(&self) -> MeshRequirement {
        match (self.method, self.constraint) {
            (Method::NearestProjection, Constraint::Consistent) => MeshRequirement::Full,
            _ => MeshRequirement::Vertex,
        }
    }

    fn output_requirement(&self) -> MeshRequirement {
        match (self.method, self.constraint) {
            (Method::NearestProjection, Constraint::Conservative) => MeshRequirement::Full,
            _ => MeshRequirement::Vertex,
        }
    }

    fn set_meshes(&mut self, input: Arc<Mesh>, output: Arc<Mesh>) {
        self.meshes = Some(MeshPair { input, output });
    }

    fn meshes(&self) -> Option<&MeshPair> {
        self.meshes.as_ref()
    }
}
