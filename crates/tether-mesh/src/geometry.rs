//! Geometry and spacetree descriptors.
//!
//! A [`Geometry`] generates the vertices of the mesh it is named after; a
//! [`Spacetree`] accelerates spatial queries on the meshes that reference
//! it. Both are built by the runtime. Configuration only carries them
//! through to the participant that uses the mesh.

use std::path::PathBuf;

use tether_core::Vector;

use crate::registry::Named;

/// Built-in geometry generators.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryKind {
    /// Axis-aligned box with the given edge lengths.
    Cuboid {
        /// Edge length per axis.
        lengths: Vector,
        /// Target discretization width.
        discretization_width: f64,
    },
    /// Sphere of the given radius.
    Sphere {
        /// Sphere radius.
        radius: f64,
        /// Target discretization width.
        discretization_width: f64,
    },
    /// Geometry read from a file.
    Import {
        /// Source file.
        file: PathBuf,
    },
}

/// A geometry that creates the mesh of the same name.
#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    /// Name of the mesh this geometry builds.
    pub mesh_name: String,
    /// Generator.
    pub kind: GeometryKind,
    /// Translation applied to the generated vertices.
    pub offset: Vector,
}

impl Named for Geometry {
    fn name(&self) -> &str {
        &self.mesh_name
    }
}

/// Spacetree flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpacetreeKind {
    /// Built once, never refined.
    Static,
    /// Octree refined on demand.
    DynamicOctree,
    /// Peano tree (3-way splits) refined on demand.
    DynamicPeano,
}

/// A spatial index shared by one or more meshes.
#[derive(Clone, Debug, PartialEq)]
pub struct Spacetree {
    /// Spacetree name.
    pub name: String,
    /// Tree flavour.
    pub kind: SpacetreeKind,
    /// Refinement stops once cells are narrower than this.
    pub max_mesh_width: f64,
}

impl Named for Spacetree {
    fn name(&self) -> &str {
        &self.name
    }
}
