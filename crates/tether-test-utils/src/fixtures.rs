//! Reusable mapping and registry fixtures.
//!
//! [`surface_references`] registers three meshes:
//!
//! - `Surface`: data `Pressure` (1), `Forces` (dimensions), `Temperature` (1).
//! - `Volume`: data `Temperature` (1), created by a cuboid geometry and
//!   indexed by the `Octree` spacetree.
//! - `Interface`: data `Displacements` (dimensions).

use std::sync::Arc;

use tether_core::{Dimensions, Direction, MeshRequirement, Timing, Vector};
use tether_mapping::{ConfiguredMapping, Mapping, MeshPair};
use tether_mesh::{Geometry, GeometryKind, Mesh, References, Spacetree, SpacetreeKind};

/// Mapping with fixed input and output requirements.
///
/// Records the meshes it is bound to so tests can check the wiring.
#[derive(Debug)]
pub struct FixedMapping {
    pub name: String,
    pub input: MeshRequirement,
    pub output: MeshRequirement,
    meshes: Option<MeshPair>,
}

impl FixedMapping {
    pub fn new(input: MeshRequirement, output: MeshRequirement) -> Self {
        Self {
            name: "fixed".to_string(),
            input,
            output,
            meshes: None,
        }
    }

    /// Same requirement on both sides.
    pub fn uniform(requirement: MeshRequirement) -> Self {
        Self::new(requirement, requirement)
    }
}

impl Mapping for FixedMapping {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_requirement(&self) -> MeshRequirement {
        self.input
    }

    fn output_requirement(&self) -> MeshRequirement {
        self.output
    }

    fn set_meshes(&mut self, input: Arc<Mesh>, output: Arc<Mesh>) {
        assert!(self.meshes.is_none(), "set_meshes called twice");
        self.meshes = Some(MeshPair { input, output });
    }

    fn meshes(&self) -> Option<&MeshPair> {
        self.meshes.as_ref()
    }
}

/// Standard registries for `dimensions`.
pub fn surface_references(dimensions: Dimensions) -> References {
    let components = dimensions.get();
    let mut references = References::new();

    let mut surface = Mesh::new("Surface", dimensions, false);
    surface.create_data("Pressure", 1).unwrap();
    surface.create_data("Forces", components).unwrap();
    surface.create_data("Temperature", 1).unwrap();
    references.meshes.add(surface).unwrap();

    let mut volume = Mesh::new("Volume", dimensions, false);
    volume.create_data("Temperature", 1).unwrap();
    references
        .meshes
        .add_with_spacetree(volume, "Octree")
        .unwrap();
    references
        .spacetrees
        .insert(Spacetree {
            name: "Octree".to_string(),
            kind: SpacetreeKind::DynamicOctree,
            max_mesh_width: 0.1,
        })
        .unwrap();
    references
        .geometries
        .insert(Geometry {
            mesh_name: "Volume".to_string(),
            kind: GeometryKind::Cuboid {
                lengths: Vector::from_elem(1.0, components),
                discretization_width: 0.1,
            },
            offset: dimensions.zero_vector(),
        })
        .unwrap();

    let mut interface = Mesh::new("Interface", dimensions, true);
    interface.create_data("Displacements", components).unwrap();
    references.meshes.add(interface).unwrap();

    references
}

/// Declare `mapping` on the registered mesh named `mesh`.
///
/// # Panics
///
/// Panics if the mesh is not registered.
pub fn configured_mapping(
    references: &References,
    mesh: &str,
    direction: Direction,
    timing: Timing,
    mapping: impl Mapping + 'static,
) -> ConfiguredMapping {
    let mesh = references
        .meshes
        .get(mesh)
        .unwrap_or_else(|| panic!("fixture mesh {mesh:?} not registered"));
    ConfiguredMapping::new(Arc::clone(mesh), direction, timing, Box::new(mapping))
}
