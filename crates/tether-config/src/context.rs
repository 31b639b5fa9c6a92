//! Per-participant mesh, mapping, and data contexts.
//!
//! Contexts are owned exclusively by their [`Participant`](crate::Participant);
//! the meshes, data, and mappings they point at are shared `Arc` handles.

use std::sync::Arc;

use tether_core::{Direction, MeshRequirement, Timing, Vector};
use tether_mapping::Mapping;
use tether_mesh::{Data, Geometry, Mesh, Spacetree};

/// A mapping merged into a mesh context for one direction.
///
/// Only exists once a mapping has been assigned: a mesh context without a
/// mapping in some direction simply has no `MappingContext` there.
#[derive(Clone, Debug)]
pub struct MappingContext {
    pub(crate) mapping: Arc<dyn Mapping>,
    pub(crate) local_mesh: Arc<Mesh>,
    pub(crate) timing: Timing,
}

impl MappingContext {
    /// The mapping, with its meshes bound.
    pub fn mapping(&self) -> &Arc<dyn Mapping> {
        &self.mapping
    }

    /// Structural copy of the context mesh on the participant side: the
    /// mapping input for writes, the mapping output for reads.
    pub fn local_mesh(&self) -> &Arc<Mesh> {
        &self.local_mesh
    }

    /// When the mapping is recomputed.
    pub fn timing(&self) -> Timing {
        self.timing
    }
}

/// A participant's binding to one mesh.
#[derive(Debug)]
pub struct MeshContext {
    pub(crate) mesh: Arc<Mesh>,
    pub(crate) geometry: Option<Arc<Geometry>>,
    pub(crate) spacetree: Option<Arc<Spacetree>>,
    pub(crate) local_offset: Vector,
    pub(crate) provide_mesh: bool,
    pub(crate) receive_mesh_from: Option<String>,
    pub(crate) write_mapping: Option<MappingContext>,
    pub(crate) read_mapping: Option<MappingContext>,
    pub(crate) mesh_requirement: MeshRequirement,
}

impl MeshContext {
    pub(crate) fn new(
        mesh: Arc<Mesh>,
        geometry: Option<Arc<Geometry>>,
        spacetree: Option<Arc<Spacetree>>,
        local_offset: Vector,
        provide_mesh: bool,
        receive_mesh_from: Option<String>,
    ) -> Self {
        Self {
            mesh,
            geometry,
            spacetree,
            local_offset,
            provide_mesh,
            receive_mesh_from,
            write_mapping: None,
            read_mapping: None,
            mesh_requirement: MeshRequirement::Undefined,
        }
    }

    /// The used mesh.
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// Geometry generating the mesh, if it is not solver-provided.
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.geometry.as_ref()
    }

    /// Spacetree indexing the mesh.
    pub fn spacetree(&self) -> Option<&Arc<Spacetree>> {
        self.spacetree.as_ref()
    }

    /// Offset applied to the mesh for this participant only.
    pub fn local_offset(&self) -> &[f64] {
        &self.local_offset
    }

    /// Whether this participant creates the mesh.
    pub fn provides_mesh(&self) -> bool {
        self.provide_mesh
    }

    /// Participant the mesh is received from, if it is not provided here
    /// or by a geometry.
    pub fn receives_mesh_from(&self) -> Option<&str> {
        self.receive_mesh_from.as_deref()
    }

    /// Mapping merged for `direction`, if any.
    pub fn mapping(&self, direction: Direction) -> Option<&MappingContext> {
        match direction {
            Direction::Write => self.write_mapping.as_ref(),
            Direction::Read => self.read_mapping.as_ref(),
        }
    }

    pub(crate) fn mapping_slot_mut(&mut self, direction: Direction) -> &mut Option<MappingContext> {
        match direction {
            Direction::Write => &mut self.write_mapping,
            Direction::Read => &mut self.read_mapping,
        }
    }

    /// Strongest requirement of the merged mappings.
    pub fn mesh_requirement(&self) -> MeshRequirement {
        self.mesh_requirement
    }
}

/// Whether a data context has been wired to a local mesh copy.
#[derive(Clone, Debug, Default)]
pub enum LocalBinding {
    /// No mapping exists for the data's mesh in its direction. The
    /// participant accesses the mesh data directly.
    #[default]
    Unmapped,
    /// The participant accesses `local_data`, which the mapping transfers
    /// to or from the mesh.
    Mapped {
        /// Copy of the mesh context's mapping for this direction.
        mapping: MappingContext,
        /// Same-named data on the local mesh copy.
        local_data: Arc<Data>,
    },
}

/// Data a participant reads or writes on one mesh.
#[derive(Clone, Debug)]
pub struct DataContext {
    pub(crate) data: Arc<Data>,
    pub(crate) mesh: Arc<Mesh>,
    pub(crate) binding: LocalBinding,
}

impl DataContext {
    pub(crate) fn new(data: Arc<Data>, mesh: Arc<Mesh>) -> Self {
        Self {
            data,
            mesh,
            binding: LocalBinding::Unmapped,
        }
    }

    /// The data on the used mesh.
    pub fn data(&self) -> &Arc<Data> {
        &self.data
    }

    /// The used mesh.
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// Local wiring state.
    pub fn binding(&self) -> &LocalBinding {
        &self.binding
    }

    /// Mapping context, once resolved.
    pub fn mapping_context(&self) -> Option<&MappingContext> {
        match &self.binding {
            LocalBinding::Mapped { mapping, .. } => Some(mapping),
            LocalBinding::Unmapped => None,
        }
    }

    /// Data on the local mesh copy, once resolved.
    pub fn local_data(&self) -> Option<&Arc<Data>> {
        match &self.binding {
            LocalBinding::Mapped { local_data, .. } => Some(local_data),
            LocalBinding::Unmapped => None,
        }
    }
}
