//! Name-keyed reference registries.
//!
//! Registries are filled while the mesh, geometry, and spacetree sections
//! of a configuration are read, and are only looked up afterwards, during
//! participant resolution. Insertion order is preserved so diagnostics and
//! iteration follow the document.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::MeshError;
use crate::geometry::{Geometry, Spacetree};
use crate::mesh::Mesh;

/// Anything stored in a [`Registry`] under its own name.
pub trait Named {
    /// Registry key.
    fn name(&self) -> &str;
}

impl Named for Mesh {
    fn name(&self) -> &str {
        Mesh::name(self)
    }
}

/// Insertion-ordered `name → Arc<T>` table that rejects duplicate names.
#[derive(Debug)]
pub struct Registry<T> {
    kind: &'static str,
    entries: IndexMap<String, Arc<T>>,
}

impl<T: Named> Registry<T> {
    /// Create an empty registry. `kind` names the entries in errors.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Register an entry, returning the shared handle.
    pub fn insert(&mut self, entry: T) -> Result<Arc<T>, MeshError> {
        self.insert_shared(Arc::new(entry))
    }

    /// Register an already-shared entry.
    pub fn insert_shared(&mut self, entry: Arc<T>) -> Result<Arc<T>, MeshError> {
        let name = entry.name().to_string();
        if self.entries.contains_key(&name) {
            return Err(MeshError::DuplicateName {
                registry: self.kind,
                name,
            });
        }
        self.entries.insert(name, Arc::clone(&entry));
        Ok(entry)
    }

    /// Look up by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.entries.get(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.values()
    }
}

/// Mesh registry that also records which spacetree each mesh uses.
#[derive(Debug)]
pub struct MeshRegistry {
    meshes: Registry<Mesh>,
    spacetree_names: IndexMap<String, String>,
}

impl MeshRegistry {
    /// Create an empty mesh registry.
    pub fn new() -> Self {
        Self {
            meshes: Registry::new("mesh"),
            spacetree_names: IndexMap::new(),
        }
    }

    /// Register a mesh that does not use a spacetree.
    pub fn add(&mut self, mesh: Mesh) -> Result<Arc<Mesh>, MeshError> {
        self.meshes.insert(mesh)
    }

    /// Register a mesh indexed by the spacetree named `spacetree`.
    pub fn add_with_spacetree(
        &mut self,
        mesh: Mesh,
        spacetree: impl Into<String>,
    ) -> Result<Arc<Mesh>, MeshError> {
        let mesh = self.meshes.insert(mesh)?;
        self.spacetree_names
            .insert(mesh.name().to_string(), spacetree.into());
        Ok(mesh)
    }

    /// Look up a mesh by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Mesh>> {
        self.meshes.get(name)
    }

    /// Whether the named mesh is indexed by a spacetree.
    pub fn uses_spacetree(&self, mesh_name: &str) -> bool {
        self.spacetree_names.contains_key(mesh_name)
    }

    /// Name of the spacetree used by the named mesh, if any.
    pub fn spacetree_name(&self, mesh_name: &str) -> Option<&str> {
        self.spacetree_names.get(mesh_name).map(String::as_str)
    }

    /// Number of registered meshes.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh is registered.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Meshes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Mesh>> {
        self.meshes.iter()
    }
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The lookup tables participant resolution reads from.
#[derive(Debug)]
pub struct References {
    /// Meshes by name.
    pub meshes: MeshRegistry,
    /// Geometries by the name of the mesh they create.
    pub geometries: Registry<Geometry>,
    /// Spacetrees by name.
    pub spacetrees: Registry<Spacetree>,
}

impl References {
    /// Create empty registries.
    pub fn new() -> Self {
        Self {
            meshes: MeshRegistry::new(),
            geometries: Registry::new("geometry"),
            spacetrees: Registry::new("spacetree"),
        }
    }

    /// Geometry creating the named mesh, if any.
    pub fn geometry_for(&self, mesh_name: &str) -> Option<&Arc<Geometry>> {
        self.geometries.get(mesh_name)
    }

    /// Spacetree indexing the named mesh, if the mesh uses one and it is
    /// registered.
    pub fn spacetree_for(&self, mesh_name: &str) -> Option<&Arc<Spacetree>> {
        self.meshes
            .spacetree_name(mesh_name)
            .and_then(|name| self.spacetrees.get(name))
    }
}

impl Default for References {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryKind, SpacetreeKind};
    use tether_core::Dimensions;

    fn references() -> References {
        let mut refs = References::new();
        refs.meshes
            .add(Mesh::new("Surface", Dimensions::THREE, false))
            .unwrap();
        refs.meshes
            .add_with_spacetree(Mesh::new("Volume", Dimensions::THREE, false), "Tree")
            .unwrap();
        refs.spacetrees
            .insert(Spacetree {
                name: "Tree".to_string(),
                kind: SpacetreeKind::DynamicOctree,
                max_mesh_width: 0.5,
            })
            .unwrap();
        refs.geometries
            .insert(Geometry {
                mesh_name: "Surface".to_string(),
                kind: GeometryKind::Sphere {
                    radius: 1.0,
                    discretization_width: 0.1,
                },
                offset: Dimensions::THREE.zero_vector(),
            })
            .unwrap();
        refs
    }

    #[test]
    fn duplicate_mesh_name_rejected() {
        let mut refs = references();
        let err = refs
            .meshes
            .add(Mesh::new("Surface", Dimensions::THREE, false))
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::DuplicateName {
                registry: "mesh",
                name: "Surface".to_string(),
            }
        );
    }

    #[test]
    fn lookups_resolve_by_mesh_name() {
        let refs = references();
        assert!(refs.meshes.get("Surface").is_some());
        assert!(refs.meshes.get("Missing").is_none());
        assert!(refs.geometry_for("Surface").is_some());
        assert!(refs.geometry_for("Volume").is_none());
        assert!(refs.meshes.uses_spacetree("Volume"));
        assert_eq!(refs.spacetree_for("Volume").unwrap().name, "Tree");
        assert!(refs.spacetree_for("Surface").is_none());
    }

    #[test]
    fn unregistered_spacetree_resolves_to_none() {
        let mut refs = References::new();
        refs.meshes
            .add_with_spacetree(Mesh::new("Volume", Dimensions::TWO, false), "Ghost")
            .unwrap();
        assert_eq!(refs.meshes.spacetree_name("Volume"), Some("Ghost"));
        assert!(refs.spacetree_for("Volume").is_none());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let refs = references();
        let names: Vec<&str> = refs.meshes.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Surface", "Volume"]);
    }
}
