//! [`Mesh`] and [`Data`].

use std::sync::Arc;

use tether_core::{DataId, Dimensions, MeshId};

use crate::error::MeshError;

/// Prefix given to the name of a participant-local structural mesh copy.
pub const LOCAL_MESH_PREFIX: &str = "Local_";

/// A named data field living on a mesh.
///
/// Data is shared between the mesh that defines it and every participant
/// context that reads or writes it.
#[derive(Debug)]
pub struct Data {
    id: DataId,
    name: String,
    components: usize,
}

impl Data {
    /// Unique identity of this data field.
    pub fn id(&self) -> DataId {
        self.id
    }

    /// Name, unique within the owning mesh.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values per vertex: 1 for scalar data, the simulation dimensionality
    /// for vector data.
    pub fn components(&self) -> usize {
        self.components
    }
}

/// A named surface or volume definition with its data schema.
///
/// Vertices and connectivity belong to the runtime; configuration only
/// needs the identity, the name, and the list of data fields.
#[derive(Debug)]
pub struct Mesh {
    id: MeshId,
    name: String,
    dimensions: Dimensions,
    flip_normals: bool,
    data: Vec<Arc<Data>>,
}

impl Mesh {
    /// Create an empty mesh with a fresh [`MeshId`].
    pub fn new(name: impl Into<String>, dimensions: Dimensions, flip_normals: bool) -> Self {
        Self {
            id: MeshId::next(),
            name: name.into(),
            dimensions,
            flip_normals,
            data: Vec::new(),
        }
    }

    /// Add a data field to the schema.
    pub fn create_data(
        &mut self,
        name: impl Into<String>,
        components: usize,
    ) -> Result<Arc<Data>, MeshError> {
        let name = name.into();
        if components == 0 {
            return Err(MeshError::ZeroComponents {
                mesh: self.name.clone(),
                data: name,
            });
        }
        if self.data_by_name(&name).is_some() {
            return Err(MeshError::DuplicateData {
                mesh: self.name.clone(),
                data: name,
            });
        }
        let data = Arc::new(Data {
            id: DataId::next(),
            name,
            components,
        });
        self.data.push(Arc::clone(&data));
        Ok(data)
    }

    /// Unique identity of this mesh.
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Mesh name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spatial dimensionality.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Whether surface normals point inwards.
    pub fn flip_normals(&self) -> bool {
        self.flip_normals
    }

    /// Data fields in declaration order.
    pub fn data(&self) -> &[Arc<Data>] {
        &self.data
    }

    /// Exact-name data lookup.
    pub fn data_by_name(&self, name: &str) -> Option<&Arc<Data>> {
        self.data.iter().find(|d| d.name == name)
    }

    /// Build an empty mesh with the same schema.
    ///
    /// The copy is named `Local_<name>`, keeps dimensionality and normal
    /// orientation, and re-creates every data field by name and component
    /// count. It has its own [`MeshId`] and [`DataId`]s.
    pub fn structural_copy(&self) -> Mesh {
        let data = self
            .data
            .iter()
            .map(|d| {
                Arc::new(Data {
                    id: DataId::next(),
                    name: d.name.clone(),
                    components: d.components,
                })
            })
            .collect();
        Mesh {
            id: MeshId::next(),
            name: format!("{LOCAL_MESH_PREFIX}{}", self.name),
            dimensions: self.dimensions,
            flip_normals: self.flip_normals,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Mesh {
        let mut mesh = Mesh::new("Surface", Dimensions::THREE, true);
        mesh.create_data("Pressure", 1).unwrap();
        mesh.create_data("Forces", 3).unwrap();
        mesh
    }

    #[test]
    fn duplicate_data_rejected() {
        let mut mesh = surface();
        assert_eq!(
            mesh.create_data("Pressure", 1).unwrap_err(),
            MeshError::DuplicateData {
                mesh: "Surface".to_string(),
                data: "Pressure".to_string(),
            }
        );
    }

    #[test]
    fn zero_components_rejected() {
        let mut mesh = surface();
        assert!(matches!(
            mesh.create_data("Empty", 0),
            Err(MeshError::ZeroComponents { .. })
        ));
    }

    #[test]
    fn data_by_name_is_exact() {
        let mesh = surface();
        assert!(mesh.data_by_name("Pressure").is_some());
        assert!(mesh.data_by_name("pressure").is_none());
        assert!(mesh.data_by_name("Press").is_none());
    }

    #[test]
    fn structural_copy_mirrors_schema() {
        let mesh = surface();
        let copy = mesh.structural_copy();
        assert_eq!(copy.name(), "Local_Surface");
        assert_ne!(copy.id(), mesh.id());
        assert_eq!(copy.dimensions(), mesh.dimensions());
        assert!(copy.flip_normals());
        let names: Vec<&str> = copy.data().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["Pressure", "Forces"]);
        for (orig, copied) in mesh.data().iter().zip(copy.data()) {
            assert_ne!(orig.id(), copied.id());
            assert_eq!(orig.components(), copied.components());
        }
    }
}
