//! Mesh usage and data binding.
//!
//! Both binders act on the participant currently open in the
//! [`BuilderContext`]. Mesh usage must come first: data can only be bound
//! on a mesh the participant already uses.

use std::sync::Arc;

use tether_core::{Dimensions, Direction};
use tether_mesh::References;

use crate::builder::BuilderContext;
use crate::context::{DataContext, MeshContext};
use crate::element::{DataDecl, ElementKind, UseMesh};
use crate::error::{ConfigError, ReferenceError, UsageError};

/// Bind a `use-mesh` declaration to the current participant.
///
/// The offset is checked against `dimensions` before anything is
/// resolved. Geometry and spacetree are optional and resolved by mesh
/// name; their absence is not an error.
pub fn bind_mesh(
    ctx: &mut BuilderContext,
    dimensions: Dimensions,
    references: &References,
    decl: UseMesh,
) -> Result<(), ConfigError> {
    let participant = ctx.current_mut(ElementKind::UseMesh)?;
    tracing::trace!(participant = %participant.name(), mesh = %decl.name, "bind_mesh");

    let offset = match decl.offset {
        Some(offset) => {
            dimensions.check(&offset, || format!("offset of mesh \"{}\"", decl.name))?;
            offset
        }
        None => dimensions.zero_vector(),
    };

    let mesh = references
        .meshes
        .get(&decl.name)
        .ok_or_else(|| ReferenceError::UndefinedMesh {
            participant: participant.name().to_string(),
            mesh: decl.name.clone(),
        })?;
    let geometry = references.geometry_for(&decl.name).cloned();
    let spacetree = references.spacetree_for(&decl.name).cloned();
    // An empty provider means the mesh is provided locally.
    let from = decl.from.filter(|from| !from.is_empty());

    let context = MeshContext::new(
        Arc::clone(mesh),
        geometry,
        spacetree,
        offset,
        decl.provide,
        from,
    );
    participant.use_mesh(context)?;
    Ok(())
}

/// Bind a `write-data` or `read-data` declaration to the current
/// participant.
pub fn bind_data(
    ctx: &mut BuilderContext,
    decl: DataDecl,
    direction: Direction,
) -> Result<(), ConfigError> {
    let kind = match direction {
        Direction::Write => ElementKind::WriteData,
        Direction::Read => ElementKind::ReadData,
    };
    let participant = ctx.current_mut(kind)?;
    tracing::trace!(
        participant = %participant.name(),
        data = %decl.name,
        mesh = %decl.mesh,
        %direction,
        "bind_data"
    );

    let mesh = participant
        .mesh_context_by_name(&decl.mesh)
        .map(|context| Arc::clone(context.mesh()))
        .ok_or_else(|| UsageError::DataOnUnusedMesh {
            participant: participant.name().to_string(),
            mesh: decl.mesh.clone(),
            data: decl.name.clone(),
            direction,
        })?;
    let data = mesh
        .data_by_name(&decl.name)
        .cloned()
        .ok_or_else(|| ReferenceError::UndefinedData {
            participant: participant.name().to_string(),
            mesh: decl.mesh.clone(),
            data: decl.name.clone(),
        })?;

    participant.add_data_context(direction, DataContext::new(data, mesh));
    Ok(())
}
