//! Mesh and registry error types.

use std::error::Error;
use std::fmt;

/// Errors raised while populating meshes and reference registries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A registry already holds an entry with this name.
    DuplicateName {
        /// Registry kind (`"mesh"`, `"geometry"`, `"spacetree"`).
        registry: &'static str,
        /// The contested name.
        name: String,
    },
    /// A mesh already carries data with this name.
    DuplicateData {
        /// Mesh name.
        mesh: String,
        /// The contested data name.
        data: String,
    },
    /// Data must have at least one component.
    ZeroComponents {
        /// Mesh name.
        mesh: String,
        /// Data name.
        data: String,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { registry, name } => {
                write!(f, "{registry} \"{name}\" is defined more than once")
            }
            Self::DuplicateData { mesh, data } => {
                write!(f, "mesh \"{mesh}\" defines data \"{data}\" more than once")
            }
            Self::ZeroComponents { mesh, data } => {
                write!(f, "data \"{data}\" of mesh \"{mesh}\" has zero components")
            }
        }
    }
}

impl Error for MeshError {}
