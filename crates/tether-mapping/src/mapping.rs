//! The [`Mapping`] trait.

use std::fmt;
use std::sync::Arc;

use tether_core::{Direction, MeshRequirement};
use tether_mesh::Mesh;

/// Input and output meshes bound to a mapping.
#[derive(Clone, Debug)]
pub struct MeshPair {
    /// Mesh the mapping reads values from.
    pub input: Arc<Mesh>,
    /// Mesh the mapping writes values to.
    pub output: Arc<Mesh>,
}

/// An interpolation between two meshes.
///
/// # Contract
///
/// - `input_requirement()` and `output_requirement()` are constant for the
///   lifetime of the mapping.
/// - `set_meshes()` is called exactly once, during participant
///   finalization, before the mapping is shared.
///
/// # Object safety
///
/// This trait is object-safe; declarations carry mappings as
/// `Box<dyn Mapping>` and finalized participants share them as
/// `Arc<dyn Mapping>`.
pub trait Mapping: fmt::Debug + Send + Sync {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// What the mapping needs from its input mesh.
    fn input_requirement(&self) -> MeshRequirement;

    /// What the mapping needs from its output mesh.
    fn output_requirement(&self) -> MeshRequirement;

    /// Bind the meshes the mapping operates on.
    fn set_meshes(&mut self, input: Arc<Mesh>, output: Arc<Mesh>);

    /// The bound meshes, once [`set_meshes`](Mapping::set_meshes) has run.
    fn meshes(&self) -> Option<&MeshPair>;

    /// Requirement on the participant's local side for a given direction.
    ///
    /// A write mapping reads from the local copy, so its input requirement
    /// applies; a read mapping writes into the local copy, so its output
    /// requirement applies.
    fn requirement_for(&self, direction: Direction) -> MeshRequirement {
        match direction {
            Direction::Write => self.input_requirement(),
            Direction::Read => self.output_requirement(),
        }
    }
}
