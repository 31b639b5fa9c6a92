//! Mapping declarations awaiting a participant.

use std::sync::Arc;

use tether_core::{Direction, Timing};
use tether_mesh::Mesh;

use crate::mapping::Mapping;

/// A mapping declared inside a participant, not yet merged into it.
///
/// Produced by the mapping sub-configuration and buffered until the
/// enclosing participant is finalized.
#[derive(Debug)]
pub struct ConfiguredMapping {
    /// Mesh on the participant side of the mapping.
    pub mesh: Arc<Mesh>,
    /// Whether the participant writes or reads through this mapping.
    pub direction: Direction,
    /// When the mapping is recomputed.
    pub timing: Timing,
    /// The mapping itself, meshes still unbound.
    pub mapping: Box<dyn Mapping>,
}

impl ConfiguredMapping {
    /// Declare a mapping for `mesh` in `direction`.
    pub fn new(
        mesh: Arc<Mesh>,
        direction: Direction,
        timing: Timing,
        mapping: Box<dyn Mapping>,
    ) -> Self {
        Self {
            mesh,
            direction,
            timing,
            mapping,
        }
    }
}
