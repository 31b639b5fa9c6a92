//! Strongly-typed identifiers and the [`Vector`] type alias.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`MeshId`] allocation.
static MESH_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Counter for unique [`DataId`] allocation.
static DATA_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a mesh instance.
///
/// Allocated from a monotonic atomic counter via [`MeshId::next`].
/// Two distinct meshes always have different IDs, even when they share a
/// name and data schema. A participant's local copy of a mesh therefore
/// never collides with the mesh it mirrors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u64);

impl MeshId {
    /// Allocate a fresh, unique mesh ID. Thread-safe.
    pub fn next() -> Self {
        Self(MESH_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for diagnostics.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a data field carried by a mesh.
///
/// Allocated the same way as [`MeshId`]; data created on a structural mesh
/// copy gets new IDs and is matched to the original by name only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataId(u64);

impl DataId {
    /// Allocate a fresh, unique data ID. Thread-safe.
    pub fn next() -> Self {
        Self(DATA_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value, for diagnostics.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A coordinate or offset in simulation space.
///
/// Uses `SmallVec<[f64; 3]>` so 2D and 3D vectors never touch the heap.
pub type Vector = SmallVec<[f64; 3]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_ids_are_unique() {
        let a = MeshId::next();
        let b = MeshId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn data_ids_are_unique() {
        let ids: Vec<DataId> = (0..16).map(|_| DataId::next()).collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
